//! Gallery markup builders for tests and demos.

use crate::dom::node::{NodeData, NodeId};
use crate::dom::tree::Dom;
use crate::geometry::Rect;

/// Builds thumbnail containers under one parent.
///
/// Every container gets the host layout `rect`; its thumbnail image fills it.
#[derive(Debug, Clone)]
pub struct Thumbnail {
    href: String,
    src: String,
    rect: Rect,
    classes: Vec<String>,
    caption: Option<String>,
    content: Option<(String, bool)>,
}

impl Thumbnail {
    /// A `.lighthouse` container linking `href` from a thumbnail at `src`.
    pub fn new(href: impl Into<String>, src: impl Into<String>, rect: Rect) -> Self {
        Self {
            href: href.into(),
            src: src.into(),
            rect,
            classes: vec!["lighthouse".to_string()],
            caption: None,
            content: None,
        }
    }

    /// Add a container class such as `html` (builder).
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Add a caption paragraph after the anchor (builder).
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Add a static `.content` child holding `text` (builder).
    pub fn with_content(mut self, text: impl Into<String>, visible: bool) -> Self {
        self.content = Some((text.into(), visible));
        self
    }

    /// Insert the container under `parent`. Returns `(container, thumbnail)`,
    /// or `None` if `parent` is not in `dom`.
    pub fn build(self, dom: &mut Dom, parent: NodeId) -> Option<(NodeId, NodeId)> {
        let container = dom
            .insert_child(
                parent,
                NodeData::new("div")
                    .with_classes(self.classes)
                    .with_layout(self.rect),
            )?;
        let anchor = dom
            .insert_child(container, NodeData::new("a").with_attr("href", self.href))?;
        let thumb = dom
            .insert_child(
                anchor,
                NodeData::new("img")
                    .with_attr("src", self.src)
                    .with_layout(self.rect),
            )?;
        if let Some(caption) = self.caption {
            dom.insert_child(container, NodeData::new("p").with_text(caption));
        }
        if let Some((text, visible)) = self.content {
            let mut content = NodeData::new("div").with_class("content");
            content.visible = visible;
            if let Some(child) = dom.insert_child(container, content) {
                dom.insert_child(child, NodeData::new("p").with_text(text));
            }
        }
        Some((container, thumb))
    }
}
