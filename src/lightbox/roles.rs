//! Role resolution: which elements of a container play which part.
//!
//! Roles are looked up fresh on every activation; nothing is cached between
//! clicks, so host mutations of the container are always seen.

use super::config::{CompiledConfig, ContentType};
use crate::css::model::SelectorList;
use crate::dom::node::{NodeData, NodeId};
use crate::dom::tree::Dom;

/// The role elements of one container at one moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Roles {
    pub container: NodeId,
    /// Direct child matching the anchor selector.
    pub anchor: Option<NodeId>,
    /// Thumbnail image inside an anchor.
    pub image: Option<NodeId>,
    /// Direct child matching the child-content selector.
    pub child: Option<NodeId>,
    pub child_anchor: Option<NodeId>,
    pub child_image: Option<NodeId>,
    pub close: Option<NodeId>,
    pub background: Option<NodeId>,
    pub content_type: ContentType,
}

impl Roles {
    pub fn resolve(dom: &Dom, container: NodeId, config: &CompiledConfig) -> Self {
        Self {
            container,
            anchor: dom.first_child_matching(container, &config.anchor),
            image: dom.find_nested(container, &[&config.anchor, &config.image]),
            child: dom.first_child_matching(container, &config.child),
            child_anchor: dom.find_nested(container, &[&config.child, &config.child_anchor]),
            child_image: dom.find_nested(
                container,
                &[&config.child, &config.child_anchor, &config.child_image],
            ),
            close: dom.find_first(container, &config.close),
            background: dom.find_first(container, &config.background),
            content_type: content_type(dom, container, config.content_type),
        }
    }

    /// Use `child` as the child-content element and resolve its inner roles
    /// within it.
    pub fn with_child(mut self, dom: &Dom, config: &CompiledConfig, child: NodeId) -> Self {
        self.child = Some(child);
        self.child_anchor = dom.find_first(child, &config.child_anchor);
        self.child_image = dom.find_nested(child, &[&config.child_anchor, &config.child_image]);
        self
    }
}

/// A container's `image`/`html` class overrides the configured default.
pub fn content_type(dom: &Dom, container: NodeId, default: ContentType) -> ContentType {
    let Some(node) = dom.get(container) else {
        return default;
    };
    if node.has_class(ContentType::Image.class_name()) {
        ContentType::Image
    } else if node.has_class(ContentType::Html.class_name()) {
        ContentType::Html
    } else {
        default
    }
}

/// A new element shaped after the subject of `selector`.
///
/// The subject's type, id and classes are copied; `default_tag` is used when
/// the selector names no type.
pub fn element_for(selector: &SelectorList, default_tag: &str) -> NodeData {
    let mut data = NodeData::new(default_tag);
    let Some(subject) = selector.subject() else {
        return data;
    };
    if let Some(tag) = subject.tag() {
        data.tag = tag.to_ascii_lowercase();
    }
    data.id = subject.id().map(str::to_owned);
    for class in subject.classes() {
        data.add_class(class);
    }
    data
}
