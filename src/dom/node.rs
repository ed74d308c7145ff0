//! Node types: NodeId, NodeData.

use slotmap::new_key_type;

use crate::css::style::InlineStyle;
use crate::geometry::Rect;
use crate::media::MediaMetadata;

new_key_type! {
    /// Unique identifier for a DOM node. Copy, lightweight (u64).
    pub struct NodeId;
}

/// Data associated with a single DOM element.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    /// Element tag name (e.g. "div", "a", "img").
    pub tag: String,
    /// Optional unique id (CSS #id selector).
    pub id: Option<String>,
    /// CSS classes (for .class selector).
    pub classes: Vec<String>,
    /// Attributes in insertion order (`href`, `src`, ...).
    pub attributes: Vec<(String, String)>,
    /// Text content rendered before the element's children.
    pub text: Option<String>,
    /// Inline style properties.
    pub style: InlineStyle,
    /// Whether this node is displayed. Hidden nodes hide their subtree.
    pub visible: bool,
    /// Rendered box supplied by the host's layout, in viewport pixels.
    pub layout: Option<Rect>,
    /// Preloaded image metadata. Written once, never mutated.
    pub media: Option<MediaMetadata>,
}

impl NodeData {
    /// Create a new visible element with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            classes: Vec::new(),
            attributes: Vec::new(),
            text: None,
            style: InlineStyle::new(),
            visible: true,
            layout: None,
            media: None,
        }
    }

    /// Set the CSS id (builder).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a single CSS class (builder).
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    /// Add multiple CSS classes (builder).
    pub fn with_classes(mut self, classes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        for class in classes {
            self = self.with_class(class);
        }
        self
    }

    /// Set an attribute (builder).
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Set the text content (builder).
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the host-supplied rendered box (builder).
    pub fn with_layout(mut self, layout: Rect) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Start hidden (builder).
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Check whether this node has a given CSS class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a CSS class. No-op if already present.
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_owned());
        }
    }

    /// Remove a CSS class. No-op if not present.
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Look up an attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, keeping its original position if it already exists.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Remove an attribute. Returns the previous value.
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let idx = self.attributes.iter().position(|(n, _)| n == name)?;
        Some(self.attributes.remove(idx).1)
    }

    /// Copy of this node suitable for insertion elsewhere in the tree.
    ///
    /// Markup (tag, id, classes, attributes, text, inline style, visibility)
    /// is kept. Host layout and attached media metadata belong to the original
    /// element and are not copied.
    pub fn clone_markup(&self) -> Self {
        Self {
            layout: None,
            media: None,
            ..self.clone()
        }
    }
}
