//! HTML-like serialization of a subtree, used for diagnostics and snapshots.

use std::fmt::Write;

use super::node::NodeId;
use super::tree::Dom;

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &["img", "br", "hr", "input"];

impl Dom {
    /// Serialize the subtree rooted at `id` as markup.
    ///
    /// Hidden elements carry a bare `hidden` attribute. Inline style is
    /// omitted; see [`to_markup_with_style`](Self::to_markup_with_style).
    pub fn to_markup(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_markup(id, false, &mut out);
        out
    }

    /// Like [`to_markup`](Self::to_markup), with a `style` attribute for
    /// elements that have inline style.
    pub fn to_markup_with_style(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_markup(id, true, &mut out);
        out
    }

    fn write_markup(&self, id: NodeId, with_style: bool, out: &mut String) {
        let Some(node) = self.get(id) else {
            return;
        };

        // Writing into a String cannot fail.
        let _ = write!(out, "<{}", node.tag);
        if let Some(node_id) = &node.id {
            let _ = write!(out, " id=\"{}\"", escape(node_id));
        }
        if !node.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape(&node.classes.join(" ")));
        }
        for (name, value) in &node.attributes {
            let _ = write!(out, " {name}=\"{}\"", escape(value));
        }
        if with_style && !node.style.is_empty() {
            let _ = write!(out, " style=\"{}\"", node.style);
        }
        if !node.visible {
            out.push_str(" hidden");
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&node.tag.as_str()) {
            return;
        }

        if let Some(text) = &node.text {
            out.push_str(&escape(text));
        }
        for &child in self.children(id) {
            self.write_markup(child, with_style, out);
        }
        let _ = write!(out, "</{}>", node.tag);
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
