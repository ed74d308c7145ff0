//! Rendered boxes, viewport and visibility.
//!
//! Layout itself is the host's job: it reports each element's rendered box
//! with [`Dom::set_layout`]. Elements the lightbox positions itself (the
//! expanded overlay) have no host box; theirs is derived from their inline
//! `left`/`top`/`width`/`height`, resolved against the viewport like a
//! `position: fixed` element.

use super::node::NodeId;
use super::tree::Dom;
use crate::css::style::{Axis, StyleProperty};
use crate::geometry::{Rect, Size};

impl Dom {
    /// The viewport size in pixels.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Update the viewport size.
    pub fn set_viewport(&mut self, size: Size) {
        self.viewport = size;
    }

    /// Record the host-computed rendered box of an element.
    pub fn set_layout(&mut self, id: NodeId, rect: Rect) {
        if let Some(node) = self.get_mut(id) {
            node.layout = Some(rect);
        }
    }

    /// Show or hide an element.
    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        if let Some(node) = self.get_mut(id) {
            node.visible = visible;
        }
    }

    /// Whether the element and all of its ancestors are displayed.
    ///
    /// Removed elements are not visible.
    pub fn is_visible(&self, id: NodeId) -> bool {
        let Some(node) = self.get(id) else {
            return false;
        };
        node.visible
            && self
                .ancestors(id)
                .into_iter()
                .all(|a| self.get(a).is_some_and(|n| n.visible))
    }

    /// The reference length for percentages along `axis`.
    pub fn reference_length(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.viewport.width,
            Axis::Vertical => self.viewport.height,
            Axis::None => 1.0,
        }
    }

    /// The element's current rendered box.
    ///
    /// Host layout wins; otherwise the box is derived from inline style. Returns
    /// `None` when neither is available.
    pub fn rendered_box(&self, id: NodeId) -> Option<Rect> {
        let node = self.get(id)?;
        if let Some(layout) = node.layout {
            return Some(layout);
        }

        let resolve = |property: StyleProperty| {
            node.style
                .get(property)
                .and_then(|v| v.resolve(self.reference_length(property.axis())))
        };
        let width = resolve(StyleProperty::Width)?;
        let height = resolve(StyleProperty::Height)?;
        Some(Rect::new(
            resolve(StyleProperty::Left).unwrap_or(0.0),
            resolve(StyleProperty::Top).unwrap_or(0.0),
            width,
            height,
        ))
    }

    /// The current absolute value of a style property, for animation.
    ///
    /// `auto` (or an unset width/height) falls back to the rendered box; any
    /// other unresolvable value reads as zero.
    pub fn computed_value(&self, id: NodeId, property: StyleProperty) -> f32 {
        let Some(node) = self.get(id) else {
            return 0.0;
        };
        let value = node.style.get_or_initial(property);
        if let Some(v) = value.resolve(self.reference_length(property.axis())) {
            return v;
        }
        let rendered = node.layout;
        match property {
            StyleProperty::Width => rendered.map_or(0.0, |r| r.width),
            StyleProperty::Height => rendered.map_or(0.0, |r| r.height),
            _ => 0.0,
        }
    }
}
