//! Tween descriptions: which node, which properties, how long.

use std::time::Duration;

use super::easing::Easing;
use crate::css::scalar::Scalar;
use crate::css::style::StyleProperty;
use crate::dom::node::NodeId;

/// A request to animate style properties of one node to target values.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub node: NodeId,
    pub duration: Duration,
    pub targets: Vec<(StyleProperty, Scalar)>,
    pub easing: Easing,
    /// Make the node visible when the tween starts.
    pub show_on_start: bool,
    /// Hide the node when the tween finishes.
    pub hide_on_finish: bool,
}

impl Tween {
    pub fn new(node: NodeId, duration: Duration) -> Self {
        Self {
            node,
            duration,
            targets: Vec::new(),
            easing: Easing::default(),
            show_on_start: false,
            hide_on_finish: false,
        }
    }

    /// A fade from the current opacity to fully opaque, showing the node.
    pub fn fade_in(node: NodeId, duration: Duration) -> Self {
        Self::new(node, duration)
            .to(StyleProperty::Opacity, Scalar::number(1.0))
            .show_on_start()
    }

    /// A fade to fully transparent, hiding the node at the end.
    pub fn fade_out(node: NodeId, duration: Duration) -> Self {
        Self::new(node, duration)
            .to(StyleProperty::Opacity, Scalar::number(0.0))
            .hide_on_finish()
    }

    /// Add a target value (builder).
    pub fn to(mut self, property: StyleProperty, value: Scalar) -> Self {
        self.targets.push((property, value));
        self
    }

    /// Set the easing curve (builder).
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Show the node when the tween starts (builder).
    pub fn show_on_start(mut self) -> Self {
        self.show_on_start = true;
        self
    }

    /// Hide the node when the tween finishes (builder).
    pub fn hide_on_finish(mut self) -> Self {
        self.hide_on_finish = true;
        self
    }
}
