//! Click events and bubble path computation.
//!
//! A click is delivered to its target and then to each ancestor up to the
//! document root. [`bubble_path`] computes that traversal order;
//! [`ClickEvent`] carries the per-click state handlers may change.

use crate::dom::node::NodeId;
use crate::dom::tree::Dom;

// ---------------------------------------------------------------------------
// ClickEvent
// ---------------------------------------------------------------------------

/// A single click as seen by handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickEvent {
    /// The element the click originated on.
    pub target: NodeId,
    /// Whether a handler suppressed the default action (following a link).
    pub default_prevented: bool,
    /// Number of handlers that ran.
    pub handled: usize,
}

impl ClickEvent {
    pub fn new(target: NodeId) -> Self {
        Self {
            target,
            default_prevented: false,
            handled: 0,
        }
    }

    /// Suppress the default action.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}

// ---------------------------------------------------------------------------
// Bubble path
// ---------------------------------------------------------------------------

/// Compute the bubble path from `start` up to the root (inclusive).
///
/// Returns `[start, parent, grandparent, ..., root]`.
/// If `start` does not exist in the DOM, returns an empty vec.
pub fn bubble_path(dom: &Dom, start: NodeId) -> Vec<NodeId> {
    if !dom.contains(start) {
        return Vec::new();
    }
    let mut path = vec![start];
    path.extend(dom.ancestors(start));
    path
}

// ===========================================================================
// Tests
// ===========================================================================
