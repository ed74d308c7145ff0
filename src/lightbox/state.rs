//! Per-container state machine.

use std::collections::HashSet;
use std::fmt;

use super::config::ContentType;
use super::LightboxId;
use crate::animate::AnimationId;
use crate::dom::node::NodeId;

/// Where a container is in its open/close cycle.
///
/// ```text
/// Closed --open--> Opening --animations done--> Open
///    ^                                            |
///    +---- animations done <-- Closing <--close---+
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

impl Phase {
    /// Whether a transition is running.
    pub fn is_transitioning(self) -> bool {
        matches!(self, Self::Opening | Self::Closing)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Opening => "opening",
            Self::Open => "open",
            Self::Closing => "closing",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bookkeeping for one container.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContainerState {
    pub phase: Phase,
    /// Content type used by the current (or last) activation.
    pub content_type: ContentType,
    /// Child-content element in use.
    pub child: Option<NodeId>,
    /// Whether `child` was created by the controller and must be removed on close.
    pub created_child: bool,
    /// Background and close control inserted by the current activation.
    pub controls: Vec<NodeId>,
    /// Animations the current transition is waiting on.
    pub pending: HashSet<AnimationId>,
}

impl ContainerState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Notifications produced when a transition finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxEvent {
    Opened { lightbox: LightboxId, container: NodeId },
    Closed { lightbox: LightboxId, container: NodeId },
}

impl LightboxEvent {
    pub fn container(&self) -> NodeId {
        match *self {
            Self::Opened { container, .. } | Self::Closed { container, .. } => container,
        }
    }

    pub fn lightbox(&self) -> LightboxId {
        match *self {
            Self::Opened { lightbox, .. } | Self::Closed { lightbox, .. } => lightbox,
        }
    }
}
