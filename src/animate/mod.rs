//! Tween engine: eased interpolation of inline style properties over time.

pub mod animator;
pub mod easing;
pub mod tween;

pub use animator::{AnimationId, Animator};
pub use easing::Easing;
pub use tween::Tween;
