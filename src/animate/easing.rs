//! Easing curves mapping linear progress to eased progress.

use std::f32::consts::PI;

/// Easing function for tweens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Slow at both ends: `0.5 - cos(t * PI) / 2`.
    #[default]
    Swing,
}

impl Easing {
    /// Apply the curve to progress `t`, clamped to `0.0..=1.0`.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Swing => 0.5 - (t * PI).cos() / 2.0,
        }
    }
}
