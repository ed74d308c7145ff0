//! CSS scalar values: Scalar, Unit (px, %, unitless, auto).

use std::fmt;

/// A CSS unit type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Absolute CSS pixels.
    Px,
    /// Percentage of a reference length (the viewport for fixed overlays).
    Percent,
    /// A bare number, e.g. opacity.
    Number,
    /// Automatic sizing.
    Auto,
}

/// A scalar value with a unit, e.g. `40px`, `100%`, `0.5`, `auto`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scalar {
    pub value: f32,
    pub unit: Unit,
}

impl Scalar {
    /// Zero pixels.
    pub const ZERO: Scalar = Scalar { value: 0.0, unit: Unit::Px };

    /// Create a scalar in pixels.
    pub fn px(value: f32) -> Self {
        Self { value, unit: Unit::Px }
    }

    /// Create a scalar as a percentage.
    pub fn percent(value: f32) -> Self {
        Self { value, unit: Unit::Percent }
    }

    /// Create a unitless scalar.
    pub fn number(value: f32) -> Self {
        Self { value, unit: Unit::Number }
    }

    /// Create an auto scalar.
    pub fn auto() -> Self {
        Self { value: 0.0, unit: Unit::Auto }
    }

    /// Returns `true` if this scalar is auto-sized.
    pub fn is_auto(&self) -> bool {
        self.unit == Unit::Auto
    }

    /// Resolve to an absolute number.
    ///
    /// Percentages are taken of `reference`. `auto` has no absolute value.
    pub fn resolve(&self, reference: f32) -> Option<f32> {
        match self.unit {
            Unit::Px | Unit::Number => Some(self.value),
            Unit::Percent => Some(self.value / 100.0 * reference),
            Unit::Auto => None,
        }
    }
}

fn write_number(f: &mut fmt::Formatter<'_>, value: f32) -> fmt::Result {
    if value.fract() == 0.0 {
        write!(f, "{}", value as i64)
    } else {
        write!(f, "{value}")
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            Unit::Auto => write!(f, "auto"),
            Unit::Number => write_number(f, self.value),
            Unit::Px => {
                write_number(f, self.value)?;
                f.write_str("px")
            }
            Unit::Percent => {
                write_number(f, self.value)?;
                f.write_str("%")
            }
        }
    }
}
