//! Inline style: the numeric/keyword properties the lightbox writes and tweens.

use std::collections::BTreeMap;
use std::fmt;

use crate::css::scalar::Scalar;

/// Which viewport dimension a percentage of this property refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
    /// Unitless property; percentages are meaningless.
    None,
}

/// A style property that can be set inline and animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StyleProperty {
    Left,
    Top,
    Width,
    Height,
    MarginLeft,
    MarginTop,
    Opacity,
}

impl StyleProperty {
    /// The CSS property name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Top => "top",
            Self::Width => "width",
            Self::Height => "height",
            Self::MarginLeft => "margin-left",
            Self::MarginTop => "margin-top",
            Self::Opacity => "opacity",
        }
    }

    /// The reference axis for percentage values.
    ///
    /// Margins resolve against the containing block's width, as in CSS.
    pub fn axis(self) -> Axis {
        match self {
            Self::Left | Self::Width | Self::MarginLeft | Self::MarginTop => Axis::Horizontal,
            Self::Top | Self::Height => Axis::Vertical,
            Self::Opacity => Axis::None,
        }
    }

    /// The value used when the property has not been set.
    pub fn initial(self) -> Scalar {
        match self {
            Self::Opacity => Scalar::number(1.0),
            Self::Width | Self::Height => Scalar::auto(),
            _ => Scalar::ZERO,
        }
    }
}

impl fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An element's inline style declarations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InlineStyle {
    values: BTreeMap<StyleProperty, Scalar>,
}

impl InlineStyle {
    /// Create an empty style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property, replacing any previous value.
    pub fn set(&mut self, property: StyleProperty, value: Scalar) {
        self.values.insert(property, value);
    }

    /// Set several properties at once.
    pub fn extend(&mut self, values: impl IntoIterator<Item = (StyleProperty, Scalar)>) {
        self.values.extend(values);
    }

    /// The explicitly set value of a property.
    pub fn get(&self, property: StyleProperty) -> Option<Scalar> {
        self.values.get(&property).copied()
    }

    /// The set value, or the property's initial value.
    pub fn get_or_initial(&self, property: StyleProperty) -> Scalar {
        self.get(property).unwrap_or_else(|| property.initial())
    }

    /// Remove a property. Returns the previous value.
    pub fn remove(&mut self, property: StyleProperty) -> Option<Scalar> {
        self.values.remove(&property)
    }

    /// Whether no properties are set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over set properties in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = (StyleProperty, Scalar)> + '_ {
        self.values.iter().map(|(p, v)| (*p, *v))
    }
}

impl fmt::Display for InlineStyle {
    /// Serialize as a `style` attribute value: `left: 40px; top: 40px`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (property, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{property}: {value}")?;
        }
        Ok(())
    }
}
