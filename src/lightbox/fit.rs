//! Fit geometry: placing a fixed-aspect image inside the expanded frame.

use crate::css::scalar::Scalar;
use crate::css::style::{InlineStyle, StyleProperty};
use crate::geometry::Size;
use crate::media::metadata::{MediaMetadata, Orientation};

/// Inline placement of the child image inside its frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub left: Scalar,
    pub top: Scalar,
    pub width: Scalar,
    pub height: Scalar,
    pub margin_left: Scalar,
    pub margin_top: Scalar,
}

impl Placement {
    /// Fill the frame, ignoring the aspect ratio.
    pub fn stretch() -> Self {
        Self {
            left: Scalar::ZERO,
            top: Scalar::ZERO,
            width: Scalar::percent(100.0),
            height: Scalar::percent(100.0),
            margin_left: Scalar::ZERO,
            margin_top: Scalar::ZERO,
        }
    }

    /// Write the placement into an inline style.
    pub fn apply(&self, style: &mut InlineStyle) {
        style.extend([
            (StyleProperty::Left, self.left),
            (StyleProperty::Top, self.top),
            (StyleProperty::Width, self.width),
            (StyleProperty::Height, self.height),
            (StyleProperty::MarginLeft, self.margin_left),
            (StyleProperty::MarginTop, self.margin_top),
        ]);
    }
}

/// Place an image in a frame of the given size.
///
/// Landscape images span the width and are offset horizontally by half of
/// their scaled width; portrait images span the height and are offset
/// vertically. Square images get both rules. Without metadata the image is
/// stretched.
pub fn fit_image(frame: Size, meta: Option<&MediaMetadata>) -> Placement {
    let Some(meta) = meta else {
        return Placement::stretch();
    };
    let ratio = meta.aspect_ratio as f32;
    let orientation = meta.orientation;

    let mut placement = Placement::stretch();
    if orientation != Orientation::Portrait {
        placement.margin_left = Scalar::px(-(frame.width * ratio) / 2.0);
        placement.left = Scalar::percent(50.0);
        placement.width = Scalar::percent(100.0);
    }
    if orientation != Orientation::Landscape {
        placement.margin_top = Scalar::px(-(frame.height / ratio) / 2.0);
        placement.top = Scalar::percent(50.0);
        placement.height = Scalar::percent(100.0);
    }
    match orientation {
        Orientation::Portrait => {
            placement.left = Scalar::ZERO;
            placement.width = Scalar::auto();
            placement.margin_left = Scalar::ZERO;
        }
        Orientation::Landscape => {
            placement.top = Scalar::ZERO;
            placement.height = Scalar::auto();
            placement.margin_top = Scalar::ZERO;
        }
        Orientation::Square => {}
    }
    placement
}
