//! Image metadata: natural size, aspect ratio, orientation.

use std::fmt;

/// Natural pixel dimensions of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Coarse shape of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Wider than tall.
    Landscape,
    /// Taller than wide.
    Portrait,
    /// Exactly as wide as tall.
    Square,
}

impl Orientation {
    /// Classify by comparing integer dimensions.
    ///
    /// Comparing the integers rather than the floating-point ratio keeps the
    /// tie exact: equal sides are always `Square`.
    pub fn classify(width: u32, height: u32) -> Self {
        match width.cmp(&height) {
            std::cmp::Ordering::Greater => Self::Landscape,
            std::cmp::Ordering::Less => Self::Portrait,
            std::cmp::Ordering::Equal => Self::Square,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Landscape => "landscape",
            Self::Portrait => "portrait",
            Self::Square => "square",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata attached to an element once its image has been preloaded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaMetadata {
    pub natural_width: u32,
    pub natural_height: u32,
    /// `natural_width / natural_height`, always positive.
    pub aspect_ratio: f64,
    pub orientation: Orientation,
}

impl MediaMetadata {
    /// Build metadata from decoded dimensions.
    ///
    /// Returns `None` for a zero-sized image, which has no meaningful ratio.
    pub fn from_dimensions(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self {
            natural_width: width,
            natural_height: height,
            aspect_ratio: f64::from(width) / f64::from(height),
            orientation: Orientation::classify(width, height),
        })
    }

    pub fn dimensions(&self) -> ImageDimensions {
        ImageDimensions::new(self.natural_width, self.natural_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_is_total() {
        for (w, h) in [(1, 1), (2, 1), (1, 2), (1600, 1200), (1200, 1600), (u32::MAX, u32::MAX)] {
            let expected = if w > h {
                Orientation::Landscape
            } else if w < h {
                Orientation::Portrait
            } else {
                Orientation::Square
            };
            assert_eq!(Orientation::classify(w, h), expected, "{w}x{h}");
        }
    }

    #[test]
    fn equal_sides_are_square() {
        let meta = MediaMetadata::from_dimensions(800, 800).unwrap();
        assert_eq!(meta.orientation, Orientation::Square);
        assert_eq!(meta.aspect_ratio, 1.0);
    }

    #[test]
    fn near_square_is_not_square() {
        assert_eq!(Orientation::classify(1001, 1000), Orientation::Landscape);
        assert_eq!(Orientation::classify(1000, 1001), Orientation::Portrait);
    }

    #[test]
    fn landscape_metadata() {
        let meta = MediaMetadata::from_dimensions(1600, 1200).unwrap();
        assert_eq!(meta.orientation, Orientation::Landscape);
        assert!((meta.aspect_ratio - 4.0 / 3.0).abs() < 1e-12);
        assert_eq!(meta.dimensions(), ImageDimensions::new(1600, 1200));
    }

    #[test]
    fn zero_sized_has_no_metadata() {
        assert!(MediaMetadata::from_dimensions(0, 10).is_none());
        assert!(MediaMetadata::from_dimensions(10, 0).is_none());
    }

    #[test]
    fn orientation_display() {
        assert_eq!(Orientation::Portrait.to_string(), "portrait");
        assert_eq!(Orientation::Square.as_str(), "square");
    }
}
