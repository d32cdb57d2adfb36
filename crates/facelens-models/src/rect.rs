//! Face rectangles in both coordinate conventions.
//!
//! The detection service reports faces as `(top, right, bottom, left)`
//! pixel offsets; the command surface returns `(left, top, width, height)`
//! rectangles normalized to the image size. [`BoundingBox::from_location`]
//! is the only conversion between the two.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A face rectangle as produced by the detection service, in
/// `(top, right, bottom, left)` pixel offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FaceLocation {
    /// Distance from the top edge of the image to the top of the face (pixels)
    pub top: u32,
    /// Distance from the left edge of the image to the right of the face (pixels)
    pub right: u32,
    /// Distance from the top edge of the image to the bottom of the face (pixels)
    pub bottom: u32,
    /// Distance from the left edge of the image to the left of the face (pixels)
    pub left: u32,
}

impl FaceLocation {
    /// Create a new face location.
    pub fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// A normalized rectangle (0.0 to 1.0) representing a relative region of an image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BoundingBox {
    /// X coordinate of the top-left corner (0.0 = left, 1.0 = right)
    pub left: f64,
    /// Y coordinate of the top-left corner (0.0 = top, 1.0 = bottom)
    pub top: f64,
    /// Width of the rectangle (0.0 to 1.0)
    pub width: f64,
    /// Height of the rectangle (0.0 to 1.0)
    pub height: f64,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Convert a detector face location into a normalized bounding box.
    ///
    /// Divides each edge by the image dimension and reshapes the result to
    /// top-left corner plus extent. No rounding or clamping is applied: a
    /// location outside the image bounds produces coordinates outside
    /// `[0, 1]`. The caller guarantees positive image dimensions.
    pub fn from_location(location: &FaceLocation, image_width: u32, image_height: u32) -> Self {
        let w = image_width as f64;
        let h = image_height as f64;

        let left = location.left as f64 / w;
        let top = location.top as f64 / h;
        let right = location.right as f64 / w;
        let bottom = location.bottom as f64 / h;

        Self {
            left,
            top,
            width: right - left,
            height: bottom - top,
        }
    }

    /// Check if the rectangle lies within the normalized 0.0-1.0 range.
    pub fn is_normalized(&self) -> bool {
        self.left >= 0.0
            && self.top >= 0.0
            && self.width >= 0.0
            && self.height >= 0.0
            && self.left + self.width <= 1.001 // Allow small epsilon for float precision
            && self.top + self.height <= 1.001
    }
}
