//! Rotation-aware mapping between page space and viewport space.
//!
//! All rotation reasoning happens on the unit square: a pixel rectangle is
//! normalized to viewport-relative ratios, its corners are rotated by whole
//! quarter turns, the axis-aligned bounding box of the rotated corners is
//! taken, and the result is scaled into the target space. Because rotations
//! are multiples of 90 degrees, corners map exactly onto corners and the
//! bounding box is exact, not an approximation.

use crate::geometry::{Point, Rect};
use crate::overlay::Rotation;
use serde::{Deserialize, Serialize};

/// Pixel dimensions of the viewer surface a rectangle was measured in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    /// Width in pixels
    pub width: f32,
    /// Height in pixels
    pub height: f32,
}

impl Viewport {
    /// Create a viewport.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when the viewport cannot normalize a rectangle.
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }
}

/// Rotate a point on the unit square by whole quarter turns.
///
/// # Examples
///
/// ```
/// use pdf_retouch::geometry::Point;
/// use pdf_retouch::overlay::rotate_unit_point;
///
/// let p = Point::new(0.25, 0.5);
/// let r = rotate_unit_point(p, 1);
/// assert_eq!(r.x, 0.5);
/// assert_eq!(r.y, 0.25);
/// ```
pub fn rotate_unit_point(p: Point, steps: u8) -> Point {
    match steps % 4 {
        1 => Point::new(1.0 - p.y, p.x),
        2 => Point::new(1.0 - p.x, 1.0 - p.y),
        3 => Point::new(p.y, 1.0 - p.x),
        _ => p,
    }
}

/// A rectangle in viewport-relative ratio space (`[0, 1]` on both axes).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioRect {
    /// Left edge as a fraction of the viewport width
    pub left: f32,
    /// Top edge as a fraction of the viewport height
    pub top: f32,
    /// Width fraction
    pub width: f32,
    /// Height fraction
    pub height: f32,
}

impl RatioRect {
    /// Normalize a pixel rectangle against its viewport.
    pub fn from_pixels(rect: Rect, viewport: Viewport) -> Self {
        Self {
            left: rect.x / viewport.width,
            top: rect.y / viewport.height,
            width: rect.width / viewport.width,
            height: rect.height / viewport.height,
        }
    }

    /// Scale back to a pixel rectangle in a space of the given dimensions.
    ///
    /// The target need not be the capture viewport; replay scales into the
    /// page's intrinsic dimensions.
    pub fn to_pixels(self, width: f32, height: f32) -> Rect {
        Rect::new(
            self.left * width,
            self.top * height,
            self.width * width,
            self.height * height,
        )
    }

    /// Rotate by whole quarter turns and re-bound.
    ///
    /// The four corners are rotated individually; the result is their
    /// axis-aligned bounding box, which for quarter turns is exact.
    pub fn rotated(self, rotation: Rotation) -> Self {
        let corners = [
            Point::new(self.left, self.top),
            Point::new(self.left + self.width, self.top),
            Point::new(self.left, self.top + self.height),
            Point::new(self.left + self.width, self.top + self.height),
        ];

        let mut min_x = f32::INFINITY;
        let mut min_y = f32::INFINITY;
        let mut max_x = f32::NEG_INFINITY;
        let mut max_y = f32::NEG_INFINITY;
        for corner in corners {
            let p = rotate_unit_point(corner, rotation.steps());
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        Self {
            left: min_x,
            top: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }
}
