//! Page-space geometry
//!
//! Boxes arrive from the upstream extraction engine as `[x0, y0, x1, y1]`
//! corner lists in page units. They are stored as their two defining corners;
//! width and height are derived, never stored.

use serde::{Deserialize, Serialize};

/// A point in page space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
}

impl Coordinates {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle described by its bottom-left and top-right corners
///
/// Degenerate (zero-area) and inverted boxes are kept exactly as supplied.
/// `is_well_formed` reports inversion; nothing here repairs it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Bottom-left corner
    pub bottom_left: Coordinates,
    /// Top-right corner
    pub top_right: Coordinates,
}

impl BoundingBox {
    pub fn new(bottom_left: Coordinates, top_right: Coordinates) -> Self {
        Self {
            bottom_left,
            top_right,
        }
    }

    /// Build from a raw `[x0, y0, x1, y1]` corner list
    pub fn from_corners(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            bottom_left: Coordinates::new(x0, y0),
            top_right: Coordinates::new(x1, y1),
        }
    }

    /// Left edge (x of the bottom-left corner)
    pub fn left(&self) -> f64 {
        self.bottom_left.x
    }

    /// Bottom edge (y of the bottom-left corner)
    pub fn bottom(&self) -> f64 {
        self.bottom_left.y
    }

    /// Horizontal extent; negative when the corners are swapped
    pub fn width(&self) -> f64 {
        self.top_right.x - self.bottom_left.x
    }

    /// Vertical extent; negative when the corners are swapped
    pub fn height(&self) -> f64 {
        self.top_right.y - self.bottom_left.y
    }

    /// False when the corners are swapped on either axis
    pub fn is_well_formed(&self) -> bool {
        self.width() >= 0.0 && self.height() >= 0.0
    }
}
