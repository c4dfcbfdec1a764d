//! Axis-aligned rectangle primitives.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tolerance used when comparing rectangle edges for adjacency.
pub const EDGE_EPSILON: f64 = 1e-9;

/// An axis-aligned rectangle with a top-left origin.
///
/// Used both for unoccupied page regions and for the footprint of placed
/// items.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FreeRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub w: f64,
    /// Height.
    pub h: f64,
}

impl FreeRect {
    /// Creates a new rectangle.
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Returns the right edge.
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    /// Returns the bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// Returns the area.
    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    /// Returns true if a `width` x `height` box fits without rotation.
    pub fn fits(&self, width: f64, height: f64) -> bool {
        width <= self.w && height <= self.h
    }

    /// Returns true if the interiors of the two rectangles intersect.
    ///
    /// Rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &FreeRect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Returns true if `other` lies entirely inside this rectangle.
    pub fn contains_rect(&self, other: &FreeRect) -> bool {
        other.x >= self.x - EDGE_EPSILON
            && other.y >= self.y - EDGE_EPSILON
            && other.right() <= self.right() + EDGE_EPSILON
            && other.bottom() <= self.bottom() + EDGE_EPSILON
    }

    /// Merges `other` into this rectangle if they share one full edge.
    ///
    /// Returns the combined rectangle, or `None` if the two are not exactly
    /// edge-adjacent with matching extents.
    pub fn union_if_adjacent(&self, other: &FreeRect) -> Option<FreeRect> {
        let same_column = close(self.x, other.x) && close(self.w, other.w);
        if same_column {
            if close(self.bottom(), other.y) {
                return Some(FreeRect::new(self.x, self.y, self.w, self.h + other.h));
            }
            if close(other.bottom(), self.y) {
                return Some(FreeRect::new(self.x, other.y, self.w, self.h + other.h));
            }
        }

        let same_row = close(self.y, other.y) && close(self.h, other.h);
        if same_row {
            if close(self.right(), other.x) {
                return Some(FreeRect::new(self.x, self.y, self.w + other.w, self.h));
            }
            if close(other.right(), self.x) {
                return Some(FreeRect::new(other.x, self.y, self.w + other.w, self.h));
            }
        }

        None
    }
}

#[inline]
fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= EDGE_EPSILON
}
