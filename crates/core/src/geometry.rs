//! Axis-aligned rectangles in unscaled document coordinates.

use std::fmt;

use crate::error::{AnalysisError, Result};

/// An axis-aligned integer rectangle `(x0, y0)-(x1, y1)` with `(x0, y0)` the
/// top-left corner. The invariant `x0 <= x1 && y0 <= y1` holds for every
/// constructed value; width and height are always derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl BoundingBox {
    /// Creates a bounding box, rejecting inverted corners.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Result<Self> {
        if x0 > x1 || y0 > y1 {
            return Err(AnalysisError::InvalidBox { x0, y0, x1, y1 });
        }
        Ok(Self { x0, y0, x1, y1 })
    }

    pub fn width(&self) -> i32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> i32 {
        self.y1 - self.y0
    }

    pub fn area(&self) -> i64 {
        self.width() as i64 * self.height() as i64
    }

    /// Center point of the box.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.x0 + self.x1) as f64 / 2.0,
            (self.y0 + self.y1) as f64 / 2.0,
        )
    }

    /// Grows the box by `margin` on every side.
    ///
    /// `margin` must be non-negative; shrinking is not an expansion.
    pub fn expand(&self, margin: i32) -> Self {
        debug_assert!(margin >= 0, "expand margin must be non-negative");
        Self {
            x0: self.x0 - margin,
            y0: self.y0 - margin,
            x1: self.x1 + margin,
            y1: self.y1 + margin,
        }
    }

    /// Grows the box by a fraction of its own width and height on every side.
    /// `ratio = 0.1` widens by 10% of the width on the left and on the right.
    pub fn expand_by_ratio(&self, ratio: f64) -> Self {
        debug_assert!(ratio >= 0.0, "expand ratio must be non-negative");
        let dx = (self.width() as f64 * ratio) as i32;
        let dy = (self.height() as f64 * ratio) as i32;
        Self {
            x0: self.x0 - dx,
            y0: self.y0 - dy,
            x1: self.x1 + dx,
            y1: self.y1 + dy,
        }
    }

    /// True when the two boxes share at least a boundary point.
    pub fn intersects(&self, other: &Self) -> bool {
        self.x0 <= other.x1 && other.x0 <= self.x1 && self.y0 <= other.y1 && other.y0 <= self.y1
    }

    /// True when the two boxes share interior area (touching edges do not
    /// count).
    pub fn overlaps(&self, other: &Self) -> bool {
        self.x0 < other.x1 && other.x0 < self.x1 && self.y0 < other.y1 && other.y0 < self.y1
    }

    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        self.x0 <= x && x <= self.x1 && self.y0 <= y && y <= self.y1
    }

    /// Smallest box covering both boxes.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Overlapping region of the two boxes, if any.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let x0 = self.x0.max(other.x0);
        let y0 = self.y0.max(other.y0);
        let x1 = self.x1.min(other.x1);
        let y1 = self.y1.min(other.y1);
        if x0 > x1 || y0 > y1 {
            return None;
        }
        Some(Self { x0, y0, x1, y1 })
    }

    /// Clamps the box into `bounds`. A box disjoint from `bounds` collapses
    /// to the nearest edge rather than inverting.
    pub fn clamp_to(&self, bounds: &Self) -> Self {
        let x0 = self.x0.clamp(bounds.x0, bounds.x1);
        let y0 = self.y0.clamp(bounds.y0, bounds.y1);
        let x1 = self.x1.clamp(bounds.x0, bounds.x1);
        let y1 = self.y1.clamp(bounds.y0, bounds.y1);
        Self {
            x0,
            y0,
            x1: x1.max(x0),
            y1: y1.max(y0),
        }
    }

    /// True when `other` lies entirely inside this box.
    pub fn contains(&self, other: &Self) -> bool {
        self.x0 <= other.x0 && self.y0 <= other.y0 && other.x1 <= self.x1 && other.y1 <= self.y1
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})-({},{})", self.x0, self.y0, self.x1, self.y1)
    }
}
