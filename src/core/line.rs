//! Straight line segment with endpoint representation.

use super::point::Point2D;
use serde::{Deserialize, Serialize};

/// A 2D line segment defined by its endpoints.
///
/// The declared direction of the line runs from `start` to `end`; a
/// vehicle whose motion along the line agrees with that direction is
/// driving "forward" on it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Line2D {
    /// Start point of the line segment.
    pub start: Point2D,
    /// End point of the line segment.
    pub end: Point2D,
}

impl Line2D {
    /// Create a new line segment from two points.
    #[inline]
    pub fn new(start: Point2D, end: Point2D) -> Self {
        Self { start, end }
    }

    /// Direction vector from start to end (not normalized).
    #[inline]
    pub fn direction(&self) -> Point2D {
        self.end - self.start
    }

    /// Length of the line segment.
    #[inline]
    pub fn length(&self) -> f32 {
        self.direction().length()
    }

    /// Heading of the declared direction (radians, CCW from +X).
    #[inline]
    pub fn heading(&self) -> f32 {
        self.direction().heading()
    }

    /// Nearest point of the segment to `p`.
    ///
    /// Orthogonal projection onto the carrier line with the parameter
    /// clamped to the segment extent, so the result is always a point
    /// of the segment. Degenerate segments return `start`.
    pub fn nearest_point_to(&self, p: Point2D) -> Point2D {
        let dir = self.direction();
        let len_sq = dir.length_squared();
        if len_sq <= f32::EPSILON {
            return self.start;
        }
        let rel = p - self.start;
        let t = (rel.dot(&dir) / len_sq).clamp(0.0, 1.0);
        self.start + dir * t
    }

    /// Distance from `p` to the nearest point of the segment.
    #[inline]
    pub fn distance_to(&self, p: Point2D) -> f32 {
        self.nearest_point_to(p).distance(&p)
    }
}
