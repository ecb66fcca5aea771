//! Precomputed curved connectors between segments.

use crate::core::math::polyline_length;
use crate::core::Point2D;

use super::segment::SegmentId;

/// Stable index of a transition within its [`CourseNetwork`](super::CourseNetwork).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TransitionId(pub(crate) usize);

impl TransitionId {
    /// Index into the network's transition arena.
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A precomputed curved connector between two segments.
///
/// The path polyline starts on the `source` segment and ends on the
/// `target` segment. Traversing it first-to-last leaves `source`
/// driving forward; last-to-first leaves `target` driving in reverse.
#[derive(Clone, Debug)]
pub struct Transition {
    /// Segment the curve departs when traversed first-to-last.
    pub source: SegmentId,
    /// Segment the curve enters when traversed first-to-last.
    pub target: SegmentId,
    path: Vec<Point2D>,
    arc_length: f32,
}

impl Transition {
    pub(super) fn new(source: SegmentId, target: SegmentId, path: Vec<Point2D>) -> Self {
        assert!(!path.is_empty(), "transition path must not be empty");
        let arc_length = polyline_length(&path);
        Self {
            source,
            target,
            path,
            arc_length,
        }
    }

    /// The curve polyline.
    #[inline]
    pub fn path(&self) -> &[Point2D] {
        &self.path
    }

    /// First path point (lies on the source segment).
    #[inline]
    pub fn first(&self) -> Point2D {
        self.path[0]
    }

    /// Last path point (lies on the target segment).
    #[inline]
    pub fn last(&self) -> Point2D {
        self.path[self.path.len() - 1]
    }

    /// Euclidean length along the path polyline.
    #[inline]
    pub fn arc_length(&self) -> f32 {
        self.arc_length
    }
}
