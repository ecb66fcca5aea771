//! The immutable course network.

use log::debug;

use crate::core::math::angle_diff;
use crate::core::{Line2D, Point2D, Pose2D};
use std::f32::consts::PI;

use super::segment::{Segment, SegmentId};
use super::transition::{Transition, TransitionId};

/// A road-network-like graph of straight segments connected by curved
/// transitions.
///
/// Built once by an external course generator, then treated as
/// immutable for the planner's lifetime.
#[derive(Clone, Debug, Default)]
pub struct CourseNetwork {
    segments: Vec<Segment>,
    transitions: Vec<Transition>,
}

impl CourseNetwork {
    /// Create an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a segment and return its id.
    pub fn add_segment(&mut self, line: Line2D) -> SegmentId {
        let id = SegmentId(self.segments.len());
        self.segments.push(Segment::new(line));
        id
    }

    /// Add a transition curve from `source` to `target` and return its id.
    ///
    /// The curve is registered with both endpoints: it appears in the
    /// source's forward list (leave `source` driving forward) and in
    /// the target's backward list (leave `target` by traversing the
    /// arc in reverse).
    pub fn add_transition(
        &mut self,
        source: SegmentId,
        target: SegmentId,
        path: Vec<Point2D>,
    ) -> TransitionId {
        let id = TransitionId(self.transitions.len());
        self.transitions.push(Transition::new(source, target, path));
        self.segments[source.0].forward_transitions.push(id);
        self.segments[target.0].backward_transitions.push(id);
        id
    }

    /// Look up a segment.
    #[inline]
    pub fn segment(&self, id: SegmentId) -> &Segment {
        &self.segments[id.0]
    }

    /// Look up a transition.
    #[inline]
    pub fn transition(&self, id: TransitionId) -> &Transition {
        &self.transitions[id.0]
    }

    /// All segments in insertion order.
    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments.
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Number of transitions.
    #[inline]
    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    /// Find the segment closest to `pose`.
    ///
    /// A segment qualifies when the pose position is within
    /// `distance_tolerance` of it and the pose heading is within
    /// `angular_tolerance` of the segment tangent or its opposite
    /// (the vehicle may be facing either way along the segment).
    /// Among qualifying segments the nearest one wins.
    pub fn find_closest_segment(
        &self,
        pose: &Pose2D,
        angular_tolerance: f32,
        distance_tolerance: f32,
    ) -> Option<SegmentId> {
        let mut best: Option<(SegmentId, f32)> = None;

        for (i, segment) in self.segments.iter().enumerate() {
            let distance = segment.line.distance_to(pose.position());
            if distance > distance_tolerance {
                continue;
            }

            let tangent_offset = angle_diff(segment.line.heading(), pose.theta).abs();
            let alignment = tangent_offset.min(PI - tangent_offset);
            if alignment > angular_tolerance {
                continue;
            }

            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((SegmentId(i), distance));
            }
        }

        if best.is_none() {
            debug!(
                "[Course] no segment within {:.2} m / {:.2} rad of ({:.2}, {:.2}, {:.2})",
                distance_tolerance, angular_tolerance, pose.x, pose.y, pose.theta
            );
        }

        best.map(|(id, _)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_8;

    fn two_lane_network() -> CourseNetwork {
        let mut course = CourseNetwork::new();
        let s1 = course.add_segment(Line2D::new(Point2D::new(0.0, 0.0), Point2D::new(5.0, 0.0)));
        let s2 = course.add_segment(Line2D::new(Point2D::new(5.0, 1.0), Point2D::new(10.0, 1.0)));
        course.add_transition(
            s1,
            s2,
            vec![
                Point2D::new(5.0, 0.0),
                Point2D::new(5.0, 0.5),
                Point2D::new(5.0, 1.0),
            ],
        );
        course
    }

    #[test]
    fn test_transition_registration() {
        let course = two_lane_network();
        let s1 = SegmentId(0);
        let s2 = SegmentId(1);

        assert_eq!(course.segment(s1).forward_transitions.len(), 1);
        assert_eq!(course.segment(s1).backward_transitions.len(), 0);
        assert_eq!(course.segment(s2).forward_transitions.len(), 0);
        assert_eq!(course.segment(s2).backward_transitions.len(), 1);
    }

    #[test]
    fn test_arc_length() {
        let course = two_lane_network();
        assert_relative_eq!(course.transition(TransitionId(0)).arc_length(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_find_closest_segment_picks_nearest() {
        let course = two_lane_network();
        let id = course.find_closest_segment(&Pose2D::new(2.0, 0.1, 0.0), FRAC_PI_8, 0.5);
        assert_eq!(id, Some(SegmentId(0)));

        let id = course.find_closest_segment(&Pose2D::new(9.0, 1.1, 0.0), FRAC_PI_8, 0.5);
        assert_eq!(id, Some(SegmentId(1)));
    }

    #[test]
    fn test_find_closest_segment_distance_tolerance() {
        let course = two_lane_network();
        let id = course.find_closest_segment(&Pose2D::new(2.0, 3.0, 0.0), FRAC_PI_8, 0.5);
        assert_eq!(id, None);
    }

    #[test]
    fn test_find_closest_segment_angular_tolerance() {
        let course = two_lane_network();
        // Facing across the segment: rejected
        let id = course.find_closest_segment(
            &Pose2D::new(2.0, 0.0, std::f32::consts::FRAC_PI_2),
            FRAC_PI_8,
            0.5,
        );
        assert_eq!(id, None);

        // Facing against the tangent: accepted, reverse driving is allowed
        let id = course.find_closest_segment(
            &Pose2D::new(2.0, 0.0, std::f32::consts::PI),
            FRAC_PI_8,
            0.5,
        );
        assert_eq!(id, Some(SegmentId(0)));
    }
}
