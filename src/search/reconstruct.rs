//! Pose-sequence reconstruction from a node chain.
//!
//! Walks the best candidate chain head to tail and emits segment
//! anchors, transition arc samples and the short straight maneuvers
//! needed wherever the vehicle has to pivot between forward and
//! reverse motion.

use std::collections::VecDeque;

use log::{debug, trace};

use crate::core::{Point2D, Pose2D};

use super::planner::SearchContext;
use super::types::NodeId;

impl SearchContext<'_> {
    /// First pose of the middle part: the start anchor, oriented along
    /// the start segment.
    pub(super) fn push_first_node(&self, res: &mut Vec<Pose2D>) {
        let yaw = self.course.segment(self.start_segment).line.heading();
        res.push(Pose2D::from_point(self.start_pt, yaw));
    }

    /// Last pose of the middle part: the end anchor, oriented along
    /// the end segment.
    pub(super) fn push_last_node(&self, res: &mut Vec<Pose2D>) {
        let yaw = self.course.segment(self.end_segment).line.heading();
        res.push(Pose2D::from_point(self.end_pt, yaw));
    }

    /// Convert an ordered head-to-tail node chain into a dense pose
    /// sequence.
    pub(super) fn generate_path(&self, chain: &VecDeque<NodeId>) -> Vec<Pose2D> {
        let mut res = Vec::new();
        self.push_first_node(&mut res);

        let mut segment_forward = self.is_start_segment_forward(chain[0]);

        debug!(
            "[CourseSearch] generating path from {} transitions",
            chain.len()
        );

        for &u in chain {
            let eff_len = self.effective_length_of_next_segment(u);
            if eff_len < f32::EPSILON {
                // the segment stretch has no length, only the curve remains
                self.push_curve_segment(&mut res, u);
                continue;
            }

            let next_forward = self.is_next_segment_forward(u);
            let curve_forward = self.nodes[u].curve_forward;

            if next_forward == segment_forward {
                if curve_forward == next_forward {
                    self.push_curve_segment(&mut res, u);
                } else {
                    // Double turn: the effective direction is kept but
                    // the arc opposes it, so the vehicle pivots onto the
                    // arc and pivots again after leaving it.
                    let t = self.course.transition(self.nodes[u].transition);
                    let pivot = if curve_forward { t.first() } else { t.last() };
                    self.push_straight_turning_segment(&mut res, pivot);

                    self.push_curve_segment(&mut res, u);

                    if curve_forward {
                        self.extend_along_target(&mut res, u);
                    } else {
                        self.extend_along_source(&mut res, u);
                    }
                }
            } else if segment_forward {
                if curve_forward {
                    // forward segment, forward arc, next stretch in reverse:
                    // overshoot along the target past the arc end
                    self.push_curve_segment(&mut res, u);
                    self.extend_along_target(&mut res, u);
                } else {
                    // forward segment, reversed arc: overshoot along the
                    // target before backing through the arc
                    self.extend_along_target(&mut res, u);
                    self.push_curve_segment(&mut res, u);
                }
            } else if curve_forward {
                // reversed segment, forward arc: back past the arc start
                // along the source first
                self.extend_along_source(&mut res, u);
                self.push_curve_segment(&mut res, u);
            } else {
                // reversed segment, reversed arc: back through the arc,
                // then past its start along the source
                self.push_curve_segment(&mut res, u);
                self.extend_along_source(&mut res, u);
            }

            segment_forward = next_forward;
        }

        self.push_last_node(&mut res);
        res
    }

    /// Emit the arc samples of `node`'s transition.
    ///
    /// Forward arcs emit `path[1..]` with tangent orientations;
    /// reversed arcs emit `path[m-2..=0]` with the tangents flipped.
    pub(super) fn push_curve_segment(&self, res: &mut Vec<Pose2D>, node: NodeId) {
        let t = self.course.transition(self.nodes[node].transition);
        let path = t.path();

        if self.nodes[node].curve_forward {
            trace!("[CourseSearch] insert curve forward");
            for j in 1..path.len() {
                let delta = path[j] - path[j - 1];
                res.push(Pose2D::from_point(path[j], delta.heading()));
            }
        } else {
            trace!("[CourseSearch] insert curve backward");
            for j in (0..path.len() - 1).rev() {
                let delta = path[j] - path[j + 1];
                res.push(Pose2D::from_point(path[j], delta.heading()));
            }
        }
    }

    /// Emit a pose one pivot-stub length past the arc end, along the
    /// target segment's tangent.
    pub(super) fn extend_along_target(&self, res: &mut Vec<Pose2D>, node: NodeId) {
        trace!("[CourseSearch] extend along target segment");
        let t = self.course.transition(self.nodes[node].transition);
        let yaw = self.course.segment(t.target).line.heading();
        let pt = t.last() + Point2D::from_angle(yaw) * self.turning_straight;
        res.push(Pose2D::from_point(pt, yaw));
    }

    /// Emit a pose one pivot-stub length past the arc start, along the
    /// reversed source segment tangent.
    pub(super) fn extend_along_source(&self, res: &mut Vec<Pose2D>, node: NodeId) {
        trace!("[CourseSearch] extend along source segment");
        let t = self.course.transition(self.nodes[node].transition);
        let yaw = self.course.segment(t.source).line.heading() + std::f32::consts::PI;
        let pt = t.first() + Point2D::from_angle(yaw) * self.turning_straight;
        res.push(Pose2D::from_point(pt, yaw));
    }

    /// Emit a straight pivot stub: continue past `target_pt` by the
    /// stub length, along the direction from the last emitted pose.
    pub(super) fn push_straight_turning_segment(&self, res: &mut Vec<Pose2D>, target_pt: Point2D) {
        trace!("[CourseSearch] extend straight");
        let prev = match res.last() {
            Some(pose) => pose.position(),
            None => return,
        };

        let dir = target_pt - prev;
        let pos = target_pt + dir.normalized() * self.turning_straight;
        res.push(Pose2D::from_point(pos, dir.heading()));
    }
}
