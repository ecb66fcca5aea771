//! Search-space types for the course search.

use std::cmp::Ordering;

use thiserror::Error;

use crate::core::Pose2D;
use crate::course::{SegmentId, TransitionId};

use super::appendix::AppendixRole;

/// Stable index of a node in the search arena.
pub(crate) type NodeId = usize;

/// Arena index of the node traversing `transition` in the given
/// direction. Each transition owns two slots: forward at `2t`,
/// backward at `2t + 1`.
#[inline]
pub(crate) fn node_id(transition: TransitionId, curve_forward: bool) -> NodeId {
    transition.index() * 2 + usize::from(!curve_forward)
}

/// One directed traversal of a transition.
///
/// `prev`/`next` are arena indices forming the best-known path chain;
/// they never own the nodes they point at.
#[derive(Clone, Debug)]
pub(crate) struct SearchNode {
    pub transition: TransitionId,
    /// True when the arc is traversed first-to-last.
    pub curve_forward: bool,
    /// Segment the vehicle is on after traversing this node.
    pub next_segment: SegmentId,
    /// Best-known cumulative cost from the start.
    pub cost: f32,
    pub prev: Option<NodeId>,
    pub next: Option<NodeId>,
}

/// Priority-queue entry, min-ordered by cost.
///
/// The node id is a stable secondary key so equal-cost entries stay
/// distinct; entries whose cost no longer matches the node's current
/// cost are stale and skipped on pop.
#[derive(Clone, Debug)]
pub(crate) struct QueueEntry {
    pub cost: f32,
    pub node: NodeId,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.node == other.node
    }
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A planned course path.
#[derive(Clone, Debug)]
pub struct CoursePath {
    /// Ordered pose sequence in world coordinates.
    pub poses: Vec<Pose2D>,
    /// Accumulated cost of the course-bound middle part (0 for the
    /// trivial same-segment case).
    pub cost: f32,
}

/// Reason a planning call failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("map retrieval failed")]
    MapUnavailable,

    #[error("cannot connect the {0} pose to the course")]
    AppendixUnreachable(AppendixRole),

    #[error("no course segment close to the {0} anchor")]
    NoClosestSegment(AppendixRole),

    #[error("no transition chain reaches the goal segment")]
    NoCandidate,
}
