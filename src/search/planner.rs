//! Course search: relaxed Dijkstra over the segment/transition network.
//!
//! The edge cost between two transitions depends on the direction the
//! vehicle was driving when it reached the first one, so the usual
//! Dijkstra invariant (a popped node is final) does not hold. Nodes
//! are re-opened whenever a cheaper predecessor is found; superseded
//! queue entries are detected by cost mismatch and skipped on pop.

use std::collections::{BinaryHeap, VecDeque};
use std::f32::consts::FRAC_PI_8;

use log::{debug, error, trace, warn};

use crate::config::PlannerConfig;
use crate::core::{Point2D, Pose2D};
use crate::course::{CourseNetwork, SegmentId, Transition, TransitionId};
use crate::grid::MapProvider;

use super::appendix::{combine, resolve_appendix, AppendixResolver, AppendixRole};
use super::types::{node_id, CoursePath, NodeId, PlanError, QueueEntry, SearchNode};

/// Heading tolerance when anchoring a pose to its closest segment.
const ANGULAR_TOLERANCE: f32 = FRAC_PI_8;
/// Distance tolerance when anchoring a pose to its closest segment (meters).
const DISTANCE_TOLERANCE: f32 = 0.5;
/// Displacements shorter than this make directionality ill-defined (meters).
const SHORT_DISPLACEMENT: f32 = 0.1;

/// Course-constrained path planner.
///
/// Connects two free poses through the course network: appendices
/// computed by the external grid search bridge the poses to their
/// closest segments, and the middle part follows segments and
/// transition arcs chosen by a cost-minimising search.
pub struct CoursePlanner<'a> {
    course: &'a CourseNetwork,
    config: PlannerConfig,
    map_provider: Box<dyn MapProvider>,
    appendix_resolvers: Vec<Box<dyn AppendixResolver>>,
}

impl<'a> CoursePlanner<'a> {
    /// Create a planner over `course`.
    ///
    /// `appendix_resolvers` are tried in order for each appendix; the
    /// first non-empty result wins.
    pub fn new(
        course: &'a CourseNetwork,
        config: PlannerConfig,
        map_provider: Box<dyn MapProvider>,
        appendix_resolvers: Vec<Box<dyn AppendixResolver>>,
    ) -> Self {
        Self {
            course,
            config,
            map_provider,
            appendix_resolvers,
        }
    }

    /// Plan a path from `start_pose` to `end_pose`.
    pub fn plan(&self, start_pose: &Pose2D, end_pose: &Pose2D) -> Result<CoursePath, PlanError> {
        let grid = match self.map_provider.get() {
            Some(grid) => grid,
            None => return Err(PlanError::MapUnavailable),
        };

        debug!("[CourseSearch] resolving appendices");

        let start_appendix = resolve_appendix(
            &self.appendix_resolvers,
            &grid,
            start_pose,
            AppendixRole::Start,
        );
        let start_anchor = match start_appendix.last() {
            Some(pose) => *pose,
            None => return Err(PlanError::AppendixUnreachable(AppendixRole::Start)),
        };
        let start_segment = self
            .course
            .find_closest_segment(&start_anchor, ANGULAR_TOLERANCE, DISTANCE_TOLERANCE)
            .ok_or(PlanError::NoClosestSegment(AppendixRole::Start))?;
        let start_pt = self
            .course
            .segment(start_segment)
            .line
            .nearest_point_to(start_anchor.position());

        let mut end_appendix =
            resolve_appendix(&self.appendix_resolvers, &grid, end_pose, AppendixRole::End);
        if end_appendix.is_empty() {
            return Err(PlanError::AppendixUnreachable(AppendixRole::End));
        }
        // Stored reversed so the final concatenation reads in traversal order.
        end_appendix.reverse();
        let end_anchor = end_appendix[0];
        let end_segment = self
            .course
            .find_closest_segment(&end_anchor, ANGULAR_TOLERANCE, DISTANCE_TOLERANCE)
            .ok_or(PlanError::NoClosestSegment(AppendixRole::End))?;
        let end_pt = self
            .course
            .segment(end_segment)
            .line
            .nearest_point_to(end_anchor.position());

        let mut ctx = SearchContext::new(
            self.course,
            &self.config,
            start_segment,
            end_segment,
            start_pt,
            end_pt,
        );

        if start_segment == end_segment {
            trace!("[CourseSearch] start and end share a segment");
            let mut middle = Vec::with_capacity(2);
            ctx.push_first_node(&mut middle);
            ctx.push_last_node(&mut middle);
            return Ok(CoursePath {
                poses: combine(&start_appendix, &middle, &end_appendix),
                cost: 0.0,
            });
        }

        let (middle, cost) = ctx.run()?;
        Ok(CoursePath {
            poses: combine(&start_appendix, &middle, &end_appendix),
            cost,
        })
    }

    /// Plan a path, signalling failure with an empty sequence.
    pub fn find_path(&self, start_pose: &Pose2D, end_pose: &Pose2D) -> Vec<Pose2D> {
        match self.plan(start_pose, end_pose) {
            Ok(path) => path.poses,
            Err(e) => {
                error!("[CourseSearch] {e}");
                Vec::new()
            }
        }
    }
}

/// Mutable state of one planning call.
///
/// Owns the node arena; everything here dies with the call.
pub(super) struct SearchContext<'c> {
    pub(super) course: &'c CourseNetwork,
    pub(super) penalty_backwards: f32,
    pub(super) penalty_turn: f32,
    pub(super) turning_straight: f32,
    pub(super) start_segment: SegmentId,
    pub(super) end_segment: SegmentId,
    pub(super) start_pt: Point2D,
    pub(super) end_pt: Point2D,
    pub(super) nodes: Vec<SearchNode>,
    best_path: Vec<Pose2D>,
    min_cost: f32,
}

impl<'c> SearchContext<'c> {
    pub(super) fn new(
        course: &'c CourseNetwork,
        config: &PlannerConfig,
        start_segment: SegmentId,
        end_segment: SegmentId,
        start_pt: Point2D,
        end_pt: Point2D,
    ) -> Self {
        let mut nodes = Vec::with_capacity(course.transition_count() * 2);
        for i in 0..course.transition_count() {
            let id = TransitionId(i);
            let t = course.transition(id);
            nodes.push(SearchNode {
                transition: id,
                curve_forward: true,
                next_segment: t.target,
                cost: f32::INFINITY,
                prev: None,
                next: None,
            });
            nodes.push(SearchNode {
                transition: id,
                curve_forward: false,
                next_segment: t.source,
                cost: f32::INFINITY,
                prev: None,
                next: None,
            });
        }

        Self {
            course,
            penalty_backwards: config.penalty.backwards,
            penalty_turn: config.penalty.turn,
            turning_straight: config.turning.straight,
            start_segment,
            end_segment,
            start_pt,
            end_pt,
            nodes,
            best_path: Vec::new(),
            min_cost: f32::INFINITY,
        }
    }

    /// Run the search, returning the best reconstructed middle part
    /// and its cost.
    pub(super) fn run(&mut self) -> Result<(Vec<Pose2D>, f32), PlanError> {
        let mut queue = BinaryHeap::new();
        self.enqueue_starting_nodes(&mut queue);
        self.min_cost = f32::INFINITY;

        while let Some(entry) = queue.pop() {
            let u = entry.node;
            if entry.cost != self.nodes[u].cost {
                // superseded by a cheaper relaxation or a finalisation
                continue;
            }

            if self.nodes[u].next_segment == self.end_segment {
                self.finalize_candidate(u);
                continue;
            }

            self.relax_neighbors(u, &mut queue);
        }

        if self.best_path.is_empty() {
            return Err(PlanError::NoCandidate);
        }
        Ok((std::mem::take(&mut self.best_path), self.min_cost))
    }

    fn enqueue_starting_nodes(&mut self, queue: &mut BinaryHeap<QueueEntry>) {
        let course = self.course;
        let segment = course.segment(self.start_segment);

        for (curve_forward, transitions) in [
            (true, &segment.forward_transitions),
            (false, &segment.backward_transitions),
        ] {
            for &tid in transitions {
                let node = node_id(tid, curve_forward);
                let t = course.transition(tid);
                let entry_pt = if curve_forward { t.first() } else { t.last() };

                let cost = self.straight_cost(node, self.start_pt, entry_pt);
                self.nodes[node].cost = cost;
                queue.push(QueueEntry { cost, node });
            }
        }
    }

    fn relax_neighbors(&mut self, u: NodeId, queue: &mut BinaryHeap<QueueEntry>) {
        let course = self.course;
        let segment = course.segment(self.nodes[u].next_segment);

        let curve_cost = self.curve_cost(u);
        let start_pt_on_next = self.start_point_on_next_segment(u);

        for (curve_forward, transitions) in [
            (true, &segment.forward_transitions),
            (false, &segment.backward_transitions),
        ] {
            for &tid in transitions {
                let v = node_id(tid, curve_forward);
                let end_pt_on_next = self.end_point_on_segment(u, course.transition(tid));
                let straight_cost = self.straight_cost(u, start_pt_on_next, end_pt_on_next);

                let new_cost = self.nodes[u].cost + curve_cost + straight_cost;
                if new_cost < self.nodes[v].cost {
                    self.nodes[v].prev = Some(u);
                    self.nodes[u].next = Some(v);
                    self.nodes[v].cost = new_cost;
                    queue.push(QueueEntry {
                        cost: new_cost,
                        node: v,
                    });
                }
            }
        }
    }

    /// Complete a node whose next segment is the goal segment and keep
    /// its path if it beats the best candidate so far. The node is not
    /// expanded; the search continues with the remaining queue.
    fn finalize_candidate(&mut self, u: NodeId) {
        let additional = self.curve_cost(u)
            + self.straight_cost(u, self.start_point_on_next_segment(u), self.end_pt);
        self.nodes[u].cost += additional;
        let cost = self.nodes[u].cost;

        debug!(
            "[CourseSearch] candidate {} with cost {:.3}",
            self.chain_signature(u),
            cost
        );

        if cost < self.min_cost {
            self.min_cost = cost;

            let mut chain = VecDeque::new();
            let mut cursor = Some(u);
            while let Some(id) = cursor {
                chain.push_front(id);
                if let Some(prev) = self.nodes[id].prev {
                    self.nodes[prev].next = Some(id);
                }
                cursor = self.nodes[id].prev;
            }

            self.best_path = self.generate_path(&chain);
        }
    }

    // === Cost terms ===

    pub(super) fn curve_cost(&self, node: NodeId) -> f32 {
        let n = &self.nodes[node];
        let arc_length = self.course.transition(n.transition).arc_length();
        if n.curve_forward {
            arc_length
        } else {
            self.penalty_backwards * arc_length
        }
    }

    pub(super) fn straight_cost(&self, node: NodeId, start: Point2D, end: Point2D) -> f32 {
        let segment_forward = self.is_segment_forward(self.nodes[node].next_segment, start, end);
        let distance = (end - start).length();

        let mut cost = if segment_forward {
            distance
        } else {
            self.penalty_backwards * distance
        };

        let prev_forward = self.is_previous_segment_forward(node);
        if prev_forward != segment_forward {
            // single turn
            cost += self.turning_straight + self.penalty_turn;
        } else if segment_forward != self.nodes[node].curve_forward {
            // double turn: the arc is traversed counter to the
            // effective driving direction on both sides
            cost += 2.0 * (self.turning_straight + self.penalty_turn);
        }

        cost
    }

    // === Entry/exit points ===

    /// Where the vehicle is deposited on `node.next_segment`.
    pub(super) fn start_point_on_next_segment(&self, node: NodeId) -> Point2D {
        let n = &self.nodes[node];
        if n.next_segment == self.start_segment {
            self.start_pt
        } else {
            let t = self.course.transition(n.transition);
            if n.curve_forward {
                t.last()
            } else {
                t.first()
            }
        }
    }

    /// Where the vehicle must arrive on a segment to enter arc `t`.
    pub(super) fn end_point_on_segment(&self, node: NodeId, t: &Transition) -> Point2D {
        if self.nodes[node].curve_forward {
            t.first()
        } else {
            t.last()
        }
    }

    /// Where the traversal of `node.next_segment` ends.
    pub(super) fn end_point_on_next_segment(&self, node: NodeId) -> Point2D {
        let n = &self.nodes[node];
        if n.next_segment == self.end_segment {
            self.end_pt
        } else if let Some(next) = n.next {
            let t = self.course.transition(self.nodes[next].transition);
            self.end_point_on_segment(next, t)
        } else {
            let line = &self.course.segment(n.next_segment).line;
            if n.curve_forward {
                line.end
            } else {
                line.start
            }
        }
    }

    pub(super) fn effective_length_of_next_segment(&self, node: NodeId) -> f32 {
        (self.start_point_on_next_segment(node) - self.end_point_on_next_segment(node)).length()
    }

    // === Directionality ===

    /// Whether motion from `from` to `to` agrees with the segment's
    /// declared direction. Ties resolve as forward.
    pub(super) fn is_segment_forward(&self, segment: SegmentId, from: Point2D, to: Point2D) -> bool {
        let segment_dir = self.course.segment(segment).line.direction();
        let move_dir = to - from;
        if move_dir.length() < SHORT_DISPLACEMENT {
            warn!(
                "[CourseSearch] effective segment length is small: {:.3}",
                move_dir.length()
            );
        }
        segment_dir.dot(&move_dir) >= 0.0
    }

    pub(super) fn is_start_segment_forward(&self, node: NodeId) -> bool {
        let t = self.course.transition(self.nodes[node].transition);
        let entry = self.end_point_on_segment(node, t);
        self.is_segment_forward(self.start_segment, self.start_pt, entry)
    }

    pub(super) fn is_previous_segment_forward(&self, node: NodeId) -> bool {
        match self.nodes[node].prev {
            Some(prev) => self.is_next_segment_forward(prev),
            None => self.is_start_segment_forward(node),
        }
    }

    pub(super) fn is_next_segment_forward(&self, node: NodeId) -> bool {
        self.is_segment_forward(
            self.nodes[node].next_segment,
            self.start_point_on_next_segment(node),
            self.end_point_on_next_segment(node),
        )
    }

    /// Direction signature of the chain ending at `head`, e.g. `">><"`.
    fn chain_signature(&self, head: NodeId) -> String {
        let mut res = String::new();
        let mut first = head;
        let mut cursor = Some(head);
        while let Some(id) = cursor {
            let dir = if self.is_next_segment_forward(id) { '>' } else { '<' };
            res.insert(0, dir);
            first = id;
            cursor = self.nodes[id].prev;
        }

        let t = self.course.transition(self.nodes[first].transition);
        let entry = self.end_point_on_segment(first, t);
        let start_forward = self.is_segment_forward(self.start_segment, self.start_pt, entry);
        let start_sym = if start_forward { '>' } else { '<' };

        format!("{start_sym}{res}")
    }
}
