//! End-to-end scenarios for the course-constrained planner.
//!
//! Collaborators (map retrieval, appendix grid search) are stubbed:
//! the map is a small empty grid and the appendix resolvers return the
//! query pose itself, so every scenario exercises the course search
//! and reconstruction in isolation.

use approx::assert_relative_eq;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use marga_nav::config::PlannerConfig;
use marga_nav::core::math::normalize_angle;
use marga_nav::core::{Line2D, Point2D, Pose2D};
use marga_nav::course::CourseNetwork;
use marga_nav::grid::{MapProvider, OccupancyGrid};
use marga_nav::search::{AppendixResolver, AppendixRole, CoursePlanner, PlanError};

fn p(x: f32, y: f32) -> Point2D {
    Point2D::new(x, y)
}

struct StaticMap;

impl MapProvider for StaticMap {
    fn get(&self) -> Option<OccupancyGrid> {
        Some(OccupancyGrid::unknown(20, 20, 1.0, Pose2D::default()))
    }
}

struct NoMap;

impl MapProvider for NoMap {
    fn get(&self) -> Option<OccupancyGrid> {
        None
    }
}

/// Appendix resolver whose grid search trivially succeeds at the pose.
struct Direct;

impl AppendixResolver for Direct {
    fn resolve(&self, _: &OccupancyGrid, pose: &Pose2D, _: AppendixRole) -> Vec<Pose2D> {
        vec![*pose]
    }
}

/// Appendix resolver that never reaches the course.
struct Blocked;

impl AppendixResolver for Blocked {
    fn resolve(&self, _: &OccupancyGrid, _: &Pose2D, _: AppendixRole) -> Vec<Pose2D> {
        Vec::new()
    }
}

fn planner(course: &CourseNetwork) -> CoursePlanner<'_> {
    CoursePlanner::new(
        course,
        PlannerConfig::default(),
        Box::new(StaticMap),
        vec![Box::new(Direct)],
    )
}

fn assert_pose(actual: &Pose2D, x: f32, y: f32, theta: f32) {
    assert_relative_eq!(actual.x, x, epsilon = 1e-4);
    assert_relative_eq!(actual.y, y, epsilon = 1e-4);
    assert_relative_eq!(normalize_angle(actual.theta - theta), 0.0, epsilon = 1e-4);
}

/// S1 (0,0)->(5,0) and S2 (5,1)->(10,1) joined by a forward arc.
fn ladder_course() -> CourseNetwork {
    let mut course = CourseNetwork::new();
    let s1 = course.add_segment(Line2D::new(p(0.0, 0.0), p(5.0, 0.0)));
    let s2 = course.add_segment(Line2D::new(p(5.0, 1.0), p(10.0, 1.0)));
    course.add_transition(s1, s2, vec![p(5.0, 0.0), p(5.0, 0.5), p(5.0, 1.0)]);
    course
}

#[test]
fn same_segment_emits_trivial_path() {
    let mut course = CourseNetwork::new();
    course.add_segment(Line2D::new(p(0.0, 0.0), p(10.0, 0.0)));

    let planner = planner(&course);
    let start = Pose2D::new(2.0, 0.0, 0.0);
    let end = Pose2D::new(7.0, 0.0, 0.0);

    let path = planner.plan(&start, &end).unwrap();
    assert_eq!(path.cost, 0.0);

    // start appendix, both anchors, end appendix
    assert_eq!(path.poses.len(), 4);
    assert_pose(&path.poses[0], 2.0, 0.0, 0.0);
    assert_pose(&path.poses[1], 2.0, 0.0, 0.0);
    assert_pose(&path.poses[2], 7.0, 0.0, 0.0);
    assert_pose(&path.poses[3], 7.0, 0.0, 0.0);
}

#[test]
fn forward_chain_follows_the_arc() {
    let course = ladder_course();
    let planner = planner(&course);

    let path = planner
        .plan(&Pose2D::new(1.0, 0.0, 0.0), &Pose2D::new(9.0, 1.0, 0.0))
        .unwrap();

    // straight on S1 + arc + straight on S2, no direction change
    assert_relative_eq!(path.cost, 4.0 + 1.0 + 4.0, epsilon = 1e-4);

    assert_eq!(path.poses.len(), 6);
    assert_pose(&path.poses[1], 1.0, 0.0, 0.0);
    assert_pose(&path.poses[2], 5.0, 0.5, FRAC_PI_2);
    assert_pose(&path.poses[3], 5.0, 1.0, FRAC_PI_2);
    assert_pose(&path.poses[4], 9.0, 1.0, 0.0);
}

#[test]
fn backward_traversal_pays_reverse_penalty_without_turning() {
    // Both segments declared against the driving direction, and the
    // arc is registered so that leaving S1 traverses it in reverse:
    // the whole maneuver is driven backwards with no pivot.
    let mut course = CourseNetwork::new();
    let s1 = course.add_segment(Line2D::new(p(5.0, 0.0), p(0.0, 0.0)));
    let s2 = course.add_segment(Line2D::new(p(10.0, 1.0), p(5.0, 1.0)));
    course.add_transition(s2, s1, vec![p(5.0, 1.0), p(5.0, 0.5), p(5.0, 0.0)]);

    let planner = planner(&course);
    let path = planner
        .plan(&Pose2D::new(1.0, 0.0, 0.0), &Pose2D::new(9.0, 1.0, 0.0))
        .unwrap();

    // Every part carries the backward multiplier, no turning penalty
    assert_relative_eq!(path.cost, 2.5 * 4.0 + 2.5 * 1.0 + 2.5 * 4.0, epsilon = 1e-4);

    assert_eq!(path.poses.len(), 6);
    assert_pose(&path.poses[1], 1.0, 0.0, PI);
    // reversed arc: path[m-2..=0] with flipped tangents
    assert_pose(&path.poses[2], 5.0, 0.5, FRAC_PI_2);
    assert_pose(&path.poses[3], 5.0, 1.0, FRAC_PI_2);
    assert_pose(&path.poses[4], 9.0, 1.0, PI);
}

#[test]
fn single_turn_emits_one_pivot_stub() {
    // The arc deposits the vehicle at (5.5, 1); the goal anchor sits
    // behind it, forcing one reversal with one overshoot stub.
    let mut course = CourseNetwork::new();
    let s1 = course.add_segment(Line2D::new(p(0.0, 0.0), p(5.0, 0.0)));
    let s2 = course.add_segment(Line2D::new(p(5.0, 1.0), p(10.0, 1.0)));
    course.add_transition(s1, s2, vec![p(5.0, 0.0), p(5.0, 0.5), p(5.5, 1.0)]);

    let planner = planner(&course);
    let path = planner
        .plan(&Pose2D::new(1.0, 0.0, 0.0), &Pose2D::new(5.2, 1.0, 0.0))
        .unwrap();

    let arc_length = 0.5 + 0.5_f32.sqrt();
    let expected = 4.0 + arc_length + (2.5 * 0.3 + 0.7 + 5.0);
    assert_relative_eq!(path.cost, expected, epsilon = 1e-4);

    assert_eq!(path.poses.len(), 7);
    assert_pose(&path.poses[1], 1.0, 0.0, 0.0);
    assert_pose(&path.poses[2], 5.0, 0.5, FRAC_PI_2);
    assert_pose(&path.poses[3], 5.5, 1.0, FRAC_PI_4);
    // the single pivot stub, one stub length past the arc end
    assert_pose(&path.poses[4], 6.2, 1.0, 0.0);
    assert_pose(&path.poses[5], 5.2, 1.0, 0.0);
}

#[test]
fn double_turn_emits_two_pivot_stubs() {
    // Effective direction stays forward on both segments, but the only
    // arc must be traversed in reverse: the vehicle overshoots the arc
    // entry, backs through the curve, and overshoots again past it.
    let mut course = CourseNetwork::new();
    let s1 = course.add_segment(Line2D::new(p(0.0, 0.0), p(5.0, 0.0)));
    let s2 = course.add_segment(Line2D::new(p(5.0, 1.0), p(10.0, 1.0)));
    course.add_transition(s2, s1, vec![p(5.0, 1.0), p(5.0, 0.5), p(5.0, 0.0)]);

    let planner = planner(&course);
    let path = planner
        .plan(&Pose2D::new(1.0, 0.0, 0.0), &Pose2D::new(9.0, 1.0, 0.0))
        .unwrap();

    // Both straight legs detect the opposing arc and pay a double turn
    let double_turn = 2.0 * (0.7 + 5.0);
    let expected = (4.0 + double_turn) + 2.5 * 1.0 + (4.0 + double_turn);
    assert_relative_eq!(path.cost, expected, epsilon = 1e-4);

    assert_eq!(path.poses.len(), 8);
    assert_pose(&path.poses[1], 1.0, 0.0, 0.0);
    // first stub: overshoot the arc entry along the driving direction
    assert_pose(&path.poses[2], 5.7, 0.0, 0.0);
    // the arc, backed through
    assert_pose(&path.poses[3], 5.0, 0.5, FRAC_PI_2);
    assert_pose(&path.poses[4], 5.0, 1.0, FRAC_PI_2);
    // second stub: back out past the arc start along the source segment
    assert_pose(&path.poses[5], 4.3, 1.0, PI);
    assert_pose(&path.poses[6], 9.0, 1.0, 0.0);
}

#[test]
fn unreachable_goal_segment_returns_empty() {
    let mut course = CourseNetwork::new();
    course.add_segment(Line2D::new(p(0.0, 0.0), p(5.0, 0.0)));
    course.add_segment(Line2D::new(p(5.0, 1.0), p(10.0, 1.0)));

    let planner = planner(&course);
    let start = Pose2D::new(1.0, 0.0, 0.0);
    let end = Pose2D::new(9.0, 1.0, 0.0);

    assert_eq!(planner.plan(&start, &end).unwrap_err(), PlanError::NoCandidate);
    assert!(planner.find_path(&start, &end).is_empty());
}

#[test]
fn search_keeps_the_cheaper_candidate() {
    // Two arcs reach the goal segment; the nearer one is popped first
    // but the later candidate wins on total cost.
    let mut course = CourseNetwork::new();
    let s1 = course.add_segment(Line2D::new(p(0.0, 0.0), p(5.0, 0.0)));
    let s2 = course.add_segment(Line2D::new(p(5.0, 1.0), p(10.0, 1.0)));
    course.add_transition(s1, s2, vec![p(5.0, 0.0), p(5.0, 0.5), p(5.0, 1.0)]);
    course.add_transition(s1, s2, vec![p(4.0, 0.0), p(4.0, 1.5), p(5.0, 1.0)]);

    let planner = planner(&course);
    let path = planner
        .plan(&Pose2D::new(1.0, 0.0, 0.0), &Pose2D::new(9.0, 1.0, 0.0))
        .unwrap();

    assert_relative_eq!(path.cost, 9.0, epsilon = 1e-4);
    // the winning middle goes through the short arc
    assert_pose(&path.poses[2], 5.0, 0.5, FRAC_PI_2);
}

#[test]
fn anchors_project_onto_the_segment_line() {
    let course = ladder_course();
    let planner = planner(&course);

    let path = planner
        .plan(&Pose2D::new(1.0, 0.3, 0.0), &Pose2D::new(9.0, 1.0, 0.0))
        .unwrap();

    // raw pose first, projected anchor second
    assert_pose(&path.poses[0], 1.0, 0.3, 0.0);
    assert_pose(&path.poses[1], 1.0, 0.0, 0.0);
    assert_relative_eq!(path.cost, 9.0, epsilon = 1e-4);
}

#[test]
fn map_unavailable_fails() {
    let course = ladder_course();
    let planner = CoursePlanner::new(
        &course,
        PlannerConfig::default(),
        Box::new(NoMap),
        vec![Box::new(Direct)],
    );

    let start = Pose2D::new(1.0, 0.0, 0.0);
    let end = Pose2D::new(9.0, 1.0, 0.0);
    assert_eq!(planner.plan(&start, &end).unwrap_err(), PlanError::MapUnavailable);
    assert!(planner.find_path(&start, &end).is_empty());
}

#[test]
fn unreachable_appendix_fails() {
    let course = ladder_course();
    let planner = CoursePlanner::new(
        &course,
        PlannerConfig::default(),
        Box::new(StaticMap),
        vec![Box::new(Blocked)],
    );

    let err = planner
        .plan(&Pose2D::new(1.0, 0.0, 0.0), &Pose2D::new(9.0, 1.0, 0.0))
        .unwrap_err();
    assert_eq!(err, PlanError::AppendixUnreachable(AppendixRole::Start));
}

#[test]
fn pose_far_from_course_has_no_closest_segment() {
    let course = ladder_course();
    let planner = planner(&course);

    let err = planner
        .plan(&Pose2D::new(1.0, 5.0, 0.0), &Pose2D::new(9.0, 1.0, 0.0))
        .unwrap_err();
    assert_eq!(err, PlanError::NoClosestSegment(AppendixRole::Start));
}

#[test]
fn second_resolver_is_tried_when_the_first_fails() {
    let course = ladder_course();
    let planner = CoursePlanner::new(
        &course,
        PlannerConfig::default(),
        Box::new(StaticMap),
        vec![Box::new(Blocked), Box::new(Direct)],
    );

    let path = planner
        .plan(&Pose2D::new(1.0, 0.0, 0.0), &Pose2D::new(9.0, 1.0, 0.0))
        .unwrap();
    assert_relative_eq!(path.cost, 9.0, epsilon = 1e-4);
}
