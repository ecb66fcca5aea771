//! Appendix resolution: bridging free poses to the course.

use std::fmt;

use log::warn;

use crate::core::Pose2D;
use crate::grid::OccupancyGrid;

/// Which end of the path an appendix bridges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppendixRole {
    Start,
    End,
}

impl fmt::Display for AppendixRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppendixRole::Start => write!(f, "start"),
            AppendixRole::End => write!(f, "end"),
        }
    }
}

/// Footprint-aware grid search connecting a free pose to the course.
///
/// Implementations return an ordered pose list from the free pose to a
/// pose lying on (or very near) a course segment, or an empty list
/// when no connection exists. Resolvers are tried in registration
/// order; typically a forward-only search first, then one that may
/// turn in place.
pub trait AppendixResolver {
    fn resolve(&self, grid: &OccupancyGrid, pose: &Pose2D, role: AppendixRole) -> Vec<Pose2D>;
}

/// Try the resolvers in order, returning the first non-empty appendix.
pub(crate) fn resolve_appendix(
    resolvers: &[Box<dyn AppendixResolver>],
    grid: &OccupancyGrid,
    pose: &Pose2D,
    role: AppendixRole,
) -> Vec<Pose2D> {
    for (i, resolver) in resolvers.iter().enumerate() {
        let appendix = resolver.resolve(grid, pose, role);
        if !appendix.is_empty() {
            return appendix;
        }
        if i + 1 < resolvers.len() {
            warn!("[CourseSearch] cannot connect to {role} with resolver {i}, falling back");
        }
    }
    Vec::new()
}

/// Concatenate appendices around the course-bound middle part.
pub fn combine(start: &[Pose2D], middle: &[Pose2D], end: &[Pose2D]) -> Vec<Pose2D> {
    if start.is_empty() && end.is_empty() {
        return middle.to_vec();
    }

    let mut res = Vec::with_capacity(start.len() + middle.len() + end.len());
    res.extend_from_slice(start);
    res.extend_from_slice(middle);
    res.extend_from_slice(end);
    res
}
