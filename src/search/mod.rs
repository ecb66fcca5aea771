//! Course-constrained path search.
//!
//! This module contains the planner core:
//!
//! - **Course search**: relaxed Dijkstra over the transition network
//!   with a direction-aware cost model
//! - **Reconstruction**: stitching segment stretches, transition arcs
//!   and pivot maneuvers into a dense pose sequence
//! - **Appendices**: bridging the free start/end poses to the course
//!
//! ## Planning a path
//!
//! ```rust,ignore
//! use marga_nav::search::CoursePlanner;
//!
//! let planner = CoursePlanner::new(&course, config, map_provider, resolvers);
//! let path = planner.find_path(&start_pose, &end_pose);
//! if path.is_empty() {
//!     println!("no path");
//! }
//! ```

pub mod appendix;
pub mod planner;
mod reconstruct;
pub mod types;

pub use appendix::{combine, AppendixResolver, AppendixRole};
pub use planner::CoursePlanner;
pub use types::{CoursePath, PlanError};
