//! # Marga-Nav: Course-Constrained Path Planning
//!
//! A path planner for non-holonomic vehicles operating on an occupancy
//! grid. Given a start and an end pose in world coordinates, the
//! planner produces an ordered pose sequence whose middle follows a
//! pre-existing road-network-like course of straight **segments**
//! connected by precomputed curved **transitions**, while the ends are
//! free-form appendices computed by an external footprint-aware grid
//! search.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use marga_nav::config::PlannerConfig;
//! use marga_nav::core::{Line2D, Point2D, Pose2D};
//! use marga_nav::course::CourseNetwork;
//! use marga_nav::search::CoursePlanner;
//! # use marga_nav::grid::{MapProvider, OccupancyGrid};
//! # use marga_nav::search::{AppendixResolver, AppendixRole};
//! # struct StaticMap;
//! # impl MapProvider for StaticMap {
//! #     fn get(&self) -> Option<OccupancyGrid> {
//! #         Some(OccupancyGrid::unknown(10, 10, 0.1, Pose2D::default()))
//! #     }
//! # }
//! # struct Direct;
//! # impl AppendixResolver for Direct {
//! #     fn resolve(&self, _: &OccupancyGrid, pose: &Pose2D, _: AppendixRole) -> Vec<Pose2D> {
//! #         vec![*pose]
//! #     }
//! # }
//!
//! let mut course = CourseNetwork::new();
//! let s1 = course.add_segment(Line2D::new(Point2D::new(0.0, 0.0), Point2D::new(5.0, 0.0)));
//! let s2 = course.add_segment(Line2D::new(Point2D::new(5.0, 1.0), Point2D::new(10.0, 1.0)));
//! course.add_transition(s1, s2, vec![
//!     Point2D::new(5.0, 0.0),
//!     Point2D::new(5.0, 0.5),
//!     Point2D::new(5.0, 1.0),
//! ]);
//!
//! let planner = CoursePlanner::new(
//!     &course,
//!     PlannerConfig::default(),
//!     Box::new(StaticMap),
//!     vec![Box::new(Direct)],
//! );
//! let path = planner.find_path(&Pose2D::new(1.0, 0.0, 0.0), &Pose2D::new(9.0, 1.0, 0.0));
//! println!("path with {} poses", path.len());
//! ```
//!
//! ## Coordinate Frame
//!
//! All coordinates follow the ROS REP-103 convention:
//! - **X-forward**, **Y-left**, counter-clockwise positive rotation
//! - Positions in meters, angles in radians
//!
//! ## Architecture
//!
//! - [`core`]: fundamental types (`Point2D`, `Pose2D`, `Line2D`)
//! - [`config`]: configuration types loaded from YAML
//! - [`grid`]: occupancy-grid input model and map retrieval
//! - [`course`]: the immutable segment/transition network
//! - [`search`]: the search core and path reconstruction
//!
//! ## Cost model
//!
//! Straight stretches cost their length, multiplied by a penalty
//! factor when driven in reverse; transition arcs likewise. Every
//! change between forward and reverse motion additionally costs a
//! fixed turning penalty plus the length of a short straight pivot
//! stub that is also emitted into the resulting path. Because the
//! edge cost depends on the direction the vehicle arrived with, the
//! search re-opens nodes instead of finalising them on first pop.

pub mod config;
pub mod core;
pub mod course;
pub mod grid;
pub mod search;

pub use crate::core::{Line2D, Point2D, Pose2D};
pub use config::PlannerConfig;
pub use course::{CourseNetwork, Segment, SegmentId, Transition, TransitionId};
pub use grid::{MapProvider, OccupancyGrid, VehicleFootprint};
pub use search::{combine, AppendixResolver, AppendixRole, CoursePath, CoursePlanner, PlanError};
