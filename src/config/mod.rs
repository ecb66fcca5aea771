//! Configuration loading for the planner.
//!
//! All settings live in a single YAML file with per-concern sections;
//! omitted fields fall back to the defaults in [`defaults`].

mod defaults;
mod error;
mod planner;

pub use error::ConfigLoadError;
pub use planner::{FootprintSection, PenaltySection, PlannerConfig, TurningSection};
