//! Course network model: segments, transitions and lookup.
//!
//! The network is produced by an external course generator and is
//! read-only during planning. Segments and transitions are stored in
//! arenas and referenced by stable index ids.

pub mod network;
pub mod segment;
pub mod transition;

pub use network::CourseNetwork;
pub use segment::{Segment, SegmentId};
pub use transition::{Transition, TransitionId};
