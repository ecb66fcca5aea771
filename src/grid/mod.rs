//! Occupancy-grid input model and map retrieval.

pub mod footprint;
pub mod storage;

pub use footprint::VehicleFootprint;
pub use storage::{OccupancyGrid, FREE_THRESHOLD, OCCUPIED_THRESHOLD};

/// Map retrieval collaborator.
///
/// Implementations fetch the current static map (service call, file,
/// fixture). `None` means the map is unavailable, which aborts the
/// planning call.
pub trait MapProvider {
    fn get(&self) -> Option<OccupancyGrid>;
}
