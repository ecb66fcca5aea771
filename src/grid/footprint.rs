//! Vehicle footprint definition for collision checking.

use crate::core::{Point2D, Pose2D};
use serde::{Deserialize, Serialize};

/// Rectangular vehicle footprint, measured from the kinematic
/// reference point (rear axle center).
///
/// Consumed by the external footprint-aware grid search; the course
/// search itself never collision-checks.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VehicleFootprint {
    /// Forward extent in meters (positive, ahead of the reference point).
    pub forward: f32,
    /// Backward extent in meters (negative, behind the reference point).
    pub backward: f32,
    /// Width in meters.
    pub width: f32,
}

impl Default for VehicleFootprint {
    fn default() -> Self {
        Self {
            forward: 0.4,
            backward: -0.6,
            width: 0.5,
        }
    }
}

impl VehicleFootprint {
    /// Create a new footprint.
    pub fn new(forward: f32, backward: f32, width: f32) -> Self {
        Self {
            forward,
            backward,
            width,
        }
    }

    /// Overall vehicle length.
    pub fn length(&self) -> f32 {
        self.forward - self.backward
    }

    /// Footprint corners in world coordinates for a vehicle at `pose`.
    ///
    /// Order: front-left, front-right, rear-right, rear-left.
    pub fn corners(&self, pose: &Pose2D) -> [Point2D; 4] {
        let fwd = pose.forward();
        let left = Point2D::new(-fwd.y, fwd.x);
        let half_width = self.width * 0.5;
        let pos = pose.position();

        [
            pos + fwd * self.forward + left * half_width,
            pos + fwd * self.forward + left * -half_width,
            pos + fwd * self.backward + left * -half_width,
            pos + fwd * self.backward + left * half_width,
        ]
    }
}
