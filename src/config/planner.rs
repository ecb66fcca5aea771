//! Planner configuration sections.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::grid::VehicleFootprint;

use super::defaults;
use super::error::ConfigLoadError;

/// Full planner configuration loaded from YAML
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct PlannerConfig {
    /// Vehicle footprint extents
    #[serde(default)]
    pub footprint: FootprintSection,

    /// Motion penalties
    #[serde(default)]
    pub penalty: PenaltySection,

    /// Turning maneuver settings
    #[serde(default)]
    pub turning: TurningSection,
}

/// Vehicle footprint extents, measured from the kinematic reference point
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FootprintSection {
    /// Forward extent in meters
    #[serde(default = "defaults::footprint_forward")]
    pub forward: f32,

    /// Backward extent in meters (negative, behind the reference point)
    #[serde(default = "defaults::footprint_backward")]
    pub backward: f32,

    /// Width in meters
    #[serde(default = "defaults::footprint_width")]
    pub width: f32,
}

impl Default for FootprintSection {
    fn default() -> Self {
        Self {
            forward: defaults::footprint_forward(),
            backward: defaults::footprint_backward(),
            width: defaults::footprint_width(),
        }
    }
}

/// Motion penalties
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PenaltySection {
    /// Multiplier on distance/arc cost when traversed in reverse
    #[serde(default = "defaults::penalty_backwards")]
    pub backwards: f32,

    /// Fixed cost added per required direction change
    #[serde(default = "defaults::penalty_turn")]
    pub turn: f32,
}

impl Default for PenaltySection {
    fn default() -> Self {
        Self {
            backwards: defaults::penalty_backwards(),
            turn: defaults::penalty_turn(),
        }
    }
}

/// Turning maneuver settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TurningSection {
    /// Length of the straight pivot stub emitted on direction changes (meters)
    #[serde(default = "defaults::turning_straight")]
    pub straight: f32,
}

impl Default for TurningSection {
    fn default() -> Self {
        Self {
            straight: defaults::turning_straight(),
        }
    }
}

impl PlannerConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Load from default config path (configs/planner.yaml)
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new("configs/planner.yaml");
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigLoadError::Parse(e.to_string()))
    }

    /// Vehicle footprint for the external collision check
    pub fn vehicle_footprint(&self) -> VehicleFootprint {
        VehicleFootprint::new(
            self.footprint.forward,
            self.footprint.backward,
            self.footprint.width,
        )
    }
}
