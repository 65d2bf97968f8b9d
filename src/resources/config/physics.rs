use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::utils::{ConfigError, DEFAULT_TIMESTEP, GROUND_LEVEL};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Integration step [s]
    pub timestep: f64,
    /// Blade target after a takeoff command
    pub takeoff_rpm: f64,
    /// Altitude the airborne thrust law holds [m]
    pub hold_altitude: f64,
    /// Altitude above which a takeoff counts as complete [m]
    pub takeoff_complete_altitude: f64,
    /// Highest altitude a takeoff may be started from [m]
    pub takeoff_max_altitude: f64,
    /// Initial autopilot destination [m]
    pub target_point: Vector3<f64>,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            timestep: DEFAULT_TIMESTEP,
            takeoff_rpm: 3000.0,
            hold_altitude: 10.0,
            takeoff_complete_altitude: 8.0,
            takeoff_max_altitude: GROUND_LEVEL,
            target_point: Vector3::new(20.0, 15.0, 15.0),
        }
    }
}

impl PhysicsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.timestep.is_finite() && self.timestep > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "physics timestep must be positive, got {}",
                self.timestep
            )));
        }
        if !(self.takeoff_rpm.is_finite() && self.takeoff_rpm >= 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "takeoff rpm must be non-negative, got {}",
                self.takeoff_rpm
            )));
        }
        let finite = [
            self.hold_altitude,
            self.takeoff_complete_altitude,
            self.takeoff_max_altitude,
        ]
        .iter()
        .chain(self.target_point.iter())
        .all(|v| v.is_finite());
        if !finite {
            return Err(ConfigError::ValidationError(
                "physics altitudes and target point must be finite".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether the per-tick constants match this timestep.
    pub fn is_nominal_timestep(&self) -> bool {
        (self.timestep - DEFAULT_TIMESTEP).abs() < 1e-9
    }
}
