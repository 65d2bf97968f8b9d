use bevy::prelude::*;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::components::{Blade, BladeArray, DroneKinematics, FlightMode};
use crate::utils::BLADE_COUNT;

/// Everything the physics engine owns, as of the end of tick `tick`.
///
/// Readers only ever receive clones of this value.
#[derive(Component, Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DroneState {
    /// Number of completed physics ticks
    pub tick: u64,
    pub kinematics: DroneKinematics,
    pub blades: BladeArray,
    pub mode: FlightMode,
}

impl DroneState {
    /// A drone at `position` in `mode`. Airborne modes get blades already
    /// spinning at `rpm`.
    pub fn at_position(position: Vector3<f64>, mode: FlightMode, rpm: f64) -> Self {
        let blades = match mode {
            FlightMode::Stopped | FlightMode::Emergency => BladeArray::default(),
            _ => BladeArray::spinning_at(rpm),
        };
        Self {
            tick: 0,
            kinematics: DroneKinematics::at_position(position),
            blades,
            mode,
        }
    }

    pub fn blade_snapshot(&self) -> [Blade; BLADE_COUNT] {
        self.blades.clone().into_inner()
    }

    pub fn is_finite(&self) -> bool {
        self.kinematics.is_finite() && self.blades.iter().all(|b| b.rpm.is_finite())
    }
}
