use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::{
    BLADE_AMBIENT_TEMPERATURE, BLADE_COUNT, BLADE_MAX_HEALTH, BLADE_RUNNING_RPM,
    BLADE_STOPPED_RPM,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BladeStatus {
    #[default]
    Stopped,
    SpinningUp,
    Running,
    Landing,
    EmergencyStop,
}

impl BladeStatus {
    /// RPM-driven status change. `Running` and `Stopped` fire once; the other
    /// statuses are only ever set by flight commands.
    pub fn on_rpm(self, rpm: f64) -> Option<BladeStatus> {
        if rpm >= BLADE_RUNNING_RPM && self != BladeStatus::Running {
            Some(BladeStatus::Running)
        } else if rpm <= BLADE_STOPPED_RPM && self != BladeStatus::Stopped {
            Some(BladeStatus::Stopped)
        } else {
            None
        }
    }
}

impl fmt::Display for BladeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BladeStatus::Stopped => "stopped",
            BladeStatus::SpinningUp => "spinning_up",
            BladeStatus::Running => "running",
            BladeStatus::Landing => "landing",
            BladeStatus::EmergencyStop => "emergency_stop",
        };
        f.write_str(name)
    }
}

/// A single rotor and its motor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blade {
    pub rpm: f64,
    pub target_rpm: f64,
    /// Wear indicator in [0, 100], never increases.
    pub health: f64,
    /// Motor temperature [°C]
    pub temperature: f64,
    pub vibration: f64,
    pub status: BladeStatus,
    /// Visual rotation angle [rad], wraps at 2π
    pub rotation_angle: f64,
}

impl Default for Blade {
    fn default() -> Self {
        Self {
            rpm: 0.0,
            target_rpm: 0.0,
            health: BLADE_MAX_HEALTH,
            temperature: BLADE_AMBIENT_TEMPERATURE,
            vibration: 0.0,
            status: BladeStatus::Stopped,
            rotation_angle: 0.0,
        }
    }
}

impl Blade {
    /// A blade already spinning at `rpm`, e.g. for a drone starting in the air.
    pub fn spinning_at(rpm: f64) -> Self {
        let rpm = rpm.max(0.0);
        Self {
            rpm,
            target_rpm: rpm,
            status: BladeStatus::SpinningUp
                .on_rpm(rpm)
                .unwrap_or(BladeStatus::SpinningUp),
            ..Default::default()
        }
    }
}

/// The four rotors of the drone.
#[derive(Component, Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BladeArray {
    blades: [Blade; BLADE_COUNT],
}

impl BladeArray {
    pub fn new(blades: [Blade; BLADE_COUNT]) -> Self {
        Self { blades }
    }

    pub fn spinning_at(rpm: f64) -> Self {
        Self {
            blades: std::array::from_fn(|_| Blade::spinning_at(rpm)),
        }
    }

    pub fn blades(&self) -> &[Blade; BLADE_COUNT] {
        &self.blades
    }

    pub fn iter(&self) -> impl Iterator<Item = &Blade> {
        self.blades.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Blade> {
        self.blades.iter_mut()
    }

    pub fn total_rpm(&self) -> f64 {
        self.blades.iter().map(|blade| blade.rpm).sum()
    }

    /// Commands every blade towards `target_rpm` with the given status.
    pub fn command_all(&mut self, target_rpm: f64, status: BladeStatus) {
        for blade in self.blades.iter_mut() {
            blade.target_rpm = target_rpm.max(0.0);
            blade.status = status;
        }
    }

    /// Cuts all motors instantly, bypassing the ramp.
    pub fn halt_all(&mut self) {
        for blade in self.blades.iter_mut() {
            blade.rpm = 0.0;
            blade.target_rpm = 0.0;
            blade.status = BladeStatus::EmergencyStop;
        }
    }

    pub fn into_inner(self) -> [Blade; BLADE_COUNT] {
        self.blades
    }
}
