use bevy::prelude::*;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::components::FlightMode;

/// Discrete happenings reported to the logging layer.
#[derive(Event, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimEvent {
    /// Physics tick during which the event happened
    pub tick: u64,
    pub kind: SimEventKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum SimEventKind {
    ModeChanged { from: FlightMode, to: FlightMode },
    BladeRunning { blade: usize },
    BladeStopped { blade: usize },
    EmergencyStop,
    TargetReached { position: Vector3<f64> },
    TakeoffComplete { altitude: f64 },
    Touchdown,
}

impl SimEvent {
    pub fn new(tick: u64, kind: SimEventKind) -> Self {
        Self { tick, kind }
    }
}

impl fmt::Display for SimEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[tick {}] ", self.tick)?;
        match &self.kind {
            SimEventKind::ModeChanged { from, to } => {
                write!(f, "flight mode {} -> {}", from, to)
            }
            SimEventKind::BladeRunning { blade } => {
                write!(f, "blade {} reached operating speed", blade + 1)
            }
            SimEventKind::BladeStopped { blade } => {
                write!(f, "blade {} fully stopped", blade + 1)
            }
            SimEventKind::EmergencyStop => write!(f, "EMERGENCY STOP, all motors cut"),
            SimEventKind::TargetReached { position } => write!(
                f,
                "target reached at ({:.1}, {:.1}, {:.1})",
                position.x, position.y, position.z
            ),
            SimEventKind::TakeoffComplete { altitude } => {
                write!(f, "takeoff complete at {:.1} m, hovering", altitude)
            }
            SimEventKind::Touchdown => write!(f, "touchdown, landed safely"),
        }
    }
}
