use bevy::prelude::*;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightMode {
    #[default]
    Stopped,
    TakingOff,
    Hovering,
    AutoPilot,
    Landing,
    Emergency,
}

/// Operator commands. Queued and applied at the start of the next tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightCommand {
    Takeoff,
    Land,
    AutoPilot,
    EmergencyStop,
    SetTargetPoint(Vector3<f64>),
}

/// Kinematic conditions evaluated during a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlightTrigger {
    /// Autopilot target is within arrival distance.
    TargetReached,
    /// Integration pushed the drone into the ground.
    Touchdown,
    /// Climbed above the takeoff completion altitude.
    ClimbedOut,
}

impl FlightMode {
    /// Mode change caused by an operator command, `None` if the command is
    /// not valid in the current mode. `altitude_ok` says whether the drone is
    /// low enough to take off.
    pub fn on_command(self, command: &FlightCommand, altitude_ok: bool) -> Option<FlightMode> {
        match (self, command) {
            (_, FlightCommand::Takeoff) if altitude_ok => Some(FlightMode::TakingOff),
            (_, FlightCommand::Takeoff) => None,
            (_, FlightCommand::Land) => Some(FlightMode::Landing),
            (FlightMode::Emergency, FlightCommand::AutoPilot) => None,
            (_, FlightCommand::AutoPilot) => Some(FlightMode::AutoPilot),
            (_, FlightCommand::EmergencyStop) => Some(FlightMode::Emergency),
            (_, FlightCommand::SetTargetPoint(_)) => None,
        }
    }

    /// Mode change caused by the physics state within a tick.
    pub fn on_trigger(self, trigger: FlightTrigger) -> Option<FlightMode> {
        match (self, trigger) {
            (FlightMode::AutoPilot, FlightTrigger::TargetReached) => Some(FlightMode::Hovering),
            (FlightMode::Landing, FlightTrigger::Touchdown) => Some(FlightMode::Stopped),
            (FlightMode::TakingOff, FlightTrigger::ClimbedOut) => Some(FlightMode::Hovering),
            _ => None,
        }
    }

    /// Status text shown to the operator.
    pub fn label(&self) -> &'static str {
        match self {
            FlightMode::Stopped => "ON GROUND",
            FlightMode::TakingOff => "TAKING OFF",
            FlightMode::Hovering => "HOVERING",
            FlightMode::AutoPilot => "AUTOPILOT",
            FlightMode::Landing => "LANDING",
            FlightMode::Emergency => "EMERGENCY",
        }
    }
}

impl fmt::Display for FlightMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FlightMode::Stopped => "stopped",
            FlightMode::TakingOff => "taking_off",
            FlightMode::Hovering => "hovering",
            FlightMode::AutoPilot => "auto_pilot",
            FlightMode::Landing => "landing",
            FlightMode::Emergency => "emergency",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_MODES: [FlightMode; 6] = [
        FlightMode::Stopped,
        FlightMode::TakingOff,
        FlightMode::Hovering,
        FlightMode::AutoPilot,
        FlightMode::Landing,
        FlightMode::Emergency,
    ];

    #[test]
    fn test_land_and_emergency_always_accepted() {
        for mode in ALL_MODES {
            assert_eq!(
                mode.on_command(&FlightCommand::Land, false),
                Some(FlightMode::Landing)
            );
            assert_eq!(
                mode.on_command(&FlightCommand::EmergencyStop, false),
                Some(FlightMode::Emergency)
            );
        }
    }

    #[test]
    fn test_takeoff_requires_low_altitude() {
        assert_eq!(
            FlightMode::Stopped.on_command(&FlightCommand::Takeoff, true),
            Some(FlightMode::TakingOff)
        );
        assert_eq!(
            FlightMode::Hovering.on_command(&FlightCommand::Takeoff, false),
            None
        );
    }

    #[test]
    fn test_emergency_exits() {
        let emergency = FlightMode::Emergency;
        assert_eq!(emergency.on_command(&FlightCommand::AutoPilot, true), None);
        assert_eq!(
            emergency.on_command(&FlightCommand::Takeoff, true),
            Some(FlightMode::TakingOff)
        );
        assert_eq!(emergency.on_trigger(FlightTrigger::Touchdown), None);
    }

    #[test]
    fn test_target_point_never_changes_mode() {
        let command = FlightCommand::SetTargetPoint(Vector3::new(1.0, 2.0, 3.0));
        for mode in ALL_MODES {
            assert_eq!(mode.on_command(&command, true), None);
        }
    }

    #[test]
    fn test_tick_triggers() {
        assert_eq!(
            FlightMode::AutoPilot.on_trigger(FlightTrigger::TargetReached),
            Some(FlightMode::Hovering)
        );
        assert_eq!(
            FlightMode::Landing.on_trigger(FlightTrigger::Touchdown),
            Some(FlightMode::Stopped)
        );
        assert_eq!(
            FlightMode::TakingOff.on_trigger(FlightTrigger::ClimbedOut),
            Some(FlightMode::Hovering)
        );
        assert_eq!(FlightMode::Hovering.on_trigger(FlightTrigger::ClimbedOut), None);
        assert_eq!(FlightMode::Stopped.on_trigger(FlightTrigger::Touchdown), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(FlightMode::Stopped.label(), "ON GROUND");
        assert_eq!(FlightMode::AutoPilot.to_string(), "auto_pilot");
    }
}
