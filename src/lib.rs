//! Quadrotor simulation core: blade motor ramps, a flight-mode state machine,
//! a fixed-tick physics integrator and synthetic GPS/barometer/IMU sensors.
//!
//! The simulation can run inside a bevy [`App`](bevy::app::App) through
//! [`plugins::SimulationPlugin`], or on its own threads through
//! [`runtime::Simulation`].

pub mod components;
pub mod plugins;
pub mod resources;
pub mod runtime;
pub mod systems;
pub mod utils;

pub use components::{
    Blade, BladeArray, BladeStatus, DroneKinematics, DroneState, FlightCommand, FlightMode,
    SensorReadings,
};
pub use plugins::{SimEvent, SimEventKind, SimulationPlugin, SimulationSet};
pub use resources::{CommandSender, SimulationConfig};
pub use runtime::Simulation;
pub use systems::{PhysicsEngine, SensorEmulator};
pub use utils::{ConfigError, SimError};
