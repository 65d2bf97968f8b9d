mod commands;
pub mod config;
mod shared;

pub use commands::{CommandQueue, CommandSender};
pub use config::{NoiseConfig, PhysicsConfig, RuntimeConfig, SensorConfig, SimulationConfig};
pub use shared::SharedState;
