pub mod physics;
pub mod runtime;
pub mod sensors;
pub mod simulation;

pub use physics::PhysicsConfig;
pub use runtime::RuntimeConfig;
pub use sensors::{NoiseConfig, SensorConfig};
pub use simulation::SimulationConfig;
