pub mod blades;
pub mod physics;
pub mod sensors;

pub use blades::update_blades;
pub use physics::{physics_engine_system, PhysicsEngine};
pub use sensors::{sensor_emulator_system, SensorEmulator};
