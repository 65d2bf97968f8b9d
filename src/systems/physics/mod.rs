mod control;
mod engine;
mod integrator;

pub use control::{autopilot, total_thrust, vertical_thrust, AutopilotOutput};
pub use engine::{physics_engine_system, PhysicsEngine};
pub use integrator::{clamp_to_ground, integrate_motion, update_flight_statistics};
