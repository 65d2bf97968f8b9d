use nalgebra::Vector3;
use rotorsim::{
    components::{DroneState, FlightMode},
    resources::{NoiseConfig, RuntimeConfig, SimulationConfig},
};

/// Seeded config with fast loops for threaded tests
pub fn create_fast_config() -> SimulationConfig {
    let mut config = SimulationConfig::default().with_seed(42);
    config.runtime = RuntimeConfig {
        physics_interval_ms: 5,
        sensor_interval_ms: 5,
        event_capacity: 4096,
    };
    config
}

/// Seeded config whose sensors report their exact base values
pub fn create_quiet_config() -> SimulationConfig {
    let mut config = SimulationConfig::default().with_seed(42);
    config.sensors.noise = NoiseConfig::disabled();
    config
}

/// Drone holding position in the air with blades at full speed
pub fn create_hovering_state(position: Vector3<f64>, target: Vector3<f64>) -> DroneState {
    let mut state = DroneState::at_position(position, FlightMode::Hovering, 3000.0);
    state.kinematics.target_point = target;
    state
}
