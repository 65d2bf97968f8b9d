use bevy::prelude::*;

use crate::plugins::SimEvent;
use crate::resources::SimulationConfig;
use crate::systems::{
    physics_engine_system, sensor_emulator_system, PhysicsEngine, SensorEmulator,
};
use crate::utils::ConfigError;

/// Simulation stages, run in order every fixed update.
#[derive(Debug, Hash, PartialEq, Eq, Clone, SystemSet)]
pub enum SimulationSet {
    Physics,
    Sensors,
}

/// Runs the drone simulation inside a bevy app.
///
/// Physics ticks at the configured timestep on `FixedUpdate`; sensors are
/// derived from the committed state right after. Commands are sent through
/// the [`CommandSender`](crate::resources::CommandSender) resource.
pub struct SimulationPlugin {
    config: SimulationConfig,
}

impl SimulationPlugin {
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }
}

impl Default for SimulationPlugin {
    fn default() -> Self {
        Self {
            config: SimulationConfig::default(),
        }
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let engine = PhysicsEngine::new(&self.config);

        app.insert_resource(self.config.clone())
            .insert_resource(engine.command_sender())
            .insert_resource(engine)
            .add_event::<SimEvent>();

        // Configure fixed timestep
        app.insert_resource(Time::<Fixed>::from_seconds(self.config.physics.timestep));

        app.configure_sets(
            FixedUpdate,
            (SimulationSet::Physics, SimulationSet::Sensors).chain(),
        );

        app.add_systems(
            FixedUpdate,
            physics_engine_system.in_set(SimulationSet::Physics),
        );

        match SensorEmulator::from_config(&self.config) {
            Ok(emulator) => {
                app.insert_resource(emulator).add_systems(
                    FixedUpdate,
                    sensor_emulator_system.in_set(SimulationSet::Sensors),
                );
            }
            Err(e) => error!("Sensor emulation disabled: {}", e),
        }
    }
}
