use bevy::prelude::*;
use rotorsim::{
    components::DroneState,
    plugins::{SimEvent, SimulationPlugin},
    resources::{CommandSender, SimulationConfig},
    systems::{PhysicsEngine, SensorEmulator},
};

// Builder for creating a test application with customizable configuration
pub struct TestAppBuilder {
    config: SimulationConfig,
    initial_state: Option<DroneState>,
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self {
            config: SimulationConfig::default().with_seed(1),
            initial_state: None,
        }
    }
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: SimulationConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the engine so the drone starts from `state`.
    pub fn with_state(mut self, state: DroneState) -> Self {
        self.initial_state = Some(state);
        self
    }

    pub fn build(self) -> TestApp {
        let mut app = App::new();

        let plugin = SimulationPlugin::new(self.config.clone())
            .unwrap_or_else(|e| panic!("invalid test config: {}", e));
        app.add_plugins(MinimalPlugins).add_plugins(plugin);

        if let Some(state) = self.initial_state {
            let engine = PhysicsEngine::with_state(&self.config, state);
            app.insert_resource(engine.command_sender())
                .insert_resource(engine);
        }

        TestApp { app }
    }
}

/// Main test application wrapper
pub struct TestApp {
    pub app: App,
}

impl TestApp {
    /// Runs the fixed schedule directly, one physics and sensor tick each.
    pub fn run_ticks(&mut self, ticks: usize) {
        for _ in 0..ticks {
            self.app.world_mut().run_schedule(FixedUpdate);
        }
    }

    pub fn commands(&self) -> CommandSender {
        self.app.world().resource::<CommandSender>().clone()
    }

    pub fn engine(&self) -> &PhysicsEngine {
        self.app.world().resource::<PhysicsEngine>()
    }

    pub fn sensors(&self) -> &SensorEmulator {
        self.app.world().resource::<SensorEmulator>()
    }

    /// Takes every event sent since the last call.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        self.app
            .world_mut()
            .resource_mut::<Events<SimEvent>>()
            .drain()
            .collect()
    }

    pub fn get_state<T: Resource>(&self) -> Option<&T> {
        self.app.world().get_resource::<T>()
    }
}
