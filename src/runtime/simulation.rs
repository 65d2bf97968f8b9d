use bevy::prelude::*;
use crossbeam_channel::Receiver;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use super::loops::{physics_loop, sensor_loop};
use crate::components::{Blade, DroneKinematics, DroneState, FlightMode, SensorReadings};
use crate::plugins::SimEvent;
use crate::resources::{CommandSender, SharedState, SimulationConfig};
use crate::systems::{PhysicsEngine, SensorEmulator};
use crate::utils::{SimError, BLADE_COUNT};

/// Handle to a simulation running on its own physics and sensor threads.
///
/// Commands are non-blocking enqueues; every getter returns a copy of the
/// last published snapshot. Dropping the handle stops both threads.
pub struct Simulation {
    commands: CommandSender,
    shared: SharedState,
    initial_state: DroneState,
    events: Receiver<SimEvent>,
    stop: Arc<AtomicBool>,
    threads: Vec<JoinHandle<()>>,
}

impl Simulation {
    /// Starts with the drone on the ground at the origin.
    pub fn start(config: SimulationConfig) -> Result<Self, SimError> {
        config.validate()?;
        let engine = PhysicsEngine::new(&config);
        Self::spawn(config, engine)
    }

    /// Starts from an arbitrary state, e.g. a drone already in the air.
    pub fn start_with_state(config: SimulationConfig, state: DroneState) -> Result<Self, SimError> {
        config.validate()?;
        let engine = PhysicsEngine::with_state(&config, state);
        Self::spawn(config, engine)
    }

    fn spawn(config: SimulationConfig, engine: PhysicsEngine) -> Result<Self, SimError> {
        let emulator = SensorEmulator::from_config(&config)?;
        let shared = SharedState::new(emulator.snapshot());
        let (event_sender, events) = crossbeam_channel::bounded(config.runtime.event_capacity);

        let mut simulation = Self {
            commands: engine.command_sender(),
            shared: shared.clone(),
            initial_state: engine.snapshot(),
            events,
            stop: Arc::new(AtomicBool::new(false)),
            threads: Vec::with_capacity(2),
        };

        let stop = simulation.stop.clone();
        let physics_shared = shared.clone();
        let interval = config.runtime.physics_interval();
        let physics = thread::Builder::new()
            .name("physics".to_string())
            .spawn(move || physics_loop(engine, physics_shared, event_sender, interval, stop))
            .map_err(|e| SimError::RuntimeError(format!("failed to spawn physics thread: {}", e)))?;
        simulation.threads.push(physics);

        let stop = simulation.stop.clone();
        let interval = config.runtime.sensor_interval();
        // On failure the handle is dropped here, which stops the physics thread
        let sensors = thread::Builder::new()
            .name("sensors".to_string())
            .spawn(move || sensor_loop(emulator, shared, interval, stop))
            .map_err(|e| SimError::RuntimeError(format!("failed to spawn sensor thread: {}", e)))?;
        simulation.threads.push(sensors);

        info!(
            "Simulation started (physics every {} ms, sensors every {} ms)",
            config.runtime.physics_interval_ms, config.runtime.sensor_interval_ms
        );
        Ok(simulation)
    }

    pub fn takeoff(&self) {
        self.commands.takeoff();
    }

    pub fn land(&self) {
        self.commands.land();
    }

    pub fn auto_pilot(&self) {
        self.commands.auto_pilot();
    }

    pub fn emergency_stop(&self) {
        self.commands.emergency_stop();
    }

    pub fn set_target_point(&self, x: f64, y: f64, z: f64) {
        self.commands.set_target_point(x, y, z);
    }

    /// A cloneable sender for issuing commands from other threads.
    pub fn command_sender(&self) -> CommandSender {
        self.commands.clone()
    }

    /// Whole physics state as of the last committed tick.
    pub fn get_physics_snapshot(&self) -> DroneState {
        self.shared
            .physics_snapshot()
            .unwrap_or_else(|| self.initial_state.clone())
    }

    pub fn get_kinematics_snapshot(&self) -> DroneKinematics {
        self.get_physics_snapshot().kinematics
    }

    pub fn get_blade_snapshot(&self) -> [Blade; BLADE_COUNT] {
        self.get_physics_snapshot().blade_snapshot()
    }

    pub fn get_flight_mode(&self) -> FlightMode {
        self.get_physics_snapshot().mode
    }

    pub fn get_sensor_snapshot(&self) -> SensorReadings {
        self.shared.sensor_snapshot()
    }

    /// Discrete simulation events. Events are dropped while the buffer is
    /// full, so slow consumers miss events rather than stall physics.
    pub fn events(&self) -> &Receiver<SimEvent> {
        &self.events
    }

    pub fn is_running(&self) -> bool {
        !self.stop.load(Ordering::Acquire)
            && !self.threads.is_empty()
            && self.threads.iter().all(|handle| !handle.is_finished())
    }

    /// Signals both loops to stop and waits for them. Safe to call twice.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Release);
        for handle in self.threads.drain(..) {
            let name = handle.thread().name().unwrap_or("unnamed").to_string();
            if handle.join().is_err() {
                error!("Simulation thread '{}' panicked", name);
            }
        }
    }
}

impl Drop for Simulation {
    fn drop(&mut self) {
        self.stop();
    }
}
