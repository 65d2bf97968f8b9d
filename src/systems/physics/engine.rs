use bevy::prelude::*;
use nalgebra::Vector3;
use rand_chacha::ChaCha8Rng;

use super::control::{autopilot, total_thrust, vertical_thrust};
use super::integrator::{clamp_to_ground, halt_motion, integrate_motion, update_flight_statistics};
use crate::components::{
    BladeArray, BladeStatus, DroneKinematics, DroneState, FlightCommand, FlightMode,
    FlightTrigger,
};
use crate::plugins::{SimEvent, SimEventKind};
use crate::resources::{CommandQueue, CommandSender, PhysicsConfig, SimulationConfig};
use crate::systems::blades::update_blades;
use crate::utils::{RngManager, SimError};

/// Owns the drone state and advances it one fixed tick at a time.
///
/// Commands are queued through [`CommandSender`]s and applied at the start
/// of the next tick. A tick is computed on a copy of the state and committed
/// only if every value stays finite.
#[derive(Resource, Debug)]
pub struct PhysicsEngine {
    state: DroneState,
    config: PhysicsConfig,
    commands: CommandQueue,
    rng: ChaCha8Rng,
    /// Events raised by commands, handed out with the next committed tick
    pending_events: Vec<SimEvent>,
}

impl PhysicsEngine {
    /// Drone on the ground at the origin, at rest.
    pub fn new(config: &SimulationConfig) -> Self {
        let state = DroneState {
            kinematics: DroneKinematics::default().with_target(config.physics.target_point),
            ..Default::default()
        };
        Self::with_state(config, state)
    }

    /// Starts from an arbitrary state, e.g. a drone already in the air.
    pub fn with_state(config: &SimulationConfig, state: DroneState) -> Self {
        if !config.physics.is_nominal_timestep() {
            warn!(
                "Physics timestep {} s differs from 0.1 s, ramp and drag constants are per tick",
                config.physics.timestep
            );
        }

        let rng = RngManager::from_optional_seed(config.seed).get_rng("blades");
        Self {
            state,
            config: config.physics.clone(),
            commands: CommandQueue::default(),
            rng,
            pending_events: Vec::new(),
        }
    }

    pub fn command_sender(&self) -> CommandSender {
        self.commands.sender()
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn state(&self) -> &DroneState {
        &self.state
    }

    pub fn snapshot(&self) -> DroneState {
        self.state.clone()
    }

    pub fn kinematics(&self) -> &DroneKinematics {
        &self.state.kinematics
    }

    pub fn blades(&self) -> &BladeArray {
        &self.state.blades
    }

    pub fn mode(&self) -> FlightMode {
        self.state.mode
    }

    /// Number of committed ticks.
    pub fn tick_count(&self) -> u64 {
        self.state.tick
    }

    /// Applies every queued command to the committed state, in order.
    ///
    /// Called at the start of every tick; calling it directly makes commands
    /// take effect without advancing time.
    pub fn drain_commands(&mut self) {
        let commands: Vec<FlightCommand> = self.commands.drain().collect();
        for command in commands {
            self.apply_command(command);
        }
    }

    fn apply_command(&mut self, command: FlightCommand) {
        let tick = self.state.tick + 1;

        if let FlightCommand::SetTargetPoint(target) = command {
            if !target.iter().all(|v| v.is_finite()) {
                debug!("Ignoring non-finite target point {:?}", target);
                return;
            }
            self.state.kinematics.target_point = target;
            debug!(
                "Target point set to ({:.1}, {:.1}, {:.1})",
                target.x, target.y, target.z
            );
            return;
        }

        let altitude_ok = self.state.kinematics.position.z <= self.config.takeoff_max_altitude;
        let Some(next_mode) = self.state.mode.on_command(&command, altitude_ok) else {
            debug!("Ignoring {:?} in mode {}", command, self.state.mode);
            return;
        };

        let mut events = Vec::new();
        match command {
            FlightCommand::Takeoff => {
                self.state
                    .blades
                    .command_all(self.config.takeoff_rpm, BladeStatus::SpinningUp);
            }
            FlightCommand::Land => {
                self.state.blades.command_all(0.0, BladeStatus::Landing);
            }
            FlightCommand::AutoPilot => {
                let target = self.state.kinematics.target_point;
                info!(
                    "Autopilot engaged, target ({:.1}, {:.1}, {:.1}), distance {:.1} m",
                    target.x,
                    target.y,
                    target.z,
                    self.state.kinematics.distance_to_target()
                );
            }
            FlightCommand::EmergencyStop => {
                self.state.blades.halt_all();
                halt_motion(&mut self.state.kinematics);
                events.push(SimEvent::new(tick, SimEventKind::EmergencyStop));
            }
            FlightCommand::SetTargetPoint(_) => {}
        }
        change_mode(&mut self.state, next_mode, tick, &mut events);

        for event in &events {
            info!("{}", event);
        }
        self.pending_events.extend(events);
    }

    /// Advances the simulation by one timestep.
    ///
    /// # Returns
    /// The events raised by queued commands and by this tick, or an error if
    /// the tick produced a non-finite state. A failed tick leaves the state
    /// untouched; the commands drained for it stay applied.
    pub fn tick(&mut self) -> Result<Vec<SimEvent>, SimError> {
        self.drain_commands();

        let mut next = self.state.clone();
        let mut rng = self.rng.clone();
        let step_events = step(&mut next, &self.config, &mut rng);

        if !next.is_finite() {
            return Err(SimError::PhysicsError(format!(
                "tick {} produced a non-finite state (position {:?}, velocity {:?})",
                next.tick, next.kinematics.position, next.kinematics.velocity
            )));
        }

        for event in &step_events {
            info!("{}", event);
        }

        self.state = next;
        self.rng = rng;
        let mut events = std::mem::take(&mut self.pending_events);
        events.extend(step_events);
        Ok(events)
    }
}

/// Ticks the engine once per fixed update and forwards its events.
///
/// A failed tick is logged and skipped; the next fixed update retries from
/// the last committed state.
pub fn physics_engine_system(
    mut engine: ResMut<PhysicsEngine>,
    mut sim_events: EventWriter<SimEvent>,
) {
    match engine.tick() {
        Ok(events) => {
            sim_events.send_batch(events);
        }
        Err(e) => {
            error!("Skipping physics tick {}: {}", engine.tick_count() + 1, e);
        }
    }
}

/// One tick of blade ramping, control laws, integration and mode triggers.
fn step(state: &mut DroneState, config: &PhysicsConfig, rng: &mut ChaCha8Rng) -> Vec<SimEvent> {
    let dt = config.timestep;
    let tick = state.tick + 1;

    let mut events = update_blades(&mut state.blades, dt, tick, rng);

    let thrust = total_thrust(state.blades.total_rpm());
    let kinematics = &mut state.kinematics;
    kinematics.thrust = Vector3::new(
        0.0,
        0.0,
        vertical_thrust(kinematics.position.z, thrust, config.hold_altitude),
    );

    if state.mode == FlightMode::AutoPilot {
        let output = autopilot(&kinematics.position, &kinematics.target_point);
        if let Some((thrust_x, thrust_y)) = output.horizontal {
            kinematics.thrust.x = thrust_x;
            kinematics.thrust.y = thrust_y;
        }
        kinematics.thrust.z += output.vertical_correction;

        if output.arrived && trigger(state, FlightTrigger::TargetReached, tick, &mut events) {
            events.push(SimEvent::new(
                tick,
                SimEventKind::TargetReached {
                    position: state.kinematics.position,
                },
            ));
        }
    }

    integrate_motion(&mut state.kinematics, dt);

    if clamp_to_ground(&mut state.kinematics)
        && trigger(state, FlightTrigger::Touchdown, tick, &mut events)
    {
        events.push(SimEvent::new(tick, SimEventKind::Touchdown));
    }

    let altitude = state.kinematics.position.z;
    if altitude > config.takeoff_complete_altitude
        && trigger(state, FlightTrigger::ClimbedOut, tick, &mut events)
    {
        events.push(SimEvent::new(tick, SimEventKind::TakeoffComplete { altitude }));
    }

    let position = state.kinematics.position;
    state.kinematics.trajectory.push(position);
    update_flight_statistics(&mut state.kinematics, dt);

    state.tick = tick;
    events
}

/// Fires a tick trigger, returns true if the mode changed.
fn trigger(
    state: &mut DroneState,
    trigger: FlightTrigger,
    tick: u64,
    events: &mut Vec<SimEvent>,
) -> bool {
    match state.mode.on_trigger(trigger) {
        Some(next_mode) => change_mode(state, next_mode, tick, events),
        None => false,
    }
}

fn change_mode(
    state: &mut DroneState,
    next_mode: FlightMode,
    tick: u64,
    events: &mut Vec<SimEvent>,
) -> bool {
    if state.mode == next_mode {
        return false;
    }
    events.push(SimEvent::new(
        tick,
        SimEventKind::ModeChanged {
            from: state.mode,
            to: next_mode,
        },
    ));
    state.mode = next_mode;
    true
}
