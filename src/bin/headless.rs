use bevy::{app::ScheduleRunnerPlugin, log::LogPlugin, prelude::*};
use std::{env, time::Duration};

use rotorsim::{
    components::FlightMode,
    plugins::SimEventKind,
    resources::SimulationConfig,
    runtime::Simulation,
};

/// How often the monitor app wakes up to poll the simulation
const MONITOR_INTERVAL: Duration = Duration::from_millis(100);
/// Seconds between status reports
const REPORT_PERIOD: f32 = 1.0;
/// Give up on reaching the target after this many seconds
const TRANSIT_TIMEOUT: f32 = 30.0;
/// Give up waiting for touchdown after this many seconds
const LANDING_TIMEOUT: f32 = 15.0;

#[derive(Resource)]
struct SimulationHandle(Simulation);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MissionStage {
    Start,
    Climbing,
    Transit,
    Landing,
    Done,
}

#[derive(Resource)]
struct Mission {
    stage: MissionStage,
    target: (f64, f64, f64),
    stage_timer: Timer,
    takeoff_complete: bool,
    target_reached: bool,
    touchdown: bool,
    events_seen: usize,
}

impl Mission {
    fn new(target: (f64, f64, f64)) -> Self {
        Self {
            stage: MissionStage::Start,
            target,
            stage_timer: Timer::from_seconds(0.0, TimerMode::Once),
            takeoff_complete: false,
            target_reached: false,
            touchdown: false,
            events_seen: 0,
        }
    }

    fn enter(&mut self, stage: MissionStage, timeout: f32) {
        info!("Mission stage {:?} -> {:?}", self.stage, stage);
        self.stage = stage;
        self.stage_timer = Timer::from_seconds(timeout, TimerMode::Once);
    }
}

#[derive(Resource)]
struct ReportTimer(Timer);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match env::args().nth(1) {
        Some(path) => SimulationConfig::load(&path)?,
        None => SimulationConfig::default(),
    };
    let target = config.physics.target_point;

    let simulation = Simulation::start(config)?;

    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(MONITOR_INTERVAL)),
        LogPlugin::default(),
    ))
    .insert_resource(SimulationHandle(simulation))
    .insert_resource(Mission::new((target.x, target.y, target.z)))
    .insert_resource(ReportTimer(Timer::from_seconds(
        REPORT_PERIOD,
        TimerMode::Repeating,
    )))
    .add_systems(Update, (collect_events, advance_mission, report_status).chain());

    app.run();

    if let Some(SimulationHandle(mut simulation)) =
        app.world_mut().remove_resource::<SimulationHandle>()
    {
        simulation.stop();
        let sensors = simulation.get_sensor_snapshot();
        println!("{}", serde_json::to_string_pretty(&sensors)?);
    }

    Ok(())
}

fn collect_events(handle: Res<SimulationHandle>, mut mission: ResMut<Mission>) {
    for event in handle.0.events().try_iter() {
        mission.events_seen += 1;
        match event.kind {
            SimEventKind::TakeoffComplete { .. } => mission.takeoff_complete = true,
            SimEventKind::TargetReached { .. } => mission.target_reached = true,
            SimEventKind::Touchdown => mission.touchdown = true,
            _ => {}
        }
    }
}

fn advance_mission(
    handle: Res<SimulationHandle>,
    mut mission: ResMut<Mission>,
    time: Res<Time>,
    mut exit: EventWriter<AppExit>,
) {
    let simulation = &handle.0;
    mission.stage_timer.tick(time.delta());

    if !simulation.is_running() {
        error!("Simulation threads stopped unexpectedly");
        exit.send(AppExit::error());
        return;
    }

    match mission.stage {
        MissionStage::Start => {
            simulation.takeoff();
            mission.enter(MissionStage::Climbing, TRANSIT_TIMEOUT);
        }
        MissionStage::Climbing => {
            if mission.takeoff_complete {
                let (x, y, z) = mission.target;
                simulation.set_target_point(x, y, z);
                simulation.auto_pilot();
                mission.enter(MissionStage::Transit, TRANSIT_TIMEOUT);
            } else if mission.stage_timer.finished() {
                warn!("Takeoff did not complete, landing");
                simulation.land();
                mission.enter(MissionStage::Landing, LANDING_TIMEOUT);
            }
        }
        MissionStage::Transit => {
            if mission.target_reached {
                simulation.land();
                mission.enter(MissionStage::Landing, LANDING_TIMEOUT);
            } else if mission.stage_timer.finished() {
                let kinematics = simulation.get_kinematics_snapshot();
                warn!(
                    "Target not reached after {} s, {:.1} m short, landing",
                    TRANSIT_TIMEOUT,
                    kinematics.distance_to_target()
                );
                simulation.land();
                mission.enter(MissionStage::Landing, LANDING_TIMEOUT);
            }
        }
        MissionStage::Landing => {
            if mission.touchdown || simulation.get_flight_mode() == FlightMode::Stopped {
                mission.enter(MissionStage::Done, 0.0);
            } else if mission.stage_timer.finished() {
                warn!(
                    "No touchdown after {} s, altitude {:.1} m",
                    LANDING_TIMEOUT,
                    simulation.get_kinematics_snapshot().position.z
                );
                mission.enter(MissionStage::Done, 0.0);
            }
        }
        MissionStage::Done => {
            info!("Mission finished, {} events observed", mission.events_seen);
            exit.send(AppExit::Success);
        }
    }
}

fn report_status(handle: Res<SimulationHandle>, time: Res<Time>, mut timer: ResMut<ReportTimer>) {
    if !timer.0.tick(time.delta()).just_finished() {
        return;
    }

    let state = handle.0.get_physics_snapshot();
    let sensors = handle.0.get_sensor_snapshot();
    let kinematics = &state.kinematics;
    info!(
        "[{}] tick {} | pos ({:.1}, {:.1}, {:.1}) | {:.0} rpm | battery {:.1}% | signal {:.0}%",
        state.mode.label(),
        state.tick,
        kinematics.position.x,
        kinematics.position.y,
        kinematics.position.z,
        state.blades.total_rpm() / state.blades.blades().len() as f64,
        kinematics.battery_level,
        kinematics.signal_strength,
    );
    info!(
        "GPS {} ({} sats, hdop {:.2}) | {}",
        sensors.gps.to_degrees_minutes(),
        sensors.gps.satellites,
        sensors.gps.hdop,
        sensors.barometer.summary(),
    );
}
