use bevy::prelude::*;
use crossbeam_channel::{Sender, TrySendError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::plugins::SimEvent;
use crate::resources::SharedState;
use crate::systems::{PhysicsEngine, SensorEmulator};

/// Runs `body` once per `interval` until `stop` is raised. The flag is
/// checked before every iteration, so an iteration is never cut short.
pub(crate) fn run_fixed_interval<F: FnMut()>(interval: Duration, stop: &AtomicBool, mut body: F) {
    while !stop.load(Ordering::Acquire) {
        let started = Instant::now();
        body();
        if let Some(remaining) = interval.checked_sub(started.elapsed()) {
            thread::sleep(remaining);
        }
    }
}

/// Single writer of the physics snapshot.
pub(crate) fn physics_loop(
    mut engine: PhysicsEngine,
    shared: SharedState,
    events: Sender<SimEvent>,
    interval: Duration,
    stop: Arc<AtomicBool>,
) {
    info!("Physics loop started, {:?} per tick", interval);

    run_fixed_interval(interval, &stop, || match engine.tick() {
        Ok(batch) => {
            shared.publish_physics(engine.snapshot());
            for event in batch {
                match events.try_send(event) {
                    Ok(()) | Err(TrySendError::Disconnected(_)) => {}
                    Err(TrySendError::Full(event)) => {
                        debug!("Event consumer lagging, dropping {}", event);
                    }
                }
            }
        }
        Err(e) => {
            error!("Skipping physics tick {}: {}", engine.tick_count() + 1, e);
        }
    });

    info!("Physics loop stopped after {} ticks", engine.tick_count());
}

/// Reads the latest physics snapshot and publishes fresh readings.
pub(crate) fn sensor_loop(
    mut emulator: SensorEmulator,
    shared: SharedState,
    interval: Duration,
    stop: Arc<AtomicBool>,
) {
    info!("Sensor loop started, {:?} per update", interval);

    run_fixed_interval(interval, &stop, || {
        let physics = shared.physics_snapshot();
        let readings = emulator.update(physics.as_ref()).clone();
        shared.publish_sensors(readings);
    });

    info!("Sensor loop stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_exits_on_stop() {
        let stop = AtomicBool::new(false);
        let mut iterations = 0;
        run_fixed_interval(Duration::from_millis(1), &stop, || {
            iterations += 1;
            if iterations == 3 {
                stop.store(true, Ordering::Release);
            }
        });
        assert_eq!(iterations, 3);
    }

    #[test]
    fn test_loop_never_starts_when_stopped() {
        let stop = AtomicBool::new(true);
        let mut iterations = 0;
        run_fixed_interval(Duration::from_millis(1), &stop, || iterations += 1);
        assert_eq!(iterations, 0);
    }
}
