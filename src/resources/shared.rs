use std::sync::{Arc, RwLock};

use crate::components::{DroneState, SensorReadings};

/// Latest published physics and sensor snapshots, shared across threads.
///
/// Writers swap in a finished value; readers clone. Locks are held only for
/// the swap or the clone, never across a tick.
#[derive(Debug, Clone, Default)]
pub struct SharedState {
    physics: Arc<RwLock<Option<DroneState>>>,
    sensors: Arc<RwLock<SensorReadings>>,
}

impl SharedState {
    pub fn new(initial_sensors: SensorReadings) -> Self {
        Self {
            physics: Arc::new(RwLock::new(None)),
            sensors: Arc::new(RwLock::new(initial_sensors)),
        }
    }

    pub fn publish_physics(&self, state: DroneState) {
        match self.physics.write() {
            Ok(mut guard) => *guard = Some(state),
            Err(poisoned) => *poisoned.into_inner() = Some(state),
        }
    }

    pub fn publish_sensors(&self, readings: SensorReadings) {
        match self.sensors.write() {
            Ok(mut guard) => *guard = readings,
            Err(poisoned) => *poisoned.into_inner() = readings,
        }
    }

    /// `None` until the physics loop has completed its first tick.
    pub fn physics_snapshot(&self) -> Option<DroneState> {
        match self.physics.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn sensor_snapshot(&self) -> SensorReadings {
        match self.sensors.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}
