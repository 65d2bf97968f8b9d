use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::utils::ConfigError;

/// Pacing of the threaded runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub physics_interval_ms: u64,
    pub sensor_interval_ms: u64,
    /// Events buffered for consumers before new ones are dropped
    pub event_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            physics_interval_ms: 100,
            sensor_interval_ms: 100,
            event_capacity: 1024,
        }
    }
}

impl RuntimeConfig {
    pub fn physics_interval(&self) -> Duration {
        Duration::from_millis(self.physics_interval_ms)
    }

    pub fn sensor_interval(&self) -> Duration {
        Duration::from_millis(self.sensor_interval_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.physics_interval_ms == 0 || self.sensor_interval_ms == 0 {
            return Err(ConfigError::ValidationError(
                "loop intervals must be at least 1 ms".to_string(),
            ));
        }
        if self.event_capacity == 0 {
            return Err(ConfigError::ValidationError(
                "event capacity must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
