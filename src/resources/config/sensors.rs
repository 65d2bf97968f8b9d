use serde::{Deserialize, Serialize};

use crate::utils::{ConfigError, DEFAULT_SATELLITES};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Latitude of the local origin [deg]
    pub origin_latitude: f64,
    /// Longitude of the local origin [deg]
    pub origin_longitude: f64,
    /// [hPa]
    pub sea_level_pressure: f64,
    /// Scale height of the simplified barometric formula [m]
    pub pressure_scale_height: f64,
    pub noise: NoiseConfig,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            origin_latitude: 55.7558,
            origin_longitude: 37.6173,
            sea_level_pressure: 1013.25,
            pressure_scale_height: 8430.0,
            noise: NoiseConfig::default(),
        }
    }
}

impl SensorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.origin_latitude.is_finite() && self.origin_latitude.abs() < 90.0) {
            return Err(ConfigError::ValidationError(format!(
                "origin latitude must lie strictly between the poles, got {}",
                self.origin_latitude
            )));
        }
        if !self.origin_longitude.is_finite() {
            return Err(ConfigError::ValidationError(
                "origin longitude must be finite".to_string(),
            ));
        }
        if !(self.pressure_scale_height.is_finite() && self.pressure_scale_height > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "pressure scale height must be positive, got {}",
                self.pressure_scale_height
            )));
        }
        if !self.sea_level_pressure.is_finite() {
            return Err(ConfigError::ValidationError(
                "sea level pressure must be finite".to_string(),
            ));
        }
        self.noise.validate()
    }
}

/// Standard deviations of the noise added to each reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    pub enabled: bool,
    /// [deg]
    pub gps_position_sigma: f64,
    /// [m]
    pub gps_altitude_sigma: f64,
    /// [m/s]
    pub gps_speed_sigma: f64,
    pub hdop_mean: f64,
    pub hdop_sigma: f64,
    pub hdop_min: f64,
    /// [hPa]
    pub pressure_sigma: f64,
    /// [°C]
    pub temperature_sigma: f64,
    /// [m/s^2]
    pub accel_xy_sigma: f64,
    /// [m/s^2]
    pub accel_z_sigma: f64,
    pub gyro_sigma: f64,
    pub satellites_min: u8,
    pub satellites_max: u8,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            gps_position_sigma: 1e-6,
            gps_altitude_sigma: 0.1,
            gps_speed_sigma: 0.05,
            hdop_mean: 1.2,
            hdop_sigma: 0.2,
            hdop_min: 0.8,
            pressure_sigma: 0.1,
            temperature_sigma: 0.1,
            accel_xy_sigma: 0.1,
            accel_z_sigma: 0.05,
            gyro_sigma: 0.5,
            satellites_min: 6,
            satellites_max: 12,
        }
    }
}

impl NoiseConfig {
    /// Deterministic sensors: every reading equals its modelled base value.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            satellites_min: DEFAULT_SATELLITES,
            satellites_max: DEFAULT_SATELLITES,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let sigmas = [
            ("gps_position_sigma", self.gps_position_sigma),
            ("gps_altitude_sigma", self.gps_altitude_sigma),
            ("gps_speed_sigma", self.gps_speed_sigma),
            ("hdop_sigma", self.hdop_sigma),
            ("pressure_sigma", self.pressure_sigma),
            ("temperature_sigma", self.temperature_sigma),
            ("accel_xy_sigma", self.accel_xy_sigma),
            ("accel_z_sigma", self.accel_z_sigma),
            ("gyro_sigma", self.gyro_sigma),
        ];
        for (name, sigma) in sigmas {
            if !(sigma.is_finite() && sigma >= 0.0) {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be a non-negative finite value, got {}",
                    name, sigma
                )));
            }
        }
        if !(self.hdop_mean.is_finite() && self.hdop_min.is_finite()) {
            return Err(ConfigError::ValidationError(
                "hdop mean and minimum must be finite".to_string(),
            ));
        }
        if self.satellites_min > self.satellites_max {
            return Err(ConfigError::ValidationError(format!(
                "satellites_min ({}) exceeds satellites_max ({})",
                self.satellites_min, self.satellites_max
            )));
        }
        Ok(())
    }
}
