use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::resources::NoiseConfig;
use crate::utils::ConfigError;

/// Gaussian perturbations for every sensor channel.
///
/// When disabled every sample is exactly zero and hdop sits at its mean, so
/// readings equal their modelled base values.
#[derive(Debug, Clone)]
pub struct SensorNoise {
    enabled: bool,
    gps_position: Normal<f64>,
    gps_altitude: Normal<f64>,
    gps_speed: Normal<f64>,
    hdop: Normal<f64>,
    hdop_mean: f64,
    hdop_min: f64,
    pressure: Normal<f64>,
    temperature: Normal<f64>,
    accel_xy: Normal<f64>,
    accel_z: Normal<f64>,
    gyro: Normal<f64>,
    satellites_min: u8,
    satellites_max: u8,
}

fn normal(name: &str, mean: f64, sigma: f64) -> Result<Normal<f64>, ConfigError> {
    Normal::new(mean, sigma)
        .map_err(|e| ConfigError::ValidationError(format!("invalid {} noise: {}", name, e)))
}

impl SensorNoise {
    pub fn new(config: &NoiseConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            enabled: config.enabled,
            gps_position: normal("gps position", 0.0, config.gps_position_sigma)?,
            gps_altitude: normal("gps altitude", 0.0, config.gps_altitude_sigma)?,
            gps_speed: normal("gps speed", 0.0, config.gps_speed_sigma)?,
            hdop: normal("hdop", config.hdop_mean, config.hdop_sigma)?,
            hdop_mean: config.hdop_mean,
            hdop_min: config.hdop_min,
            pressure: normal("pressure", 0.0, config.pressure_sigma)?,
            temperature: normal("temperature", 0.0, config.temperature_sigma)?,
            accel_xy: normal("horizontal accelerometer", 0.0, config.accel_xy_sigma)?,
            accel_z: normal("vertical accelerometer", 0.0, config.accel_z_sigma)?,
            gyro: normal("gyroscope", 0.0, config.gyro_sigma)?,
            satellites_min: config.satellites_min,
            satellites_max: config.satellites_max,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn sample<R: Rng + ?Sized>(&self, distribution: &Normal<f64>, rng: &mut R) -> f64 {
        if self.enabled {
            distribution.sample(rng)
        } else {
            0.0
        }
    }

    /// [deg]
    pub fn gps_position<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.sample(&self.gps_position, rng)
    }

    pub fn gps_altitude<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.sample(&self.gps_altitude, rng)
    }

    pub fn gps_speed<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.sample(&self.gps_speed, rng)
    }

    pub fn pressure<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.sample(&self.pressure, rng)
    }

    pub fn temperature<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.sample(&self.temperature, rng)
    }

    pub fn accel_xy<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.sample(&self.accel_xy, rng)
    }

    pub fn accel_z<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.sample(&self.accel_z, rng)
    }

    pub fn gyro<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.sample(&self.gyro, rng)
    }

    /// Resampled around the configured mean, never below the floor.
    pub fn hdop<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let hdop = if self.enabled {
            self.hdop.sample(rng)
        } else {
            self.hdop_mean
        };
        hdop.max(self.hdop_min)
    }

    pub fn satellites<R: Rng + ?Sized>(&self, rng: &mut R) -> u8 {
        rng.gen_range(self.satellites_min..=self.satellites_max)
    }
}
