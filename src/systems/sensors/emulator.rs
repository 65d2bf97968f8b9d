use bevy::prelude::*;
use chrono::Utc;
use rand_chacha::ChaCha8Rng;

use super::noise::SensorNoise;
use crate::components::{DroneKinematics, DroneState, ImuReading, SensorReadings};
use crate::resources::{SensorConfig, SimulationConfig};
use crate::systems::physics::PhysicsEngine;
use crate::utils::{
    ConfigError, GPS_3D_FIX, ISA_LAPSE_RATE, ISA_SEA_LEVEL_TEMP_C, METERS_PER_DEGREE_LATITUDE,
    MIN_COURSE_SPEED, RngManager, STANDARD_GRAVITY,
};

/// Derives GPS, barometer and IMU readings from physics snapshots.
#[derive(Resource, Debug)]
pub struct SensorEmulator {
    config: SensorConfig,
    noise: SensorNoise,
    rng: ChaCha8Rng,
    readings: SensorReadings,
}

impl SensorEmulator {
    pub fn new(config: &SensorConfig, rng: ChaCha8Rng) -> Result<Self, ConfigError> {
        Ok(Self {
            noise: SensorNoise::new(&config.noise)?,
            readings: SensorReadings::new(
                config.origin_latitude,
                config.origin_longitude,
                config.sea_level_pressure,
            ),
            config: config.clone(),
            rng,
        })
    }

    /// Uses the "sensors" stream of the configured master seed.
    pub fn from_config(config: &SimulationConfig) -> Result<Self, ConfigError> {
        let rng = RngManager::from_optional_seed(config.seed).get_rng("sensors");
        Self::new(&config.sensors, rng)
    }

    pub fn readings(&self) -> &SensorReadings {
        &self.readings
    }

    pub fn snapshot(&self) -> SensorReadings {
        self.readings.clone()
    }

    /// Rebuilds the readings from `physics`, or refreshes only the IMU
    /// around a stationary baseline when no physics snapshot exists yet.
    pub fn update(&mut self, physics: Option<&DroneState>) -> &SensorReadings {
        match physics {
            Some(state) => self.derive_from(state),
            None => self.idle_update(),
        }
        &self.readings
    }

    fn derive_from(&mut self, state: &DroneState) {
        let now = Utc::now();
        let kinematics = &state.kinematics;

        self.update_gps(kinematics);
        self.update_barometer(kinematics);
        self.readings.imu = self.imu_reading(kinematics.orientation.z);
        self.apply_noise();

        self.readings.gps.timestamp = now;
        self.readings.barometer.timestamp = now;
        self.readings.source_tick = Some(state.tick);
    }

    fn idle_update(&mut self) {
        let now = Utc::now();
        self.readings.imu = self.imu_reading(0.0);
        self.readings.gps.timestamp = now;
        self.readings.barometer.timestamp = now;
    }

    fn update_gps(&mut self, kinematics: &DroneKinematics) {
        let origin_latitude = self.config.origin_latitude;
        let position = kinematics.position;
        let speed = kinematics.horizontal_speed();

        let gps = &mut self.readings.gps;
        gps.latitude = origin_latitude + position.x / METERS_PER_DEGREE_LATITUDE;
        gps.longitude = self.config.origin_longitude
            + position.y / (METERS_PER_DEGREE_LATITUDE * origin_latitude.to_radians().cos());
        gps.altitude = position.z;
        gps.speed = speed;
        gps.course = course_over_ground(kinematics.velocity.x, kinematics.velocity.y);
        gps.fix_quality = GPS_3D_FIX;
    }

    fn update_barometer(&mut self, kinematics: &DroneKinematics) {
        let altitude = kinematics.position.z;
        let barometer = &mut self.readings.barometer;
        barometer.pressure =
            self.config.sea_level_pressure * (-altitude / self.config.pressure_scale_height).exp();
        barometer.temperature = ISA_SEA_LEVEL_TEMP_C - altitude * ISA_LAPSE_RATE;
        barometer.altitude = altitude;
        barometer.sea_level_pressure = self.config.sea_level_pressure;
        barometer.vertical_speed = kinematics.velocity.z;
    }

    /// Synthetic IMU: noise around a level, stationary airframe. The
    /// magnetometer follows yaw [deg].
    fn imu_reading(&mut self, yaw: f64) -> ImuReading {
        let rng = &mut self.rng;
        let yaw = yaw.to_radians();
        ImuReading {
            accel_x: self.noise.accel_xy(rng),
            accel_y: self.noise.accel_xy(rng),
            accel_z: STANDARD_GRAVITY + self.noise.accel_z(rng),
            gyro_x: self.noise.gyro(rng),
            gyro_y: self.noise.gyro(rng),
            gyro_z: self.noise.gyro(rng),
            mag_x: yaw.cos(),
            mag_y: yaw.sin(),
            mag_z: 0.0,
        }
    }

    fn apply_noise(&mut self) {
        let rng = &mut self.rng;
        let noise = &self.noise;

        let gps = &mut self.readings.gps;
        gps.latitude += noise.gps_position(rng);
        gps.longitude += noise.gps_position(rng);
        gps.altitude += noise.gps_altitude(rng);
        gps.speed += noise.gps_speed(rng);
        gps.hdop = noise.hdop(rng);
        gps.satellites = noise.satellites(rng);

        let barometer = &mut self.readings.barometer;
        barometer.pressure += noise.pressure(rng);
        barometer.temperature += noise.temperature(rng);
    }
}

/// Course over ground [deg] in [0, 360), 0 when nearly stationary.
pub fn course_over_ground(vx: f64, vy: f64) -> f64 {
    if vx.hypot(vy) > MIN_COURSE_SPEED {
        (90.0 - vy.atan2(vx).to_degrees()).rem_euclid(360.0)
    } else {
        0.0
    }
}

/// Refreshes the sensor readings from the committed physics state.
pub fn sensor_emulator_system(engine: Res<PhysicsEngine>, mut emulator: ResMut<SensorEmulator>) {
    emulator.update(Some(engine.state()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::FlightMode;
    use crate::resources::NoiseConfig;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;
    use rand::SeedableRng;

    fn quiet_emulator() -> SensorEmulator {
        let config = SensorConfig {
            noise: NoiseConfig::disabled(),
            ..Default::default()
        };
        SensorEmulator::new(&config, ChaCha8Rng::seed_from_u64(11)).unwrap()
    }

    fn state_at(position: Vector3<f64>, velocity: Vector3<f64>) -> DroneState {
        let mut state = DroneState::at_position(position, FlightMode::Hovering, 3000.0);
        state.kinematics.velocity = velocity;
        state.tick = 42;
        state
    }

    #[test]
    fn test_barometer_at_altitude() {
        let mut emulator = quiet_emulator();
        let state = state_at(Vector3::new(0.0, 0.0, 100.0), Vector3::new(0.0, 0.0, -0.5));
        let readings = emulator.update(Some(&state));

        assert_relative_eq!(
            readings.barometer.pressure,
            1013.25 * (-100.0f64 / 8430.0).exp(),
            epsilon = 1e-9
        );
        assert_relative_eq!(readings.barometer.temperature, 14.35, epsilon = 1e-9);
        assert_eq!(readings.barometer.altitude, 100.0);
        assert_eq!(readings.barometer.vertical_speed, -0.5);
        assert_eq!(readings.gps.altitude, 100.0);
        assert_eq!(readings.source_tick, Some(42));
    }

    #[test]
    fn test_flat_earth_offset() {
        let mut emulator = quiet_emulator();
        let state = state_at(Vector3::new(111.32, 0.0, 0.0), Vector3::zeros());
        let readings = emulator.update(Some(&state));

        assert_relative_eq!(readings.gps.latitude, 55.7558 + 0.001, epsilon = 1e-12);
        assert_relative_eq!(readings.gps.longitude, 37.6173, epsilon = 1e-12);

        let east = 111.32 * 55.7558f64.to_radians().cos();
        let state = state_at(Vector3::new(0.0, east, 0.0), Vector3::zeros());
        let readings = emulator.update(Some(&state));
        assert_relative_eq!(readings.gps.longitude, 37.6173 + 0.001, epsilon = 1e-12);
    }

    #[test]
    fn test_course_over_ground() {
        assert_eq!(course_over_ground(0.05, 0.0), 0.0);
        assert_relative_eq!(course_over_ground(1.0, 0.0), 90.0);
        assert_relative_eq!(course_over_ground(0.0, 1.0), 0.0);
        assert_relative_eq!(course_over_ground(-1.0, 0.0), 270.0);
        assert_relative_eq!(course_over_ground(0.0, -1.0), 180.0);
    }

    #[test]
    fn test_speed_and_magnetometer() {
        let mut emulator = quiet_emulator();
        let mut state = state_at(Vector3::new(0.0, 0.0, 10.0), Vector3::new(3.0, 4.0, 0.0));
        state.kinematics.orientation.z = 90.0;
        let readings = emulator.update(Some(&state));

        assert_relative_eq!(readings.gps.speed, 5.0);
        assert_relative_eq!(readings.imu.mag_x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(readings.imu.mag_y, 1.0);
        assert_eq!(readings.imu.accel_z, STANDARD_GRAVITY);
        assert_eq!(readings.gps.fix_quality, 3);
        assert_eq!(readings.gps.satellites, 8);
        assert_eq!(readings.gps.hdop, 1.2);
    }

    #[test]
    fn test_fallback_only_touches_imu() {
        let mut emulator = SensorEmulator::from_config(&SimulationConfig::default().with_seed(5))
            .unwrap();
        let before = emulator.snapshot();

        let readings = emulator.update(None).clone();

        assert_eq!(readings.source_tick, None);
        assert_eq!(readings.gps.latitude, before.gps.latitude);
        assert_eq!(readings.gps.satellites, before.gps.satellites);
        assert_eq!(readings.barometer.pressure, before.barometer.pressure);
        assert_ne!(readings.imu, before.imu);
        assert!(readings.gps.timestamp >= before.gps.timestamp);
    }

    #[test]
    fn test_noisy_readings_stay_plausible() {
        let mut emulator = SensorEmulator::from_config(&SimulationConfig::default().with_seed(5))
            .unwrap();
        let state = state_at(Vector3::new(0.0, 0.0, 10.0), Vector3::zeros());

        let mut speed_sum = 0.0;
        let mut saw_negative_speed = false;
        for _ in 0..200 {
            let readings = emulator.update(Some(&state));
            assert!((6..=12).contains(&readings.gps.satellites));
            assert!(readings.gps.hdop >= 0.8);
            assert!(readings.gps.speed.abs() < 0.5);
            assert!((readings.gps.altitude - 10.0).abs() < 1.0);
            speed_sum += readings.gps.speed;
            saw_negative_speed |= readings.gps.speed < 0.0;
        }

        // Hovering speed noise is unbiased
        assert!(saw_negative_speed);
        assert!((speed_sum / 200.0).abs() < 0.02);
    }

    #[test]
    fn test_same_seed_same_noise() {
        let config = SimulationConfig::default().with_seed(9);
        let state = state_at(Vector3::new(5.0, 5.0, 20.0), Vector3::new(1.0, 0.0, 0.0));

        let mut first = SensorEmulator::from_config(&config).unwrap();
        let mut second = SensorEmulator::from_config(&config).unwrap();
        let a = first.update(Some(&state)).clone();
        let b = second.update(Some(&state)).clone();

        assert_eq!(a.barometer.pressure, b.barometer.pressure);
        assert_eq!(a.gps.latitude, b.gps.latitude);
        assert_eq!(a.imu, b.imu);
    }
}
