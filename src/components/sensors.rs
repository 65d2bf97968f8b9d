use bevy::prelude::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::{DEFAULT_SATELLITES, GPS_3D_FIX, ISA_SEA_LEVEL_TEMP_C, STANDARD_GRAVITY};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpsReading {
    /// [deg]
    pub latitude: f64,
    /// [deg]
    pub longitude: f64,
    /// [m]
    pub altitude: f64,
    /// Ground speed [m/s]
    pub speed: f64,
    /// Course over ground [deg], 0 when nearly stationary
    pub course: f64,
    pub satellites: u8,
    pub hdop: f64,
    pub fix_quality: u8,
    pub timestamp: DateTime<Utc>,
}

impl GpsReading {
    pub fn at_origin(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude: 0.0,
            speed: 0.0,
            course: 0.0,
            satellites: DEFAULT_SATELLITES,
            hdop: 1.2,
            fix_quality: GPS_3D_FIX,
            timestamp: Utc::now(),
        }
    }

    /// Position as degrees and decimal minutes, e.g. `55°45.3480'N, 37°37.0380'E`.
    pub fn to_degrees_minutes(&self) -> String {
        fn split(value: f64) -> (f64, f64) {
            let value = value.abs();
            let degrees = value.trunc();
            (degrees, (value - degrees) * 60.0)
        }

        let (lat_deg, lat_min) = split(self.latitude);
        let (lon_deg, lon_min) = split(self.longitude);
        let ns = if self.latitude >= 0.0 { 'N' } else { 'S' };
        let ew = if self.longitude >= 0.0 { 'E' } else { 'W' };

        format!(
            "{}°{:.4}'{}, {}°{:.4}'{}",
            lat_deg, lat_min, ns, lon_deg, lon_min, ew
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarometerReading {
    /// [hPa]
    pub pressure: f64,
    /// [°C]
    pub temperature: f64,
    /// [m]
    pub altitude: f64,
    /// [hPa]
    pub sea_level_pressure: f64,
    /// [m/s]
    pub vertical_speed: f64,
    pub timestamp: DateTime<Utc>,
}

impl BarometerReading {
    pub fn at_sea_level(sea_level_pressure: f64) -> Self {
        Self {
            pressure: sea_level_pressure,
            temperature: ISA_SEA_LEVEL_TEMP_C,
            altitude: 0.0,
            sea_level_pressure,
            vertical_speed: 0.0,
            timestamp: Utc::now(),
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Pressure: {:.1} hPa | Temperature: {:.1}°C | Altitude: {:.1} m",
            self.pressure, self.temperature, self.altitude
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImuReading {
    /// Accelerometer [m/s^2]
    pub accel_x: f64,
    pub accel_y: f64,
    pub accel_z: f64,
    /// Gyroscope [deg/s]
    pub gyro_x: f64,
    pub gyro_y: f64,
    pub gyro_z: f64,
    /// Magnetometer, unit heading vector
    pub mag_x: f64,
    pub mag_y: f64,
    pub mag_z: f64,
}

impl Default for ImuReading {
    /// Level and stationary, nose north.
    fn default() -> Self {
        Self {
            accel_x: 0.0,
            accel_y: 0.0,
            accel_z: STANDARD_GRAVITY,
            gyro_x: 0.0,
            gyro_y: 0.0,
            gyro_z: 0.0,
            mag_x: 1.0,
            mag_y: 0.0,
            mag_z: 0.0,
        }
    }
}

/// Synthetic sensor suite output, rebuilt every sensor tick.
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReadings {
    pub gps: GpsReading,
    pub barometer: BarometerReading,
    pub imu: ImuReading,
    /// Physics tick the readings were derived from, `None` before the first
    /// physics snapshot.
    pub source_tick: Option<u64>,
}

impl SensorReadings {
    pub fn new(origin_latitude: f64, origin_longitude: f64, sea_level_pressure: f64) -> Self {
        Self {
            gps: GpsReading::at_origin(origin_latitude, origin_longitude),
            barometer: BarometerReading::at_sea_level(sea_level_pressure),
            imu: ImuReading::default(),
            source_tick: None,
        }
    }
}

impl Default for SensorReadings {
    fn default() -> Self {
        Self::new(55.7558, 37.6173, 1013.25)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degrees_minutes() {
        let gps = GpsReading::at_origin(55.7558, 37.6173);
        assert_eq!(gps.to_degrees_minutes(), "55°45.3480'N, 37°37.0380'E");
    }

    #[test]
    fn test_southern_western_hemispheres() {
        let gps = GpsReading::at_origin(-33.5, -70.25);
        assert_eq!(gps.to_degrees_minutes(), "33°30.0000'S, 70°15.0000'W");
    }

    #[test]
    fn test_barometer_summary() {
        let baro = BarometerReading::at_sea_level(1000.0);
        assert_eq!(
            baro.summary(),
            "Pressure: 1000.0 hPa | Temperature: 15.0°C | Altitude: 0.0 m"
        );
    }
}
