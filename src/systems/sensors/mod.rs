mod emulator;
mod noise;

pub use emulator::{course_over_ground, sensor_emulator_system, SensorEmulator};
pub use noise::SensorNoise;
