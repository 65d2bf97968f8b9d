//! Model constants.
//!
//! Ramp rates and drag factors are applied once per tick and are tuned for a
//! 0.1 s timestep. They do not rescale with `dt`.

pub const DEFAULT_TIMESTEP: f64 = 0.1; // s
pub const BLADE_COUNT: usize = 4;

// Blade motor model (per tick)
pub const BLADE_SPIN_UP_STEP: f64 = 200.0; // rpm
pub const BLADE_SPIN_DOWN_STEP: f64 = 300.0; // rpm
pub const BLADE_RUNNING_RPM: f64 = 2500.0;
pub const BLADE_STOPPED_RPM: f64 = 100.0;
pub const BLADE_AMBIENT_TEMPERATURE: f64 = 25.0; // °C
pub const BLADE_HEATING_PER_100_RPM: f64 = 0.5; // °C
pub const BLADE_MAX_VIBRATION_JITTER: u32 = 5;
pub const BLADE_WEAR_PROBABILITY: f64 = 0.01;
pub const BLADE_WEAR_STEP: f64 = 0.1;
pub const BLADE_MAX_HEALTH: f64 = 100.0;

// Thrust laws
pub const RPM_PER_THRUST_UNIT: f64 = 1000.0;
pub const GROUND_THRUST_OFFSET: f64 = 2.0;
pub const GROUND_LEVEL: f64 = 1.0; // m, below this the drone counts as on the ground
pub const ALTITUDE_HOLD_GAIN: f64 = 0.5;
pub const AUTOPILOT_HORIZONTAL_GAIN: f64 = 0.1;
pub const AUTOPILOT_VERTICAL_GAIN: f64 = 0.05;
pub const AUTOPILOT_STEER_DISTANCE: f64 = 1.0; // m
pub const AUTOPILOT_ARRIVAL_DISTANCE: f64 = 2.0; // m

// Integration (per tick)
pub const GRAVITY: f64 = 1.0; // thrust units
pub const HORIZONTAL_DRAG: f64 = 0.95;
pub const VERTICAL_DRAG: f64 = 0.98;
pub const TRAJECTORY_CAPACITY: usize = 100;

// Flight statistics
pub const BATTERY_DRAIN_RATE: f64 = 0.1; // % per second airborne
pub const MAX_BATTERY_LEVEL: f64 = 100.0;
pub const MIN_SIGNAL_STRENGTH: f64 = 10.0;
pub const MAX_SIGNAL_STRENGTH: f64 = 100.0;
pub const SIGNAL_LOSS_PER_METER: f64 = 2.0;

// Sensors
pub const METERS_PER_DEGREE_LATITUDE: f64 = 111_320.0;
pub const STANDARD_GRAVITY: f64 = 9.81; // m/s^2
pub const ISA_SEA_LEVEL_TEMP_C: f64 = 15.0; // °C
pub const ISA_LAPSE_RATE: f64 = 0.0065; // K/m
pub const MIN_COURSE_SPEED: f64 = 0.1; // m/s
pub const GPS_3D_FIX: u8 = 3;
pub const DEFAULT_SATELLITES: u8 = 8;
