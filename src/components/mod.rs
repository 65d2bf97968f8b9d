pub mod blade;
pub mod flight_mode;
pub mod kinematics;
pub mod sensors;
pub mod state;

pub use blade::{Blade, BladeArray, BladeStatus};
pub use flight_mode::{FlightCommand, FlightMode, FlightTrigger};
pub use kinematics::{DroneKinematics, Trajectory};
pub use sensors::{BarometerReading, GpsReading, ImuReading, SensorReadings};
pub use state::DroneState;
