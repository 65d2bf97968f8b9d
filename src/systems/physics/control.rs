use nalgebra::Vector3;

use crate::utils::{
    ALTITUDE_HOLD_GAIN, AUTOPILOT_ARRIVAL_DISTANCE, AUTOPILOT_HORIZONTAL_GAIN,
    AUTOPILOT_STEER_DISTANCE, AUTOPILOT_VERTICAL_GAIN, GROUND_LEVEL, GROUND_THRUST_OFFSET,
    RPM_PER_THRUST_UNIT,
};

/// Thrust produced by the blades, in the engine's thrust units.
pub fn total_thrust(total_rpm: f64) -> f64 {
    total_rpm / RPM_PER_THRUST_UNIT
}

/// Vertical thrust law.
///
/// On the ground the blades must overcome a fixed offset before the drone
/// lifts. Once airborne, thrust is a proportional hold on `hold_altitude`
/// and no longer depends on blade speed.
pub fn vertical_thrust(altitude: f64, total_thrust: f64, hold_altitude: f64) -> f64 {
    if altitude < GROUND_LEVEL {
        (total_thrust - GROUND_THRUST_OFFSET).max(0.0)
    } else {
        (hold_altitude - altitude) * ALTITUDE_HOLD_GAIN
    }
}

/// Result of one autopilot evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutopilotOutput {
    /// Distance to the target before this tick's integration [m]
    pub distance: f64,
    /// Horizontal thrust, `None` when close enough to stop steering
    pub horizontal: Option<(f64, f64)>,
    /// Added on top of the vertical thrust law
    pub vertical_correction: f64,
    pub arrived: bool,
}

/// Proportional steering towards `target`.
pub fn autopilot(position: &Vector3<f64>, target: &Vector3<f64>) -> AutopilotOutput {
    let delta = target - position;
    let distance = delta.norm();

    let steering = distance > AUTOPILOT_STEER_DISTANCE;
    AutopilotOutput {
        distance,
        horizontal: steering.then(|| {
            (
                delta.x * AUTOPILOT_HORIZONTAL_GAIN,
                delta.y * AUTOPILOT_HORIZONTAL_GAIN,
            )
        }),
        vertical_correction: if steering {
            delta.z * AUTOPILOT_VERTICAL_GAIN
        } else {
            0.0
        },
        arrived: distance < AUTOPILOT_ARRIVAL_DISTANCE,
    }
}
