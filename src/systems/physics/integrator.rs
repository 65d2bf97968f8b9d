use nalgebra::Vector3;

use crate::components::DroneKinematics;
use crate::utils::{
    BATTERY_DRAIN_RATE, GRAVITY, GROUND_LEVEL, HORIZONTAL_DRAG, MAX_SIGNAL_STRENGTH,
    MIN_SIGNAL_STRENGTH, SIGNAL_LOSS_PER_METER, VERTICAL_DRAG,
};

/// Semi-implicit Euler step with per-tick drag.
///
/// Velocity is updated from the current thrust and a constant gravity term,
/// damped, and then used to advance the position.
pub fn integrate_motion(kinematics: &mut DroneKinematics, dt: f64) {
    kinematics.velocity += kinematics.thrust * dt;
    kinematics.velocity.z -= GRAVITY * dt;

    kinematics.velocity.x *= HORIZONTAL_DRAG;
    kinematics.velocity.y *= HORIZONTAL_DRAG;
    kinematics.velocity.z *= VERTICAL_DRAG;

    let velocity = kinematics.velocity;
    kinematics.position += velocity * dt;
}

/// Keeps the drone above ground. Returns true if it had sunk below.
pub fn clamp_to_ground(kinematics: &mut DroneKinematics) -> bool {
    if kinematics.position.z < 0.0 {
        kinematics.position.z = 0.0;
        kinematics.velocity.z = 0.0;
        true
    } else {
        false
    }
}

/// Accumulates flight time, distance, battery drain and signal loss.
/// Only runs while the drone is above ground level.
pub fn update_flight_statistics(kinematics: &mut DroneKinematics, dt: f64) {
    if kinematics.position.z <= GROUND_LEVEL {
        return;
    }

    kinematics.flight_time += dt;
    kinematics.distance_traveled += kinematics.velocity.norm() * dt;
    kinematics.battery_level = (kinematics.battery_level - dt * BATTERY_DRAIN_RATE).max(0.0);

    let home_distance = kinematics.horizontal_distance_from_home();
    kinematics.signal_strength = (MAX_SIGNAL_STRENGTH - home_distance * SIGNAL_LOSS_PER_METER)
        .clamp(MIN_SIGNAL_STRENGTH, MAX_SIGNAL_STRENGTH);
}

/// Zeroes motion instantly, used by the emergency stop.
pub fn halt_motion(kinematics: &mut DroneKinematics) {
    kinematics.velocity = Vector3::zeros();
    kinematics.thrust = Vector3::zeros();
}
