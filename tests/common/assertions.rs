use rotorsim::components::{Blade, BladeStatus, DroneState};
use rotorsim::utils::TRAJECTORY_CAPACITY;

/// Assert that every invariant of a committed physics state holds
#[track_caller]
pub fn assert_state_valid(state: &DroneState) {
    let kinematics = &state.kinematics;

    assert!(kinematics.position.iter().all(|v| v.is_finite()), "Position is not finite");
    assert!(kinematics.velocity.iter().all(|v| v.is_finite()), "Velocity is not finite");
    assert!(kinematics.position.z >= 0.0, "Drone below ground: {}", kinematics.position.z);

    assert!(
        (0.0..=100.0).contains(&kinematics.battery_level),
        "Battery out of range: {}",
        kinematics.battery_level
    );
    assert!(
        (10.0..=100.0).contains(&kinematics.signal_strength),
        "Signal out of range: {}",
        kinematics.signal_strength
    );
    assert!(
        kinematics.trajectory.len() <= TRAJECTORY_CAPACITY,
        "Trajectory grew to {}",
        kinematics.trajectory.len()
    );

    for blade in state.blades.iter() {
        assert!(blade.rpm >= 0.0, "Negative rpm: {}", blade.rpm);
        assert!(blade.target_rpm >= 0.0, "Negative target rpm: {}", blade.target_rpm);
        assert!((0.0..=100.0).contains(&blade.health), "Health out of range: {}", blade.health);
    }
}

/// Assert that all blades spin at `rpm` with the given status
#[track_caller]
pub fn assert_blades_at(blades: &[Blade], rpm: f64, status: BladeStatus) {
    for (i, blade) in blades.iter().enumerate() {
        assert_eq!(blade.rpm, rpm, "Blade {} rpm", i + 1);
        assert_eq!(blade.status, status, "Blade {} status", i + 1);
    }
}
