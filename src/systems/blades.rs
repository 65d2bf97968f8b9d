use rand::Rng;
use std::f64::consts::TAU;

use crate::components::{Blade, BladeArray, BladeStatus};
use crate::plugins::{SimEvent, SimEventKind};
use crate::utils::{
    BLADE_AMBIENT_TEMPERATURE, BLADE_HEATING_PER_100_RPM, BLADE_MAX_HEALTH,
    BLADE_MAX_VIBRATION_JITTER, BLADE_SPIN_DOWN_STEP, BLADE_SPIN_UP_STEP, BLADE_WEAR_PROBABILITY,
    BLADE_WEAR_STEP,
};

/// Advances all four blades by one tick.
///
/// # Arguments
/// * `blades` - The blade array to update in place.
/// * `dt` - Tick length [s], only used for the visual rotation.
/// * `tick` - Index of the tick being computed, stamped on events.
/// * `rng` - Source for vibration jitter and wear.
///
/// # Returns
/// One event per blade crossing the running or stopped threshold.
pub fn update_blades<R: Rng + ?Sized>(
    blades: &mut BladeArray,
    dt: f64,
    tick: u64,
    rng: &mut R,
) -> Vec<SimEvent> {
    let mut events = Vec::new();

    for (index, blade) in blades.iter_mut().enumerate() {
        if let Some(status) = update_blade(blade, dt, rng) {
            let kind = match status {
                BladeStatus::Running => SimEventKind::BladeRunning { blade: index },
                _ => SimEventKind::BladeStopped { blade: index },
            };
            events.push(SimEvent::new(tick, kind));
        }
    }

    events
}

/// Returns the new status if the blade crossed an rpm threshold.
fn update_blade<R: Rng + ?Sized>(blade: &mut Blade, dt: f64, rng: &mut R) -> Option<BladeStatus> {
    blade.target_rpm = blade.target_rpm.max(0.0);
    blade.rpm = ramp_rpm(blade.rpm.max(0.0), blade.target_rpm);

    let transition = blade.status.on_rpm(blade.rpm);
    if let Some(status) = transition {
        blade.status = status;
    }

    blade.temperature = BLADE_AMBIENT_TEMPERATURE + (blade.rpm / 100.0) * BLADE_HEATING_PER_100_RPM;
    blade.vibration = rng.gen_range(0..=BLADE_MAX_VIBRATION_JITTER) as f64 + blade.rpm / 1000.0;

    if blade.rpm > 0.0 && rng.gen_bool(BLADE_WEAR_PROBABILITY) {
        blade.health = (blade.health - BLADE_WEAR_STEP).clamp(0.0, BLADE_MAX_HEALTH);
    }

    if blade.status == BladeStatus::Running && blade.rpm > 0.0 {
        let revolutions_per_second = blade.rpm / 60.0;
        blade.rotation_angle =
            (blade.rotation_angle + revolutions_per_second * TAU * dt).rem_euclid(TAU);
    }

    transition
}

/// Spin-up is slower than spin-down.
fn ramp_rpm(rpm: f64, target_rpm: f64) -> f64 {
    if rpm < target_rpm {
        (rpm + BLADE_SPIN_UP_STEP).min(target_rpm)
    } else if rpm > target_rpm {
        (rpm - BLADE_SPIN_DOWN_STEP).max(target_rpm)
    } else {
        rpm
    }
}
