use bevy::prelude::*;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::utils::{MAX_BATTERY_LEVEL, MAX_SIGNAL_STRENGTH, TRAJECTORY_CAPACITY};

/// Bounded history of past positions, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    points: VecDeque<Vector3<f64>>,
    capacity: usize,
}

impl Default for Trajectory {
    fn default() -> Self {
        Self::with_capacity(TRAJECTORY_CAPACITY)
    }
}

impl Trajectory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a point, evicting the oldest once full.
    pub fn push(&mut self, point: Vector3<f64>) {
        if self.capacity == 0 {
            return;
        }
        while self.points.len() >= self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vector3<f64>> {
        self.points.iter()
    }

    pub fn latest(&self) -> Option<&Vector3<f64>> {
        self.points.back()
    }
}

/// Kinematic state and flight statistics of the drone.
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroneKinematics {
    /// Position [m], z is height above ground and never negative
    pub position: Vector3<f64>,

    /// Linear velocity [m/s]
    pub velocity: Vector3<f64>,

    /// Pitch, roll and yaw [deg]. Carried but not controlled.
    pub orientation: Vector3<f64>,

    /// Control output of the current tick
    pub thrust: Vector3<f64>,

    pub trajectory: Trajectory,

    /// Autopilot destination [m]
    pub target_point: Vector3<f64>,

    pub flight_time: f64,
    pub distance_traveled: f64,
    /// Remaining charge in [0, 100] %
    pub battery_level: f64,
    /// Link quality in [10, 100] %
    pub signal_strength: f64,
}

impl Default for DroneKinematics {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
            orientation: Vector3::zeros(),
            thrust: Vector3::zeros(),
            trajectory: Trajectory::default(),
            target_point: Vector3::zeros(),
            flight_time: 0.0,
            distance_traveled: 0.0,
            battery_level: MAX_BATTERY_LEVEL,
            signal_strength: MAX_SIGNAL_STRENGTH,
        }
    }
}

impl DroneKinematics {
    /// At rest at `position`, clamped to the ground.
    pub fn at_position(position: Vector3<f64>) -> Self {
        Self {
            position: Vector3::new(position.x, position.y, position.z.max(0.0)),
            ..Default::default()
        }
    }

    pub fn with_target(mut self, target_point: Vector3<f64>) -> Self {
        self.target_point = target_point;
        self
    }

    pub fn distance_to_target(&self) -> f64 {
        (self.target_point - self.position).norm()
    }

    pub fn horizontal_distance_from_home(&self) -> f64 {
        self.position.xy().norm()
    }

    pub fn horizontal_speed(&self) -> f64 {
        self.velocity.xy().norm()
    }

    pub fn is_finite(&self) -> bool {
        self.position.iter().all(|v| v.is_finite())
            && self.velocity.iter().all(|v| v.is_finite())
            && self.thrust.iter().all(|v| v.is_finite())
            && self.flight_time.is_finite()
            && self.distance_traveled.is_finite()
    }

    /// Multi-line flight info for operator displays.
    pub fn summary(&self) -> String {
        format!(
            "POSITION:\n\
             X: {:.2} m\n\
             Y: {:.2} m\n\
             Z: {:.2} m\n\
             \n\
             VELOCITY:\n\
             Vx: {:.2} m/s\n\
             Vy: {:.2} m/s\n\
             Vz: {:.2} m/s\n\
             \n\
             ORIENTATION:\n\
             Pitch: {:.1}°\n\
             Roll: {:.1}°\n\
             Yaw: {:.1}°\n\
             \n\
             STATISTICS:\n\
             Flight time: {:.1} s\n\
             Distance: {:.1} m\n\
             Battery: {:.1}%\n\
             Signal: {:.1}%",
            self.position.x,
            self.position.y,
            self.position.z,
            self.velocity.x,
            self.velocity.y,
            self.velocity.z,
            self.orientation.x,
            self.orientation.y,
            self.orientation.z,
            self.flight_time,
            self.distance_traveled,
            self.battery_level,
            self.signal_strength,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trajectory_evicts_oldest_first() {
        let mut trajectory = Trajectory::default();
        for i in 0..150 {
            trajectory.push(Vector3::new(i as f64, 0.0, 0.0));
            assert!(trajectory.len() <= TRAJECTORY_CAPACITY);
        }

        assert_eq!(trajectory.len(), TRAJECTORY_CAPACITY);
        assert_eq!(trajectory.iter().next().map(|p| p.x), Some(50.0));
        assert_eq!(trajectory.latest().map(|p| p.x), Some(149.0));
    }

    #[test]
    fn test_at_position_clamps_to_ground() {
        let kinematics = DroneKinematics::at_position(Vector3::new(1.0, 2.0, -3.0));
        assert_eq!(kinematics.position, Vector3::new(1.0, 2.0, 0.0));
        assert_eq!(kinematics.battery_level, 100.0);
    }

    #[test]
    fn test_summary_mentions_every_section() {
        let summary = DroneKinematics::at_position(Vector3::new(1.5, 0.0, 10.0)).summary();
        assert!(summary.contains("X: 1.50 m"));
        assert!(summary.contains("Z: 10.00 m"));
        assert!(summary.contains("Battery: 100.0%"));
    }
}
