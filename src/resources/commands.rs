use bevy::prelude::*;
use crossbeam_channel::{Receiver, Sender, TryIter};
use nalgebra::Vector3;

use crate::components::FlightCommand;

/// Operator commands waiting for the next physics tick.
///
/// Any number of [`CommandSender`]s may enqueue; only the physics engine
/// drains, once per tick, so a command never lands halfway through a tick.
#[derive(Debug)]
pub struct CommandQueue {
    sender: Sender<FlightCommand>,
    receiver: Receiver<FlightCommand>,
}

impl Default for CommandQueue {
    fn default() -> Self {
        let (sender, receiver) = crossbeam_channel::unbounded();
        Self { sender, receiver }
    }
}

impl CommandQueue {
    pub fn sender(&self) -> CommandSender {
        CommandSender {
            sender: self.sender.clone(),
        }
    }

    pub fn drain(&self) -> TryIter<'_, FlightCommand> {
        self.receiver.try_iter()
    }

    pub fn pending(&self) -> usize {
        self.receiver.len()
    }
}

/// Cloneable, non-blocking handle for issuing flight commands.
#[derive(Resource, Debug, Clone)]
pub struct CommandSender {
    sender: Sender<FlightCommand>,
}

impl CommandSender {
    /// Enqueues a command. Commands sent after the engine is gone are dropped.
    pub fn send(&self, command: FlightCommand) {
        if self.sender.send(command).is_err() {
            debug!("Physics engine gone, dropping {:?}", command);
        }
    }

    pub fn takeoff(&self) {
        self.send(FlightCommand::Takeoff);
    }

    pub fn land(&self) {
        self.send(FlightCommand::Land);
    }

    pub fn auto_pilot(&self) {
        self.send(FlightCommand::AutoPilot);
    }

    pub fn emergency_stop(&self) {
        self.send(FlightCommand::EmergencyStop);
    }

    pub fn set_target_point(&self, x: f64, y: f64, z: f64) {
        self.send(FlightCommand::SetTargetPoint(Vector3::new(x, y, z)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_drain_in_order() {
        let queue = CommandQueue::default();
        let sender = queue.sender();

        sender.takeoff();
        sender.set_target_point(1.0, 2.0, 3.0);
        sender.auto_pilot();
        assert_eq!(queue.pending(), 3);

        let drained: Vec<_> = queue.drain().collect();
        assert_eq!(
            drained,
            vec![
                FlightCommand::Takeoff,
                FlightCommand::SetTargetPoint(Vector3::new(1.0, 2.0, 3.0)),
                FlightCommand::AutoPilot,
            ]
        );
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn test_send_after_queue_dropped_is_silent() {
        let sender = CommandQueue::default().sender();
        sender.land();
    }
}
