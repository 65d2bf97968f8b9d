pub mod events;
mod simulation;

pub use events::{SimEvent, SimEventKind};
pub use simulation::{SimulationPlugin, SimulationSet};
