mod loops;
mod simulation;

pub use simulation::Simulation;
