/// Simulation: the world snapshot, the fixed-step update and level timers.

pub mod event;
pub mod step;
pub mod timer;
pub mod world;
