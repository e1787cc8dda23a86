//! Worker tasks that back the runtime orchestration.
//!
//! The simulation worker owns the match and is the only writer of its state.

mod simulation;

pub use simulation::{Command, SimulationWorker};
