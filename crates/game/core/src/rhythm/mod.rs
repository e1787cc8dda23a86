//! Beat clock and player timing judgement.
mod clock;
mod judgement;

pub use clock::BeatClock;
pub use judgement::{ComboDelta, ConductorState, Grade, Judgement, judge};
