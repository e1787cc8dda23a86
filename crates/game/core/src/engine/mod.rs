//! Match controller: the single reducer for [`MatchState`].
//!
//! The [`MatchEngine`] borrows the state mutably and exposes the four inputs
//! a match reacts to: start, beat ticks, player taps and skill casts (plus
//! abandonment). Once the state is terminal every input is a no-op.

mod errors;
mod report;
mod skill;
mod turns;

pub use errors::SkillError;
pub use report::{BeatReport, CombatEvent, SkillReport, SkillStrike};

use crate::rhythm::{ConductorState, Judgement, judge};
use crate::state::{Beat, MatchState, Timestamp};

/// Reducer that applies match inputs to a borrowed [`MatchState`].
pub struct MatchEngine<'a> {
    state: &'a mut MatchState,
}

impl<'a> MatchEngine<'a> {
    pub fn new(state: &'a mut MatchState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &MatchState {
        self.state
    }

    /// Anchors the beat grid at `now` and resets the conductor.
    ///
    /// Only a match still at beat 0 can be started; once a beat has been
    /// resolved, or the match is terminal, this is a no-op.
    pub fn start(&mut self, now: Timestamp) {
        if !self.state.is_in_progress() || self.state.beat() != Beat::ZERO {
            return;
        }
        self.state.clock.start(now);
        self.state.conductor = ConductorState::new();
    }

    /// Judges a tap stamped at `input_at` and updates the conductor.
    ///
    /// Returns `None` without side effects if the match is not in progress.
    pub fn tap(&mut self, input_at: Timestamp) -> Option<Judgement> {
        if !self.state.is_in_progress() {
            return None;
        }
        let judgement = judge(&self.state.clock, &self.state.config.judgement, input_at);
        self.state.conductor.apply(&judgement);
        Some(judgement)
    }

    /// Ends the match without a result. Returns false if it was already over.
    pub fn abandon(&mut self) -> bool {
        if !self.state.is_in_progress() {
            return false;
        }
        self.state.mark_abandoned();
        true
    }
}
