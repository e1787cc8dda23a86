//! Authoritative match state representation.
//!
//! This module owns the data structures that describe both formations, the
//! beat clock, the conductor state, and the battle log. Runtime layers clone or
//! query this state but mutate it exclusively through the engine.
pub mod log;
pub mod types;

pub use log::BattleLog;
pub use types::{
    Beat, Element, Formation, Lane, LaneError, Multiplier, Rarity, Side, Timestamp, Unit,
    UnitError, UnitId, UnitSpec, UnitStats,
};

use crate::config::MatchConfig;
use crate::rhythm::{BeatClock, ConductorState};

/// Terminal outcome of a match, from the player's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchResult {
    Win,
    Lose,
}

/// Lifecycle phase of a match.
///
/// Once a match leaves `InProgress` it is immutable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum MatchPhase {
    InProgress,
    Finished(MatchResult),
    Abandoned,
}

/// Canonical snapshot of one match.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchState {
    pub player: Formation,
    pub enemy: Formation,
    /// Beat counter and the reference time of the latest beat.
    pub clock: BeatClock,
    pub conductor: ConductorState,
    pub log: BattleLog,
    /// Stage number the enemy formation was built for (0 when unstaged).
    pub stage: u32,
    pub config: MatchConfig,

    result: Option<MatchResult>,
    abandoned: bool,
}

impl MatchState {
    /// Creates a fresh match at beat 0 with a neutral conductor bonus.
    pub fn new(player: Formation, enemy: Formation, config: MatchConfig) -> Self {
        Self {
            player,
            enemy,
            clock: BeatClock::from_config(&config),
            conductor: ConductorState::new(),
            log: BattleLog::with_capacity(config.log_capacity),
            stage: 0,
            config,
            result: None,
            abandoned: false,
        }
    }

    /// Tags the match with a stage number (builder pattern).
    #[must_use]
    pub fn with_stage(mut self, stage: u32) -> Self {
        self.stage = stage;
        self
    }

    /// Current beat counter (0 until the first tick).
    pub fn beat(&self) -> Beat {
        self.clock.beat()
    }

    /// 1-based measure of the current beat.
    pub fn measure(&self) -> u64 {
        self.beat().measure()
    }

    pub fn result(&self) -> Option<MatchResult> {
        self.result
    }

    pub fn phase(&self) -> MatchPhase {
        if self.abandoned {
            MatchPhase::Abandoned
        } else if let Some(result) = self.result {
            MatchPhase::Finished(result)
        } else {
            MatchPhase::InProgress
        }
    }

    pub fn is_in_progress(&self) -> bool {
        matches!(self.phase(), MatchPhase::InProgress)
    }

    pub fn formation(&self, side: Side) -> &Formation {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    pub fn formation_mut(&mut self, side: Side) -> &mut Formation {
        match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        }
    }

    /// Outcome implied by the current formations, if any.
    ///
    /// A wiped player formation loses even if the enemy was wiped on the
    /// same beat.
    pub fn evaluate_result(&self) -> Option<MatchResult> {
        if !self.player.has_living() {
            Some(MatchResult::Lose)
        } else if !self.enemy.has_living() {
            Some(MatchResult::Win)
        } else {
            None
        }
    }

    pub(crate) fn finish(&mut self, result: MatchResult) {
        self.result = Some(result);
    }

    pub(crate) fn mark_abandoned(&mut self) {
        self.abandoned = true;
    }
}
