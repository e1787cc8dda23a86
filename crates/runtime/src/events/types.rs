//! Event types for different topics.

use serde::{Deserialize, Serialize};
use symphony_core::{Beat, CombatEvent, Judgement, MatchResult, SkillReport, Timestamp};

/// A beat was resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeatEvent {
    pub beat: Beat,
    pub measure: u64,
    /// Host time the beat was stamped with.
    pub at: Timestamp,
    pub player_alive: usize,
    pub enemy_alive: usize,
}

/// A player tap was judged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RhythmEvent {
    pub judgement: Judgement,
    /// Combo after applying the judgement.
    pub combo: u32,
}

/// Combat occurrences from beat resolution or skill casts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatUpdate {
    Combat(CombatEvent),
    SkillCast(SkillReport),
}

/// Match lifecycle transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEvent {
    Started { stage: u32, at: Timestamp },
    Finished { result: MatchResult, beat: Beat },
    Abandoned { beat: Beat },
}
