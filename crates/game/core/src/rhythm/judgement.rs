//! Timing judgement and the conductor bonus.

use super::clock::BeatClock;
use crate::config::JudgementWindows;
use crate::state::{Multiplier, Timestamp};

/// Discrete timing-accuracy classification of one tap.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Grade {
    Perfect,
    Great,
    Good,
    Miss,
}

impl Grade {
    /// Conductor bonus granted by this grade.
    pub const fn multiplier(self) -> Multiplier {
        match self {
            Grade::Perfect => Multiplier::from_hundredths(150),
            Grade::Great => Multiplier::from_hundredths(120),
            Grade::Good => Multiplier::from_hundredths(100),
            Grade::Miss => Multiplier::from_hundredths(70),
        }
    }

    /// Classifies a distance to the nearest beat.
    pub fn from_offset(offset_ms: u64, windows: &JudgementWindows) -> Grade {
        if offset_ms < windows.perfect_ms {
            Grade::Perfect
        } else if offset_ms < windows.great_ms {
            Grade::Great
        } else if offset_ms < windows.good_ms {
            Grade::Good
        } else {
            Grade::Miss
        }
    }

    pub const fn is_miss(self) -> bool {
        matches!(self, Grade::Miss)
    }
}

/// Effect of a judgement on the combo counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ComboDelta {
    Increment,
    Reset,
}

/// Result of judging one tap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Judgement {
    pub grade: Grade,
    pub multiplier: Multiplier,
    pub combo_delta: ComboDelta,
    /// Distance to the nearest beat boundary in milliseconds.
    pub offset_ms: u64,
}

/// Judges a tap stamped at `input_at` against the clock's beat grid.
pub fn judge(clock: &BeatClock, windows: &JudgementWindows, input_at: Timestamp) -> Judgement {
    let offset_ms = clock.offset_to_nearest_beat(input_at);
    let grade = Grade::from_offset(offset_ms, windows);
    let combo_delta = if grade.is_miss() {
        ComboDelta::Reset
    } else {
        ComboDelta::Increment
    };

    Judgement {
        grade,
        multiplier: grade.multiplier(),
        combo_delta,
        offset_ms,
    }
}

/// Live timing state of the player: bonus, last grade, and combo.
///
/// The bonus persists at its last judged value until the next tap; beats
/// without input do not decay it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConductorState {
    pub bonus: Multiplier,
    pub grade: Option<Grade>,
    pub combo: u32,
}

impl ConductorState {
    pub fn new() -> Self {
        Self {
            bonus: Multiplier::NEUTRAL,
            grade: None,
            combo: 0,
        }
    }

    /// Starts from an arbitrary bonus (builder pattern).
    #[must_use]
    pub fn with_bonus(mut self, bonus: Multiplier) -> Self {
        self.bonus = bonus;
        self
    }

    /// Overwrites the bonus and updates the combo.
    pub fn apply(&mut self, judgement: &Judgement) {
        self.bonus = judgement.multiplier;
        self.grade = Some(judgement.grade);
        self.combo = match judgement.combo_delta {
            ComboDelta::Increment => self.combo.saturating_add(1),
            ComboDelta::Reset => 0,
        };
    }
}

impl Default for ConductorState {
    fn default() -> Self {
        Self::new()
    }
}
