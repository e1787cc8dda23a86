use crate::state::Multiplier;

/// Match configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MatchConfig {
    /// Tempo of the beat clock in beats per minute.
    pub bpm: u32,
    /// Number of entries kept in the battle log.
    pub log_capacity: usize,
    /// Timing windows used to grade player taps.
    pub judgement: JudgementWindows,
    /// Skill damage and heal scaling.
    pub skill: SkillTuning,
}

impl MatchConfig {
    // ===== compile-time constants =====
    /// Lanes per formation.
    pub const LANES: usize = 5;
    /// Beats per measure; skill cooldowns decay once per measure.
    pub const BEATS_PER_MEASURE: u64 = 4;
    /// Skill cooldown (in measures) for units that do not specify one.
    pub const DEFAULT_MAX_COOLDOWN: u32 = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_BPM: u32 = 100;
    pub const DEFAULT_LOG_CAPACITY: usize = 3;

    pub fn new() -> Self {
        Self {
            bpm: Self::DEFAULT_BPM,
            log_capacity: Self::DEFAULT_LOG_CAPACITY,
            judgement: JudgementWindows::default(),
            skill: SkillTuning::default(),
        }
    }

    pub fn with_bpm(bpm: u32) -> Self {
        Self {
            bpm,
            ..Self::new()
        }
    }

    /// Beat period in milliseconds (`60000 / bpm`).
    ///
    /// A zero tempo falls back to [`MatchConfig::DEFAULT_BPM`].
    pub fn beat_period_ms(&self) -> u64 {
        let bpm = if self.bpm == 0 {
            Self::DEFAULT_BPM
        } else {
            self.bpm
        };
        (60_000 / bpm as u64).max(1)
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Upper bounds (exclusive, in milliseconds) of each timing grade.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct JudgementWindows {
    pub perfect_ms: u64,
    pub great_ms: u64,
    pub good_ms: u64,
}

impl Default for JudgementWindows {
    fn default() -> Self {
        Self {
            perfect_ms: 100,
            great_ms: 200,
            good_ms: 300,
        }
    }
}

/// Skill scaling applied on top of the conductor bonus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SkillTuning {
    /// Damage multiplier on the caster's attack (x3.0).
    pub power: Multiplier,
    /// Fraction of the caster's max hp restored (x0.3).
    pub heal: Multiplier,
}

impl Default for SkillTuning {
    fn default() -> Self {
        Self {
            power: Multiplier::from_hundredths(300),
            heal: Multiplier::from_hundredths(30),
        }
    }
}
