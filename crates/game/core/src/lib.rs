//! Deterministic match logic and data types for the rhythm autobattler.
//!
//! `symphony-core` defines the canonical rules (element matchups, targeting,
//! beat resolution, timing judgement, skills) and exposes pure APIs that the
//! runtime and content crates build on. All state mutation flows through
//! [`engine::MatchEngine`]; nothing here performs I/O or reads a clock.
pub mod combat;
pub mod config;
pub mod engine;
pub mod error;
pub mod rhythm;
pub mod state;

pub use combat::{effectiveness, resolve_target};
pub use config::{JudgementWindows, MatchConfig, SkillTuning};
pub use engine::{BeatReport, CombatEvent, MatchEngine, SkillError, SkillReport, SkillStrike};
pub use error::{ErrorSeverity, GameError};
pub use rhythm::{BeatClock, ComboDelta, ConductorState, Grade, Judgement, judge};
pub use state::{
    BattleLog, Beat, Element, Formation, Lane, LaneError, MatchPhase, MatchResult, MatchState,
    Multiplier, Rarity, Side, Timestamp, Unit, UnitError, UnitId, UnitSpec, UnitStats,
};
