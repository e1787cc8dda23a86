//! Error types for engine operations.

use crate::error::{ErrorSeverity, GameError};
use crate::state::Lane;

/// Reasons a skill cast is rejected. A rejected cast leaves the state untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillError {
    #[error("match is not in progress")]
    MatchNotInProgress,

    #[error("{lane} has no unit")]
    EmptyLane { lane: Lane },

    #[error("{name} in {lane} is defeated")]
    CasterDead { lane: Lane, name: String },

    #[error("{name} in {lane} is on cooldown ({remaining} measures left)")]
    OnCooldown {
        lane: Lane,
        name: String,
        remaining: u32,
    },
}

impl GameError for SkillError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::OnCooldown { .. } => ErrorSeverity::Recoverable,
            Self::MatchNotInProgress | Self::EmptyLane { .. } | Self::CasterDead { .. } => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MatchNotInProgress => "SKILL_MATCH_NOT_IN_PROGRESS",
            Self::EmptyLane { .. } => "SKILL_EMPTY_LANE",
            Self::CasterDead { .. } => "SKILL_CASTER_DEAD",
            Self::OnCooldown { .. } => "SKILL_ON_COOLDOWN",
        }
    }
}
