//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! other layers can stay focused on orchestration and workers.

pub mod errors;
pub mod handle;

pub use errors::{Result, RuntimeError};
pub use handle::MatchHandle;

use symphony_core::{SkillError, SkillReport};

/// Reply to a skill request.
///
/// A rejected cast is a normal gameplay outcome (the caster may simply be on
/// cooldown), so it is reported here instead of as a [`RuntimeError`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkillOutcome {
    Cast(SkillReport),
    Ignored(SkillError),
}

impl SkillOutcome {
    pub fn is_cast(&self) -> bool {
        matches!(self, SkillOutcome::Cast(_))
    }
}
