//! Common error infrastructure for symphony-core.
//!
//! Domain-specific errors (`UnitError`, `LaneError`, `SkillError`) live next
//! to the types and operations they validate; this module only provides the
//! classification shared by all of them.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the same request may succeed later (e.g. a skill on cooldown)
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: unexpected state inconsistencies that require investigation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry once the match advances.
    ///
    /// Examples: skill on cooldown
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: empty lane, zero action interval
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all symphony-core errors.
///
/// Implementors derive `thiserror::Error` for `Display`/`Error` and classify
/// severity by recoverability, not impact.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Defaults to the type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
