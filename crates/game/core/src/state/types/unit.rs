//! Combatant records.

use std::fmt;

use super::element::{Element, Rarity};
use crate::config::MatchConfig;
use crate::error::{ErrorSeverity, GameError};

/// Opaque identity token for a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Base combat stats supplied by a unit factory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitStats {
    pub atk: u32,
    pub max_hp: u32,
    /// Beats between automatic actions. Must be at least 1.
    pub interval: u32,
    /// Measures the skill stays on cooldown after a cast.
    pub max_cooldown: u32,
}

impl UnitStats {
    pub fn new(atk: u32, max_hp: u32, interval: u32) -> Self {
        Self {
            atk,
            max_hp,
            interval,
            max_cooldown: MatchConfig::DEFAULT_MAX_COOLDOWN,
        }
    }

    pub fn with_max_cooldown(mut self, max_cooldown: u32) -> Self {
        self.max_cooldown = max_cooldown;
        self
    }
}

/// Errors raised when a unit would violate its invariants.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitError {
    #[error("unit '{name}' has a zero action interval")]
    ZeroInterval { name: String },

    #[error("unit '{name}' has hp {hp} above its maximum {max_hp}")]
    HpAboveMaximum { name: String, hp: u32, max_hp: u32 },
}

impl GameError for UnitError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ZeroInterval { .. } => "UNIT_ZERO_INTERVAL",
            Self::HpAboveMaximum { .. } => "UNIT_HP_ABOVE_MAXIMUM",
        }
    }
}

/// One combatant.
///
/// Invariants upheld by every method: `hp <= max_hp`, `interval >= 1`, and
/// after a death sweep `is_dead() == (hp() == 0)`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    pub element: Element,
    pub rarity: Rarity,
    pub atk: u32,
    hp: u32,
    max_hp: u32,
    interval: u32,
    skill_cooldown: u32,
    max_cooldown: u32,
    is_dead: bool,
}

impl Unit {
    /// Creates a unit at full health with its skill ready.
    pub fn new(
        id: UnitId,
        name: impl Into<String>,
        element: Element,
        stats: UnitStats,
    ) -> Result<Self, UnitError> {
        let name = name.into();
        if stats.interval == 0 {
            return Err(UnitError::ZeroInterval { name });
        }

        Ok(Self {
            id,
            name,
            element,
            rarity: Rarity::Normal,
            atk: stats.atk,
            hp: stats.max_hp,
            max_hp: stats.max_hp,
            interval: stats.interval,
            skill_cooldown: 0,
            max_cooldown: stats.max_cooldown,
            is_dead: stats.max_hp == 0,
        })
    }

    /// Sets the rarity tier (builder pattern).
    #[must_use]
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    /// Sets current hit points, clamped to `max_hp` (builder pattern).
    #[must_use]
    pub fn with_hp(mut self, hp: u32) -> Self {
        self.hp = hp.min(self.max_hp);
        self.is_dead = self.hp == 0;
        self
    }

    /// Replaces max hp and refills hp to it (builder pattern).
    #[must_use]
    pub fn with_max_hp(mut self, max_hp: u32) -> Self {
        self.max_hp = max_hp;
        self.hp = max_hp;
        self.is_dead = max_hp == 0;
        self
    }

    /// Sets the current skill cooldown (builder pattern).
    #[must_use]
    pub fn with_cooldown(mut self, cooldown: u32) -> Self {
        self.skill_cooldown = cooldown;
        self
    }

    /// Fresh combat copy of a roster template: full hp, skill ready, alive.
    pub fn deploy(&self) -> Self {
        Self {
            hp: self.max_hp,
            skill_cooldown: 0,
            is_dead: self.max_hp == 0,
            ..self.clone()
        }
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    pub fn skill_cooldown(&self) -> u32 {
        self.skill_cooldown
    }

    pub fn max_cooldown(&self) -> u32 {
        self.max_cooldown
    }

    pub fn is_dead(&self) -> bool {
        self.is_dead
    }

    pub fn is_alive(&self) -> bool {
        !self.is_dead
    }

    pub fn skill_ready(&self) -> bool {
        self.skill_cooldown == 0
    }

    /// Subtracts `amount` from hp, saturating at zero.
    ///
    /// Death is only recorded by [`Unit::sweep_death`].
    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    /// Adds `amount` to hp, clamped to `max_hp`. Returns the hp actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        self.hp - before
    }

    /// Marks the unit dead if its hp reached zero. Returns true on a new death.
    pub fn sweep_death(&mut self) -> bool {
        if self.hp == 0 && !self.is_dead {
            self.is_dead = true;
            return true;
        }
        false
    }

    /// Decrements a non-zero skill cooldown by one.
    pub fn decay_cooldown(&mut self) {
        self.skill_cooldown = self.skill_cooldown.saturating_sub(1);
    }

    /// Puts the skill on its full cooldown.
    pub fn start_cooldown(&mut self) {
        self.skill_cooldown = self.max_cooldown;
    }
}

/// Data-driven unit description, as loaded from roster files.
///
/// Missing numeric fields default to zero; a missing `hp` means full health
/// and a missing `max_cooldown` uses [`MatchConfig::DEFAULT_MAX_COOLDOWN`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitSpec {
    pub name: String,
    pub element: Element,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rarity: Rarity,
    #[cfg_attr(feature = "serde", serde(default))]
    pub atk: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_hp: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hp: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub interval: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_cooldown: Option<u32>,
}

impl UnitSpec {
    /// Builds a validated unit with the given identity.
    pub fn into_unit(self, id: UnitId) -> Result<Unit, UnitError> {
        let max_cooldown = self
            .max_cooldown
            .unwrap_or(MatchConfig::DEFAULT_MAX_COOLDOWN);
        let stats = UnitStats::new(self.atk, self.max_hp, self.interval)
            .with_max_cooldown(max_cooldown);

        if let Some(hp) = self.hp
            && hp > self.max_hp
        {
            return Err(UnitError::HpAboveMaximum {
                name: self.name,
                hp,
                max_hp: self.max_hp,
            });
        }

        let unit = Unit::new(id, self.name, self.element, stats)?.with_rarity(self.rarity);
        Ok(match self.hp {
            Some(hp) => unit.with_hp(hp),
            None => unit,
        })
    }
}
