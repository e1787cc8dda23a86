//! Outcomes returned by engine operations.

use crate::state::{Beat, Lane, MatchResult, Multiplier, Side, UnitId};

/// One observable combat occurrence within a beat or a skill cast.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatEvent {
    /// A player strike met an enemy strike aimed back at it.
    Clash {
        player_lane: Lane,
        enemy_lane: Lane,
        player_damage: u32,
        enemy_damage: u32,
        winner: Side,
        /// Damage dealt to the losing unit.
        damage: u32,
    },
    /// A strike that was not met by an opposing strike.
    Hit {
        attacker: Side,
        source: Lane,
        target: Lane,
        damage: u32,
    },
    /// A unit reached zero hit points and was swept.
    Defeated { side: Side, lane: Lane, unit: UnitId },
}

/// Everything that happened on one resolved beat.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BeatReport {
    pub beat: Beat,
    pub measure: u64,
    pub events: Vec<CombatEvent>,
    /// Set when this beat ended the match.
    pub result: Option<MatchResult>,
}

impl BeatReport {
    pub fn new(beat: Beat) -> Self {
        Self {
            beat,
            measure: beat.measure(),
            events: Vec::new(),
            result: None,
        }
    }

    /// Returns true if nothing happened (idle beat or terminal match).
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.result.is_none()
    }

    pub fn defeated(&self) -> impl Iterator<Item = (Side, Lane)> + '_ {
        self.events.iter().filter_map(|event| match event {
            CombatEvent::Defeated { side, lane, .. } => Some((*side, *lane)),
            _ => None,
        })
    }
}

/// Damage dealt by a skill to its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillStrike {
    pub target: Lane,
    pub damage: u32,
    pub defeated: bool,
}

/// Outcome of a successful skill cast.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillReport {
    pub caster: Lane,
    pub name: String,
    /// Conductor bonus the cast was scaled by.
    pub bonus: Multiplier,
    /// `None` when the enemy formation had no living unit.
    pub strike: Option<SkillStrike>,
    /// Hit points actually restored to the caster.
    pub healed: u32,
}
