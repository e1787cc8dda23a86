//! Damage calculation for strikes, clashes and skills.
//!
//! All values are integers; every product is floored exactly once per step
//! listed in the formulas below.

use crate::config::SkillTuning;
use crate::state::{Multiplier, Side};

/// Damage of one automatic strike.
///
/// # Formula
///
/// ```text
/// damage = floor(floor(atk * bonus) * effectiveness)
/// ```
///
/// Enemy strikes pass [`Multiplier::NEUTRAL`] as the bonus; only the player
/// side is scaled by the conductor.
#[inline]
pub fn strike_damage(atk: u32, bonus: Multiplier, effectiveness: Multiplier) -> u32 {
    effectiveness.apply(bonus.apply(atk))
}

/// Result of two opposing strikes meeting head-on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClashOutcome {
    /// Side whose unit survives the exchange unharmed.
    pub winner: Side,
    /// Damage dealt to the loser (at least 1).
    pub damage: u32,
}

/// Settles a clash between a player strike and an enemy strike.
///
/// Ties go to the player. The loser takes the difference, floored at 1.
pub fn resolve_clash(player_damage: u32, enemy_damage: u32) -> ClashOutcome {
    if player_damage >= enemy_damage {
        ClashOutcome {
            winner: Side::Player,
            damage: (player_damage - enemy_damage).max(1),
        }
    } else {
        ClashOutcome {
            winner: Side::Enemy,
            damage: (enemy_damage - player_damage).max(1),
        }
    }
}

/// Skill damage: `floor(atk * power * bonus)`.
#[inline]
pub fn skill_damage(atk: u32, tuning: &SkillTuning, bonus: Multiplier) -> u32 {
    tuning.power.apply_with(bonus, atk)
}

/// Skill self-heal: `floor(max_hp * heal * bonus)`.
#[inline]
pub fn skill_heal(max_hp: u32, tuning: &SkillTuning, bonus: Multiplier) -> u32 {
    tuning.heal.apply_with(bonus, max_hp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strike_floors_each_step() {
        // floor(floor(15 * 1.2) * 1.5) = floor(18 * 1.5) = 27
        assert_eq!(
            strike_damage(15, Multiplier::from_hundredths(120), Multiplier::STRONG),
            27
        );
        // floor(floor(15 * 0.7) * 0.5) = floor(10 * 0.5) = 5
        assert_eq!(
            strike_damage(15, Multiplier::from_hundredths(70), Multiplier::HALF),
            5
        );
        assert_eq!(strike_damage(20, Multiplier::NEUTRAL, Multiplier::STRONG), 30);
    }

    #[test]
    fn tie_goes_to_player_with_minimum_damage() {
        let outcome = resolve_clash(10, 10);
        assert_eq!(outcome.winner, Side::Player);
        assert_eq!(outcome.damage, 1);
    }

    #[test]
    fn loser_takes_the_difference() {
        assert_eq!(
            resolve_clash(30, 7),
            ClashOutcome {
                winner: Side::Player,
                damage: 23
            }
        );
        assert_eq!(
            resolve_clash(4, 12),
            ClashOutcome {
                winner: Side::Enemy,
                damage: 8
            }
        );
    }

    #[test]
    fn skill_numbers() {
        let tuning = SkillTuning::default();
        assert_eq!(skill_damage(20, &tuning, Multiplier::STRONG), 90);
        assert_eq!(skill_damage(15, &tuning, Multiplier::from_hundredths(70)), 31);
        assert_eq!(skill_heal(105, &tuning, Multiplier::STRONG), 47);
        assert_eq!(skill_heal(120, &tuning, Multiplier::NEUTRAL), 36);
    }
}
