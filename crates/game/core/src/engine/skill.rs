//! Player skill casts.

use super::MatchEngine;
use super::errors::SkillError;
use super::report::{SkillReport, SkillStrike};
use crate::combat::{resolve_target, skill_damage, skill_heal};
use crate::state::Lane;

impl<'a> MatchEngine<'a> {
    /// Casts the skill of the player unit in `lane`.
    ///
    /// The caster's cooldown is reset to its maximum, the nearest living enemy
    /// (per lane targeting) takes `atk x power x bonus` damage and is swept
    /// immediately if it drops to zero, and the caster heals a share of its
    /// max hp scaled by the same bonus. The bonus itself is not consumed.
    /// Match termination is left to the next beat.
    pub fn cast_skill(&mut self, lane: Lane) -> Result<SkillReport, SkillError> {
        if !self.state.is_in_progress() {
            return Err(SkillError::MatchNotInProgress);
        }

        let bonus = self.state.conductor.bonus;
        let tuning = self.state.config.skill;

        let caster = self
            .state
            .player
            .get(lane)
            .ok_or(SkillError::EmptyLane { lane })?;
        if caster.is_dead() {
            return Err(SkillError::CasterDead {
                lane,
                name: caster.name.clone(),
            });
        }
        if !caster.skill_ready() {
            return Err(SkillError::OnCooldown {
                lane,
                name: caster.name.clone(),
                remaining: caster.skill_cooldown(),
            });
        }
        let name = caster.name.clone();
        let atk = caster.atk;
        let max_hp = caster.max_hp();

        let strike = resolve_target(lane, &self.state.enemy).and_then(|target| {
            let defender = self.state.enemy.get_mut(target)?;
            let damage = skill_damage(atk, &tuning, bonus);
            defender.take_damage(damage);
            Some(SkillStrike {
                target,
                damage,
                defeated: defender.sweep_death(),
            })
        });

        let healed = match self.state.player.get_mut(lane) {
            Some(caster) => {
                caster.start_cooldown();
                caster.heal(skill_heal(max_hp, &tuning, bonus))
            }
            None => 0,
        };

        self.state.log.push(format!("{name} Solo! (x{bonus})"));

        Ok(SkillReport {
            caster: lane,
            name,
            bonus,
            strike,
            healed,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::config::MatchConfig;
    use crate::engine::{MatchEngine, SkillError};
    use crate::error::{ErrorSeverity, GameError};
    use crate::state::{
        Element, Formation, Lane, MatchResult, MatchState, Multiplier, Timestamp, Unit, UnitId,
        UnitStats,
    };

    fn lane(index: usize) -> Lane {
        Lane::new(index).unwrap()
    }

    fn unit(id: u32, name: &str, element: Element, atk: u32, hp: u32) -> Unit {
        Unit::new(UnitId(id), name, element, UnitStats::new(atk, hp, 4)).unwrap()
    }

    fn skirmish() -> MatchState {
        MatchState::new(
            Formation::empty()
                .with_unit(lane(0), unit(1, "Trumpet", Element::Brass, 20, 120).with_hp(60))
                .with_unit(lane(1), unit(2, "Flute", Element::Woodwind, 15, 100).with_hp(0)),
            Formation::empty()
                .with_unit(lane(2), unit(3, "Violin", Element::Strings, 10, 500))
                .with_unit(lane(4), unit(4, "Snare", Element::Percussion, 10, 40)),
            MatchConfig::default(),
        )
    }

    #[test]
    fn cast_damages_heals_and_starts_cooldown() {
        let mut state = skirmish();
        state.conductor.bonus = Multiplier::STRONG;
        let mut engine = MatchEngine::new(&mut state);

        let report = engine.cast_skill(lane(0)).unwrap();
        // Lane 0 falls back to lane 2 (distance 2, right side).
        let strike = report.strike.unwrap();
        assert_eq!(strike.target, lane(2));
        assert_eq!(strike.damage, 90);
        assert!(!strike.defeated);
        // floor(120 * 0.3 * 1.5) = 54
        assert_eq!(report.healed, 54);

        let caster = engine.state().player.get(lane(0)).unwrap();
        assert_eq!(caster.hp(), 114);
        assert_eq!(caster.skill_cooldown(), MatchConfig::DEFAULT_MAX_COOLDOWN);
        assert_eq!(engine.state().enemy.get(lane(2)).unwrap().hp(), 410);
        assert_eq!(engine.state().conductor.bonus, Multiplier::STRONG);
        assert_eq!(engine.state().log.latest(), Some("Trumpet Solo! (x1.5)"));
    }

    #[test]
    fn rejections_leave_state_untouched() {
        let mut state = skirmish();
        let snapshot = state.clone();
        let mut engine = MatchEngine::new(&mut state);

        assert_eq!(
            engine.cast_skill(lane(3)),
            Err(SkillError::EmptyLane { lane: lane(3) })
        );
        let dead = engine.cast_skill(lane(1)).unwrap_err();
        assert_eq!(dead.error_code(), "SKILL_CASTER_DEAD");
        assert_eq!(dead.severity(), ErrorSeverity::Validation);
        assert_eq!(engine.state(), &snapshot);

        engine.cast_skill(lane(0)).unwrap();
        let after_cast = engine.state().clone();
        let err = engine.cast_skill(lane(0)).unwrap_err();
        assert!(matches!(err, SkillError::OnCooldown { remaining: 8, .. }));
        assert!(err.severity().is_recoverable());
        assert_eq!(engine.state(), &after_cast);
    }

    #[test]
    fn kill_is_swept_now_but_result_waits_for_beat() {
        let mut state = MatchState::new(
            Formation::empty().with_unit(lane(4), unit(1, "Tuba", Element::Brass, 20, 100)),
            Formation::empty().with_unit(lane(4), unit(2, "Snare", Element::Percussion, 10, 40)),
            MatchConfig::default(),
        );
        let mut engine = MatchEngine::new(&mut state);

        let strike = engine.cast_skill(lane(4)).unwrap().strike.unwrap();
        // Brass is weak to Percussion, but skills ignore element matchups.
        assert_eq!(strike.damage, 60);
        assert!(strike.defeated);
        assert!(engine.state().enemy.get(lane(4)).unwrap().is_dead());
        assert_eq!(engine.state().result(), None);

        let report = engine.resolve_beat(Timestamp(600));
        assert_eq!(report.result, Some(MatchResult::Win));
    }

    #[test]
    fn cast_without_targets_still_heals() {
        let mut state = MatchState::new(
            Formation::empty().with_unit(lane(0), unit(1, "Horn", Element::Brass, 20, 100).with_hp(50)),
            Formation::empty().with_unit(lane(0), unit(2, "Oboe", Element::Woodwind, 10, 10).with_hp(0)),
            MatchConfig::default(),
        );
        let mut engine = MatchEngine::new(&mut state);
        let report = engine.cast_skill(lane(0)).unwrap();
        assert_eq!(report.strike, None);
        assert_eq!(report.healed, 30);
    }

    #[test]
    fn cooldown_set_on_first_beat_decays_at_next_measure() {
        let mut state = MatchState::new(
            Formation::empty().with_unit(lane(0), unit(1, "Horn", Element::Brass, 1, 1_000)),
            Formation::empty().with_unit(lane(0), unit(2, "Harp", Element::Strings, 1, 1_000)),
            MatchConfig::default(),
        );
        let mut engine = MatchEngine::new(&mut state);
        engine.resolve_beat(Timestamp(600));
        engine.cast_skill(lane(0)).unwrap();

        let cooldown =
            |engine: &MatchEngine<'_>| engine.state().player.get(lane(0)).unwrap().skill_cooldown();
        for n in 2..=4 {
            engine.resolve_beat(Timestamp(n * 600));
            assert_eq!(cooldown(&engine), 8);
        }
        engine.resolve_beat(Timestamp(5 * 600));
        assert_eq!(cooldown(&engine), 7);
    }
}
