//! Per-beat turn resolution.

use arrayvec::ArrayVec;

use super::MatchEngine;
use super::report::{BeatReport, CombatEvent};
use crate::combat::{effectiveness, resolve_clash, resolve_target, strike_damage};
use crate::config::MatchConfig;
use crate::state::{Beat, Lane, Multiplier, Side, Timestamp};

/// Automatic action collected at the start of a beat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Strike {
    source: Lane,
    target: Lane,
    damage: u32,
}

type Strikes = ArrayVec<Strike, { MatchConfig::LANES }>;

impl<'a> MatchEngine<'a> {
    /// Advances the beat counter at `now` and resolves the beat.
    ///
    /// Order within a beat: cooldown decay on measure boundaries, action
    /// collection against the pre-beat formations, clashes, unclashed strikes,
    /// death sweep, termination check. A terminal match returns an empty
    /// report and is left untouched.
    pub fn resolve_beat(&mut self, now: Timestamp) -> BeatReport {
        if !self.state.is_in_progress() {
            return BeatReport::new(self.state.beat());
        }

        let beat = self.state.clock.tick(now);
        let mut report = BeatReport::new(beat);

        if beat.is_measure_boundary() {
            self.decay_cooldowns();
        }

        let player = self.collect_strikes(Side::Player, beat);
        let enemy = self.collect_strikes(Side::Enemy, beat);
        let mut player_done = [false; MatchConfig::LANES];
        let mut enemy_done = [false; MatchConfig::LANES];

        for p in &player {
            let Some(e) = enemy
                .iter()
                .find(|e| e.source == p.target && e.target == p.source)
            else {
                continue;
            };
            if player_done[p.source.index()] || enemy_done[e.source.index()] {
                continue;
            }
            player_done[p.source.index()] = true;
            enemy_done[e.source.index()] = true;
            report.events.push(self.apply_clash(p, e));
        }

        for p in player.iter().filter(|p| !player_done[p.source.index()]) {
            report.events.push(self.apply_hit(Side::Player, p));
        }
        for e in enemy.iter().filter(|e| !enemy_done[e.source.index()]) {
            report.events.push(self.apply_hit(Side::Enemy, e));
        }

        self.sweep_deaths(&mut report);

        if let Some(result) = self.state.evaluate_result() {
            self.state.finish(result);
            report.result = Some(result);
        }

        report
    }

    fn decay_cooldowns(&mut self) {
        for side in [Side::Player, Side::Enemy] {
            for (_, unit) in self.state.formation_mut(side).units_mut() {
                if unit.is_alive() {
                    unit.decay_cooldown();
                }
            }
        }
    }

    /// Strikes of every living unit on `side` whose interval divides `beat`.
    fn collect_strikes(&self, side: Side, beat: Beat) -> Strikes {
        let own = self.state.formation(side);
        let opposing = self.state.formation(side.opponent());
        let bonus = match side {
            Side::Player => self.state.conductor.bonus,
            Side::Enemy => Multiplier::NEUTRAL,
        };

        own.units()
            .filter(|(_, unit)| unit.is_alive() && beat.is_action_beat(unit.interval()))
            .filter_map(|(source, unit)| {
                let target = resolve_target(source, opposing)?;
                let defender = opposing.get(target)?;
                let damage =
                    strike_damage(unit.atk, bonus, effectiveness(unit.element, defender.element));
                Some(Strike {
                    source,
                    target,
                    damage,
                })
            })
            .collect()
    }

    fn apply_clash(&mut self, player: &Strike, enemy: &Strike) -> CombatEvent {
        let outcome = resolve_clash(player.damage, enemy.damage);
        let (loser_side, loser_lane) = match outcome.winner {
            Side::Player => (Side::Enemy, enemy.source),
            Side::Enemy => (Side::Player, player.source),
        };
        if let Some(loser) = self.state.formation_mut(loser_side).get_mut(loser_lane) {
            loser.take_damage(outcome.damage);
        }

        let name = self
            .state
            .player
            .get(player.source)
            .map(|unit| unit.name.as_str())
            .unwrap_or_default();
        let entry = match outcome.winner {
            Side::Player => format!("WIN! {name} (-{})", outcome.damage),
            Side::Enemy => format!("LOSE! {name} (-{})", outcome.damage),
        };
        self.state.log.push(entry);

        CombatEvent::Clash {
            player_lane: player.source,
            enemy_lane: enemy.source,
            player_damage: player.damage,
            enemy_damage: enemy.damage,
            winner: outcome.winner,
            damage: outcome.damage,
        }
    }

    fn apply_hit(&mut self, attacker: Side, strike: &Strike) -> CombatEvent {
        let defender_side = attacker.opponent();
        let defender_name = match self.state.formation_mut(defender_side).get_mut(strike.target) {
            Some(defender) => {
                defender.take_damage(strike.damage);
                defender.name.clone()
            }
            None => String::new(),
        };
        let attacker_name = self
            .state
            .formation(attacker)
            .get(strike.source)
            .map(|unit| unit.name.as_str())
            .unwrap_or_default();
        let entry = format!("{attacker_name} hits {defender_name} (-{})", strike.damage);
        self.state.log.push(entry);

        CombatEvent::Hit {
            attacker,
            source: strike.source,
            target: strike.target,
            damage: strike.damage,
        }
    }

    fn sweep_deaths(&mut self, report: &mut BeatReport) {
        for side in [Side::Player, Side::Enemy] {
            for (lane, unit) in self.state.formation_mut(side).units_mut() {
                if unit.sweep_death() {
                    report.events.push(CombatEvent::Defeated {
                        side,
                        lane,
                        unit: unit.id,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rhythm::Grade;
    use crate::state::{
        Element, Formation, MatchPhase, MatchResult, MatchState, Unit, UnitId, UnitStats,
    };

    fn unit(id: u32, name: &str, element: Element, atk: u32, hp: u32, interval: u32) -> Unit {
        Unit::new(UnitId(id), name, element, UnitStats::new(atk, hp, interval)).unwrap()
    }

    fn lane(index: usize) -> Lane {
        Lane::new(index).unwrap()
    }

    fn one_lane_match(player: Unit, enemy: Unit) -> MatchState {
        MatchState::new(
            Formation::empty().with_unit(lane(0), player),
            Formation::empty().with_unit(lane(0), enemy),
            MatchConfig::default(),
        )
    }

    fn beat_at(n: u64) -> Timestamp {
        Timestamp(n * 600)
    }

    #[test]
    fn brass_trumpet_beats_woodwind_flute() {
        let mut state = one_lane_match(
            unit(1, "Trumpet", Element::Brass, 20, 100, 2),
            unit(2, "Flute", Element::Woodwind, 15, 30, 2),
        );
        let mut engine = MatchEngine::new(&mut state);
        engine.start(Timestamp(0));

        assert!(engine.resolve_beat(beat_at(1)).is_empty());

        // pDmg = floor(20 * 1.5) = 30, eDmg = floor(15 * 0.5) = 7, enemy takes 23
        let report = engine.resolve_beat(beat_at(2));
        assert_eq!(
            report.events,
            vec![CombatEvent::Clash {
                player_lane: lane(0),
                enemy_lane: lane(0),
                player_damage: 30,
                enemy_damage: 7,
                winner: Side::Player,
                damage: 23,
            }]
        );
        assert_eq!(engine.state().enemy.get(lane(0)).unwrap().hp(), 7);
        assert_eq!(engine.state().player.get(lane(0)).unwrap().hp(), 100);
        assert_eq!(engine.state().log.latest(), Some("WIN! Trumpet (-23)"));

        engine.resolve_beat(beat_at(3));
        let report = engine.resolve_beat(beat_at(4));
        assert_eq!(report.result, Some(MatchResult::Win));
        assert!(engine.state().enemy.get(lane(0)).unwrap().is_dead());
        assert_eq!(engine.state().enemy.get(lane(0)).unwrap().hp(), 0);
        assert_eq!(
            report.defeated().collect::<Vec<_>>(),
            vec![(Side::Enemy, lane(0))]
        );
        assert_eq!(engine.state().phase(), MatchPhase::Finished(MatchResult::Win));
    }

    #[test]
    fn equal_clash_costs_enemy_one_hp() {
        let mut state = one_lane_match(
            unit(1, "Viola", Element::Strings, 10, 100, 1),
            unit(2, "Violin", Element::Strings, 10, 100, 1),
        );
        let mut engine = MatchEngine::new(&mut state);
        engine.resolve_beat(beat_at(1));
        assert_eq!(engine.state().enemy.get(lane(0)).unwrap().hp(), 99);
        assert_eq!(engine.state().player.get(lane(0)).unwrap().hp(), 100);
    }

    #[test]
    fn enemy_wins_clash_when_stronger() {
        let mut state = one_lane_match(
            unit(1, "Flute", Element::Woodwind, 10, 100, 1),
            unit(2, "Tuba", Element::Brass, 10, 100, 1),
        );
        let mut engine = MatchEngine::new(&mut state);
        let report = engine.resolve_beat(beat_at(1));
        // pDmg = floor(10 * 0.5) = 5, eDmg = floor(10 * 1.5) = 15
        assert!(matches!(
            report.events[0],
            CombatEvent::Clash {
                winner: Side::Enemy,
                damage: 10,
                ..
            }
        ));
        assert_eq!(engine.state().player.get(lane(0)).unwrap().hp(), 90);
        assert_eq!(engine.state().log.latest(), Some("LOSE! Flute (-10)"));
    }

    #[test]
    fn conductor_bonus_scales_player_damage_only() {
        let mut state = MatchState::new(
            Formation::empty().with_unit(lane(0), unit(1, "Horn", Element::Brass, 20, 100, 1)),
            Formation::empty().with_unit(lane(2), unit(2, "Harp", Element::Strings, 20, 500, 1)),
            MatchConfig::default(),
        );
        let mut engine = MatchEngine::new(&mut state);
        engine.start(Timestamp(0));
        let judgement = engine.tap(Timestamp(30)).unwrap();
        assert_eq!(judgement.grade, Grade::Perfect);

        // Player lane 0 targets lane 2 and enemy lane 2 targets lane 0: a clash.
        // pDmg = floor(20 * 1.5) = 30, eDmg = 20.
        let report = engine.resolve_beat(beat_at(1));
        assert!(matches!(
            report.events[0],
            CombatEvent::Clash {
                player_damage: 30,
                enemy_damage: 20,
                damage: 10,
                ..
            }
        ));
        assert_eq!(engine.state().enemy.get(lane(2)).unwrap().hp(), 490);
    }

    #[test]
    fn unclashed_strikes_deal_full_damage() {
        let mut state = MatchState::new(
            Formation::empty()
                .with_unit(lane(1), unit(1, "Cello", Element::Strings, 12, 100, 1))
                .with_unit(lane(3), unit(2, "Oboe", Element::Woodwind, 9, 100, 2)),
            Formation::empty().with_unit(lane(3), unit(3, "Snare", Element::Percussion, 8, 100, 1)),
            MatchConfig::default(),
        );
        let mut engine = MatchEngine::new(&mut state);

        // Beat 1: cello (lane 1) hits snare (lane 3) at x1.5, snare hits oboe
        // (mirrored lane 3) at x1.0; neither strike is answered.
        let report = engine.resolve_beat(beat_at(1));
        assert_eq!(
            report.events,
            vec![
                CombatEvent::Hit {
                    attacker: Side::Player,
                    source: lane(1),
                    target: lane(3),
                    damage: 18,
                },
                CombatEvent::Hit {
                    attacker: Side::Enemy,
                    source: lane(3),
                    target: lane(3),
                    damage: 8,
                },
            ]
        );
        assert_eq!(engine.state().enemy.get(lane(3)).unwrap().hp(), 82);
        assert_eq!(engine.state().player.get(lane(3)).unwrap().hp(), 92);
        assert_eq!(engine.state().log.latest(), Some("Snare hits Oboe (-8)"));
    }

    #[test]
    fn each_lane_clashes_at_most_once() {
        // Two player units both target enemy lane 2; only the mirrored
        // pair (2 <-> 2) clashes, the other strike lands unanswered.
        let mut state = MatchState::new(
            Formation::empty()
                .with_unit(lane(2), unit(1, "Alto", Element::Vocal, 10, 100, 1))
                .with_unit(lane(3), unit(2, "Tenor", Element::Vocal, 10, 100, 1)),
            Formation::empty().with_unit(lane(2), unit(3, "Bass", Element::Vocal, 10, 100, 1)),
            MatchConfig::default(),
        );
        let mut engine = MatchEngine::new(&mut state);
        let report = engine.resolve_beat(beat_at(1));

        let clashes = report
            .events
            .iter()
            .filter(|e| matches!(e, CombatEvent::Clash { .. }))
            .count();
        assert_eq!(clashes, 1);
        // 1 from the tied clash plus 10 from the unanswered strike
        assert_eq!(engine.state().enemy.get(lane(2)).unwrap().hp(), 89);
    }

    #[test]
    fn units_act_only_on_their_interval() {
        let mut state = one_lane_match(
            unit(1, "Marimba", Element::Percussion, 5, 1_000, 3),
            unit(2, "Soprano", Element::Vocal, 1, 1_000, 7),
        );
        let mut engine = MatchEngine::new(&mut state);
        let mut acted = Vec::new();
        for n in 1..=9 {
            if !engine.resolve_beat(beat_at(n)).is_empty() {
                acted.push(n);
            }
        }
        assert_eq!(acted, vec![3, 6, 7, 9]);
    }

    #[test]
    fn cooldowns_decay_on_measure_boundaries() {
        let mut state = one_lane_match(
            unit(1, "Bassoon", Element::Woodwind, 1, 1_000, 4).with_cooldown(8),
            unit(2, "Cymbals", Element::Percussion, 1, 1_000, 4),
        );
        let mut engine = MatchEngine::new(&mut state);
        let cooldown = |engine: &MatchEngine<'_>| {
            engine.state().player.get(lane(0)).unwrap().skill_cooldown()
        };

        engine.resolve_beat(beat_at(1));
        assert_eq!(cooldown(&engine), 7);
        for n in 2..=4 {
            engine.resolve_beat(beat_at(n));
            assert_eq!(cooldown(&engine), 7);
        }
        engine.resolve_beat(beat_at(5));
        assert_eq!(cooldown(&engine), 6);
        assert_eq!(engine.state().measure(), 2);
    }

    #[test]
    fn player_wipe_is_a_loss() {
        let mut state = one_lane_match(
            unit(1, "Harp", Element::Strings, 1, 5, 9),
            unit(2, "Tuba", Element::Brass, 50, 100, 1),
        );
        let mut engine = MatchEngine::new(&mut state);
        let report = engine.resolve_beat(beat_at(1));
        assert_eq!(report.result, Some(MatchResult::Lose));
        assert_eq!(engine.state().result(), Some(MatchResult::Lose));
    }

    #[test]
    fn terminal_match_ignores_inputs() {
        let mut state = one_lane_match(
            unit(1, "Tuba", Element::Brass, 500, 100, 1),
            unit(2, "Flute", Element::Woodwind, 1, 10, 1),
        );
        let mut engine = MatchEngine::new(&mut state);
        engine.resolve_beat(beat_at(1));
        assert_eq!(engine.state().result(), Some(MatchResult::Win));

        let snapshot = engine.state().clone();
        assert!(engine.resolve_beat(beat_at(2)).is_empty());
        assert!(engine.tap(beat_at(2)).is_none());
        assert!(engine.cast_skill(lane(0)).is_err());
        assert!(!engine.abandon());
        assert_eq!(engine.state(), &snapshot);
    }

    #[test]
    fn abandoned_match_stops_resolving() {
        let mut state = one_lane_match(
            unit(1, "Viola", Element::Strings, 10, 100, 1),
            unit(2, "Violin", Element::Strings, 10, 100, 1),
        );
        let mut engine = MatchEngine::new(&mut state);
        assert!(engine.abandon());
        assert!(engine.resolve_beat(beat_at(1)).is_empty());
        assert_eq!(engine.state().beat(), Beat::ZERO);
        assert_eq!(engine.state().phase(), MatchPhase::Abandoned);
    }

    #[test]
    fn log_keeps_three_latest_entries() {
        let mut state = one_lane_match(
            unit(1, "Viola", Element::Strings, 10, 1_000, 1),
            unit(2, "Violin", Element::Strings, 10, 1_000, 1),
        );
        let mut engine = MatchEngine::new(&mut state);
        for n in 1..=5 {
            engine.resolve_beat(beat_at(n));
        }
        assert_eq!(engine.state().log.len(), 3);
    }
}
