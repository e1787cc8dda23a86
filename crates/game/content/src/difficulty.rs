//! Stage difficulty scaling and enemy formation layout.

use rand::Rng;
use symphony_core::{Formation, Lane, MatchConfig, Multiplier, Rarity, Unit, UnitError};

use crate::generator::UnitFactory;

/// Difficulty parameters derived from a stage number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StageScaling {
    pub stage: u32,
    /// Stat multiplier for spawned enemies.
    pub scale: Multiplier,
    /// Every tenth stage is a boss stage.
    pub is_boss: bool,
    /// Chance (per mille) that a lane spawns an enemy on normal stages.
    pub spawn_chance: u32,
}

impl StageScaling {
    /// Lane that holds the boss on boss stages and the fallback enemy otherwise.
    pub const CENTER_LANE: Lane = Lane::CENTER;
    /// Extra hp multiplier for the boss.
    pub const BOSS_HP: Multiplier = Multiplier::from_hundredths(300);
    /// Spawn chance cap (per mille).
    pub const MAX_SPAWN_CHANCE: u32 = 900;

    /// Computes the scaling for `stage`.
    ///
    /// ```text
    /// scale        = 1 + 0.05 * stage + 0.2 * floor((stage - 1) / 10)
    /// spawn_chance = min(0.9, 0.6 + 0.003 * stage)
    /// ```
    ///
    /// Every step saturates, so absurd stage numbers yield the maximum scale
    /// instead of wrapping.
    pub fn for_stage(stage: u32) -> Self {
        let decades = stage.saturating_sub(1) / 10;
        let scale = Multiplier::from_hundredths(
            100u32
                .saturating_add(stage.saturating_mul(5))
                .saturating_add(decades.saturating_mul(20)),
        );
        let spawn_chance = 600u32
            .saturating_add(stage.saturating_mul(3))
            .min(Self::MAX_SPAWN_CHANCE);

        Self {
            stage,
            scale,
            is_boss: stage > 0 && stage % 10 == 0,
            spawn_chance,
        }
    }
}

/// Builds the enemy formation for a stage.
pub struct EnemyFormationBuilder {
    scaling: StageScaling,
}

impl EnemyFormationBuilder {
    pub fn new(scaling: StageScaling) -> Self {
        Self { scaling }
    }

    pub fn for_stage(stage: u32) -> Self {
        Self::new(StageScaling::for_stage(stage))
    }

    pub fn scaling(&self) -> &StageScaling {
        &self.scaling
    }

    /// Rolls the formation.
    ///
    /// Normal stages spawn a scaled Normal-tier unit per lane with the stage's
    /// spawn chance. Boss stages put an UltraRare "MAESTRO" with tripled hp in
    /// the center lane and an unscaled Normal unit in each other lane with a
    /// coin flip. An empty result falls back to one unscaled Normal unit in
    /// the center lane.
    pub fn build<F, R>(&self, factory: &mut F, rng: &mut R) -> Result<Formation, UnitError>
    where
        F: UnitFactory,
        R: Rng,
    {
        let mut lanes: [Option<Unit>; MatchConfig::LANES] = Default::default();

        for (index, slot) in lanes.iter_mut().enumerate() {
            *slot = if self.scaling.is_boss {
                if index == StageScaling::CENTER_LANE.index() {
                    Some(self.boss(factory)?)
                } else if rng.gen_bool(0.5) {
                    Some(factory.generate(Some(Rarity::Normal))?)
                } else {
                    None
                }
            } else if rng.gen_range(0..1000) < self.scaling.spawn_chance {
                Some(self.scaled(factory.generate(Some(Rarity::Normal))?, Multiplier::NEUTRAL))
            } else {
                None
            };
        }

        if lanes.iter().all(Option::is_none) {
            lanes[StageScaling::CENTER_LANE.index()] =
                Some(factory.generate(Some(Rarity::Normal))?);
        }

        Ok(Formation::from_lanes(lanes))
    }

    fn boss<F: UnitFactory>(&self, factory: &mut F) -> Result<Unit, UnitError> {
        let mut boss = self.scaled(
            factory.generate(Some(Rarity::UltraRare))?,
            StageScaling::BOSS_HP,
        );
        boss.name = format!("MAESTRO {}", boss.name);
        Ok(boss)
    }

    /// Applies the stage scale to attack and `scale x extra_hp` to max hp.
    fn scaled(&self, mut unit: Unit, extra_hp: Multiplier) -> Unit {
        unit.atk = self.scaling.scale.apply(unit.atk);
        let max_hp = self.scaling.scale.apply_with(extra_hp, unit.max_hp());
        unit.with_max_hp(max_hp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::RandomUnitFactory;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn scaling_values() {
        let s1 = StageScaling::for_stage(1);
        assert_eq!(s1.scale, Multiplier::from_hundredths(105));
        assert_eq!(s1.spawn_chance, 603);
        assert!(!s1.is_boss);

        let s10 = StageScaling::for_stage(10);
        assert_eq!(s10.scale, Multiplier::from_hundredths(150));
        assert!(s10.is_boss);

        let s11 = StageScaling::for_stage(11);
        assert_eq!(s11.scale, Multiplier::from_hundredths(175));

        let s100 = StageScaling::for_stage(100);
        assert_eq!(s100.spawn_chance, 900);
        assert_eq!(s100.scale, Multiplier::from_hundredths(780));
    }

    #[test]
    fn extreme_stages_saturate() {
        let last = StageScaling::for_stage(u32::MAX);
        assert_eq!(last.scale, Multiplier::from_hundredths(u32::MAX));
        assert_eq!(last.spawn_chance, StageScaling::MAX_SPAWN_CHANCE);
        assert!(!last.is_boss);

        let mut factory = RandomUnitFactory::new(ChaCha8Rng::seed_from_u64(3));
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let formation = EnemyFormationBuilder::for_stage(u32::MAX)
            .build(&mut factory, &mut rng)
            .unwrap();
        assert!(formation.has_living());
        assert!(
            formation
                .units()
                .all(|(_, unit)| unit.hp() == unit.max_hp() && unit.max_hp() > 0)
        );

        let boss = StageScaling::for_stage(4_294_967_290);
        assert!(boss.is_boss);
        assert_eq!(boss.scale, Multiplier::from_hundredths(u32::MAX));
    }

    #[test]
    fn boss_stage_layout() {
        let mut factory = RandomUnitFactory::new(ChaCha8Rng::seed_from_u64(5));
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let formation = EnemyFormationBuilder::for_stage(20)
            .build(&mut factory, &mut rng)
            .unwrap();

        let boss = formation.get(StageScaling::CENTER_LANE).unwrap();
        assert!(boss.name.starts_with("MAESTRO "));
        assert_eq!(boss.rarity, Rarity::UltraRare);
        // UltraRare base hp >= 200, scaled by 2.2 and tripled
        assert!(boss.max_hp() >= 1_320);
        assert_eq!(boss.hp(), boss.max_hp());

        for (lane, unit) in formation.units() {
            if lane != StageScaling::CENTER_LANE {
                assert_eq!(unit.rarity, Rarity::Normal);
                assert!(unit.max_hp() < 150);
            }
        }
    }

    #[test]
    fn normal_stages_scale_spawned_units() {
        let mut factory = RandomUnitFactory::new(ChaCha8Rng::seed_from_u64(9));
        let mut rng = ChaCha8Rng::seed_from_u64(10);
        for _ in 0..20 {
            let formation = EnemyFormationBuilder::for_stage(30)
                .build(&mut factory, &mut rng)
                .unwrap();
            assert!(formation.has_living());
        }

        // Stage 1 scale 1.05: a scaled Normal unit keeps within [105, 156].
        let scaled = EnemyFormationBuilder::for_stage(1);
        let unit = scaled.scaled(
            factory.generate(Some(Rarity::Normal)).unwrap(),
            Multiplier::NEUTRAL,
        );
        assert!((105..=156).contains(&unit.max_hp()));
    }

    #[test]
    fn never_builds_an_empty_formation() {
        let mut factory = RandomUnitFactory::new(ChaCha8Rng::seed_from_u64(1));
        for seed in 0..200 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let formation = EnemyFormationBuilder::for_stage(1)
                .build(&mut factory, &mut rng)
                .unwrap();
            assert!(formation.living_count() >= 1);
        }
    }
}
