//! Builds the inputs of a match: rules, player formation, enemy formation.

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use symphony_content::{ContentFactory, EnemyFormationBuilder, RandomUnitFactory, UnitFactory};
use symphony_core::{Formation, MatchConfig, Rarity, Unit};

use crate::config::ClientConfig;

/// Enemy ids start here so they never collide with generated player ids.
const ENEMY_FIRST_ID: u32 = 1_000;

/// Match rules from `config.toml` (or defaults), with the BPM override applied.
pub fn match_config(config: &ClientConfig) -> Result<MatchConfig> {
    let mut rules = match &config.data_dir {
        Some(dir) => ContentFactory::new(dir)
            .load_config()
            .with_context(|| format!("loading match config from {}", dir.display()))?,
        None => MatchConfig::default(),
    };
    if let Some(bpm) = config.bpm {
        rules.bpm = bpm;
    }
    Ok(rules)
}

/// Player formation from `roster.ron`, or five seeded Normal units.
pub fn player_formation(config: &ClientConfig) -> Result<Formation> {
    if let Some(dir) = &config.data_dir {
        let roster = ContentFactory::new(dir)
            .load_roster()
            .with_context(|| format!("loading roster from {}", dir.display()))?;
        return Ok(roster.deploy());
    }

    let mut factory = RandomUnitFactory::new(ChaCha8Rng::seed_from_u64(config.seed));
    let units = (0..MatchConfig::LANES)
        .map(|_| factory.generate(Some(Rarity::Normal)))
        .collect::<Result<Vec<Unit>, _>>()?;
    Ok(Formation::deploy(units.iter().map(Some)))
}

/// Enemy formation for the configured stage.
pub fn enemy_formation(config: &ClientConfig) -> Result<Formation> {
    let seed = config.seed.wrapping_add(u64::from(config.stage));
    let mut factory =
        RandomUnitFactory::new(ChaCha8Rng::seed_from_u64(seed)).with_first_id(ENEMY_FIRST_ID);
    let mut spawn_rng = ChaCha8Rng::seed_from_u64(!seed);

    let formation =
        EnemyFormationBuilder::for_stage(config.stage).build(&mut factory, &mut spawn_rng)?;
    Ok(formation)
}
