//! Unit generation, stage difficulty, and data-driven content loaders.
//!
//! This crate produces the inputs a match starts from:
//! - Random units rolled from the rarity table (injectable RNG)
//! - Stage difficulty scaling and enemy formation layout
//! - Player rosters (data-driven via RON)
//! - Match configuration (data-driven via TOML)
//!
//! Content is consumed before a match begins and never mutates match state.

pub mod difficulty;
pub mod generator;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use difficulty::{EnemyFormationBuilder, StageScaling};
pub use generator::{RandomUnitFactory, UnitFactory, instrument_names};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, Roster, RosterLoader, RosterSpec};
