//! Content loaders for reading match data from files.
//!
//! Rosters are RON, match configuration is TOML. Both deserialize straight
//! into symphony-core types.

pub mod config;
pub mod factory;
pub mod roster;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use roster::{Roster, RosterLoader, RosterSpec};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
