//! Content factory for loading match content from a data directory.

use std::path::{Path, PathBuf};

use symphony_core::MatchConfig;

use crate::loaders::{ConfigLoader, LoadResult, Roster, RosterLoader};

/// Content factory that loads all match content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── roster.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load match configuration from `config.toml`, falling back to defaults
    /// when the file does not exist.
    pub fn load_config(&self) -> LoadResult<MatchConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(MatchConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the player roster from `roster.ron`.
    pub fn load_roster(&self) -> LoadResult<Roster> {
        let path = self.data_dir.join("roster.ron");
        RosterLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
