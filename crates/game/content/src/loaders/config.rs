//! Match configuration loader.

use std::path::Path;

use symphony_core::MatchConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for match configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a [`MatchConfig`] from a TOML file.
    ///
    /// Every field is optional; omitted fields keep their defaults.
    pub fn load(path: &Path) -> LoadResult<MatchConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<MatchConfig> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))
    }
}
