//! Client configuration read from the environment.
use std::env;
use std::path::PathBuf;

/// Settings for one headless match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Seed for unit generation and enemy spawn rolls.
    pub seed: u64,
    pub stage: u32,
    /// Overrides the tempo from `config.toml`.
    pub bpm: Option<u32>,
    /// How long after each beat the auto-conductor taps.
    pub tap_offset_ms: u64,
    /// Directory holding `roster.ron` and `config.toml`.
    pub data_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            stage: 1,
            bpm: None,
            tap_offset_ms: 20,
            data_dir: None,
        }
    }
}

impl ClientConfig {
    /// Construct client configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SYMPHONY_SEED` - RNG seed (default: 42)
    /// - `SYMPHONY_STAGE` - Stage number (default: 1)
    /// - `SYMPHONY_BPM` - Tempo override
    /// - `SYMPHONY_TAP_OFFSET_MS` - Tap delay after each beat (default: 20)
    /// - `SYMPHONY_DATA_DIR` - Content directory; random roster when unset
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(seed) = read("SYMPHONY_SEED").and_then(|v| v.trim().parse().ok()) {
            config.seed = seed;
        }
        if let Some(stage) = read("SYMPHONY_STAGE").and_then(|v| v.trim().parse().ok()) {
            config.stage = stage;
        }
        config.bpm = read("SYMPHONY_BPM").and_then(|v| v.trim().parse().ok());
        if let Some(offset) = read("SYMPHONY_TAP_OFFSET_MS").and_then(|v| v.trim().parse().ok()) {
            config.tap_offset_ms = offset;
        }
        config.data_dir = read("SYMPHONY_DATA_DIR").map(PathBuf::from);

        config
    }
}
