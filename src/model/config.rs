use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// Configuration from config.toml
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub celebration: CelebrationConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StorageConfig {
    /// Store file location (default: store.json in the data directory)
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CelebrationConfig {
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
    #[serde(default = "default_particles")]
    pub particles: usize,
    /// Set to false to skip the confetti entirely
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for CelebrationConfig {
    fn default() -> Self {
        CelebrationConfig {
            duration_ms: default_duration_ms(),
            particles: default_particles(),
            enabled: true,
        }
    }
}

fn default_duration_ms() -> u64 {
    5000
}

fn default_particles() -> usize {
    100
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct UiConfig {
    /// Color overrides keyed by theme slot, as "#RRGGBB"
    #[serde(default)]
    pub colors: HashMap<String, String>,
}
