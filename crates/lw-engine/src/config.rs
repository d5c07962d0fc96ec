//! Engine configuration, loadable from TOML.

use serde::Deserialize;

/// Top-level configuration for the parsing engine.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfig {
    /// Memory ceiling applied to record accumulation.
    #[serde(default)]
    pub limits: MemoryLimitConfig,
}

/// Bounds checked before every accumulation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MemoryLimitConfig {
    /// Maximum number of records held in memory at once.
    #[serde(default = "default_max_records")]
    pub max_records: usize,
    /// Maximum approximate size of held records, in bytes. None disables the
    /// size check.
    #[serde(default)]
    pub max_bytes: Option<usize>,
}

fn default_max_records() -> usize {
    1_000_000
}

impl Default for MemoryLimitConfig {
    fn default() -> Self {
        Self {
            max_records: default_max_records(),
            max_bytes: None,
        }
    }
}

impl MemoryLimitConfig {
    pub fn records(max_records: usize) -> Self {
        Self {
            max_records,
            max_bytes: None,
        }
    }
}

impl EngineConfig {
    /// Parse config from a TOML string.
    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(contents)?;
        Ok(config)
    }

    /// Load config from a TOML file path.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}
