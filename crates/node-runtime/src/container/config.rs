//! # Node Configuration
//!
//! Defaults, overlaid by an optional JSON chain file, overlaid by
//! environment variables.
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `QC_CHAIN_CONFIG` | path of a JSON file holding a [`ChainConfig`] |
//! | `QC_FORK_LONDON` | london activation height |
//! | `QC_FORK_NIKARAGVA` | nikaragva activation height |
//! | `QC_LOG_LEVEL` or `RUST_LOG` | log filter (default `info`) |
//! | `QC_JSON_LOGS` | `true`/`1` for JSON log lines |

use std::path::{Path, PathBuf};

use qc_fork_manager::ForkError;
use qc_polybft_extra::{ExtraError, ForkSchedule};
use serde::{Deserialize, Serialize};

pub const CHAIN_CONFIG_ENV: &str = "QC_CHAIN_CONFIG";

/// Complete node configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeConfig {
    pub chain: ChainConfig,
    pub logging: LoggingConfig,
}

/// Chain parameters, loadable from a JSON chain file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    pub name: String,
    pub forks: ForkSchedule,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            name: "quantum-chain".to_string(),
            forks: ForkSchedule::default(),
        }
    }
}

impl ChainConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `qc_fork_manager=debug`.
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read chain config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse chain config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{var} must be a block number, got {value:?}")]
    InvalidEnv { var: &'static str, value: String },

    #[error(transparent)]
    Schedule(#[from] ExtraError),

    #[error(transparent)]
    Fork(#[from] ForkError),
}

impl NodeConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load using `var` as the environment.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = var(CHAIN_CONFIG_ENV) {
            config.chain = ChainConfig::from_file(Path::new(&path))?;
        }

        if let Some(height) = parse_height(&var, "QC_FORK_LONDON")? {
            config.chain.forks.london = Some(height);
        }
        if let Some(height) = parse_height(&var, "QC_FORK_NIKARAGVA")? {
            config.chain.forks.nikaragva = Some(height);
        }

        if let Some(level) = var("QC_LOG_LEVEL").or_else(|| var("RUST_LOG")) {
            config.logging.level = level;
        }
        if let Some(json) = var("QC_JSON_LOGS") {
            config.logging.json = json == "1" || json.eq_ignore_ascii_case("true");
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.chain.forks.validate()?;
        Ok(())
    }
}

fn parse_height(
    var: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<u64>, ConfigError> {
    var(key)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidEnv { var: key, value })
        })
        .transpose()
}
