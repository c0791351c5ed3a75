use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::BridgeConfig;

/// Largest accepted poll interval. Anything slower makes input feel stuck.
pub const MAX_POLL_INTERVAL_MS: u64 = 5_000;

/// Why a bridge configuration could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read bridge config {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("bridge config {path} is not valid TOML: {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid bridge setting: {message}")]
    ValidationError { message: String },
}

impl BridgeConfig {
    /// `termbridge/config.toml` under the platform config directory, or
    /// relative to the working directory when the platform has none.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("termbridge").join("config.toml")
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// A missing file means "all defaults"; a present one must parse and
    /// pass [`BridgeConfig::validate`].
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(BridgeConfig::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: BridgeConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                source: e,
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Rejects a poll interval outside `1..=MAX_POLL_INTERVAL_MS` and zero
    /// buffer limits.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 || self.poll_interval_ms > MAX_POLL_INTERVAL_MS {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "poll_interval_ms must be between 1 and {}, got {}",
                    MAX_POLL_INTERVAL_MS, self.poll_interval_ms
                ),
            });
        }

        let limits = [
            ("input_limit_bytes", self.buffers.input_limit_bytes),
            ("output_limit_bytes", self.buffers.output_limit_bytes),
        ];
        for (name, limit) in limits {
            if limit == Some(0) {
                return Err(ConfigError::ValidationError {
                    message: format!("buffers.{} must be greater than zero", name),
                });
            }
        }

        Ok(())
    }
}
