use std::path::PathBuf;

use clap::Parser;

use crate::bridge::MouseTracking;
use crate::config::{BridgeConfig, ConfigError};

/// Run a terminal program behind a host bridge, driven by JSON-lines
/// commands on stdin.
#[derive(Debug, Parser)]
#[command(name = "termbridge", version)]
pub struct Cli {
    /// Config file (default: ~/.config/termbridge/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Input poll interval in milliseconds
    #[arg(long)]
    pub poll_interval_ms: Option<u64>,

    /// Pointer tracking: cell, all or off
    #[arg(long)]
    pub mouse_tracking: Option<MouseTracking>,

    /// Log filter directive (RUST_LOG wins)
    #[arg(long)]
    pub log_filter: Option<String>,
}

impl Cli {
    /// Load the config file and apply command-line overrides on top.
    pub fn resolve_config(&self) -> Result<BridgeConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => BridgeConfig::load_from(path)?,
            None => BridgeConfig::load()?,
        };

        if let Some(interval) = self.poll_interval_ms {
            config.poll_interval_ms = interval;
        }
        if let Some(tracking) = self.mouse_tracking {
            config.mouse_tracking = tracking;
        }
        if let Some(filter) = &self.log_filter {
            config.logging.filter = filter.clone();
        }

        config.validate()?;
        Ok(config)
    }
}
