use serde::{Deserialize, Serialize};

use crate::bridge::MouseTracking;

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// How often a blocked reader re-checks for host input, in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Pointer tracking granularity: "cell", "all" or "off".
    #[serde(default)]
    pub mouse_tracking: MouseTracking,
    #[serde(default)]
    pub buffers: BufferConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Byte queue limits. Unset means unbounded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BufferConfig {
    /// Host input kept before the oldest bytes are dropped.
    #[serde(default)]
    pub input_limit_bytes: Option<usize>,
    /// Program output kept before the oldest bytes are dropped.
    #[serde(default)]
    pub output_limit_bytes: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_poll_interval_ms() -> u64 {
    100
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            mouse_tracking: MouseTracking::default(),
            buffers: BufferConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}
