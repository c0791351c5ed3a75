mod loader;
mod types;

pub use loader::{ConfigError, MAX_POLL_INTERVAL_MS};
pub use types::{BridgeConfig, BufferConfig, LoggingConfig};
