//! Configuration system.
//!
//! Configuration is loaded from defaults, an optional TOML file and
//! environment variables, then validated before anything connects anywhere.

mod loader;
mod models;
mod validation;

pub use loader::ConfigLoader;
pub use models::*;

/// Default configuration file names, tried in order.
pub const DEFAULT_CONFIG_FILES: &[&str] = &[
    "memograph.toml",
    ".memograph/config.toml",
];

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "MEMOGRAPH_";

/// Configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error occurred during file loading
    #[error("Failed to load configuration file: {0}")]
    FileLoadError(String),

    /// Error occurred during validation
    #[error("Configuration validation error: {0}")]
    ValidationError(String),

    /// Error occurred during parsing
    #[error("Configuration parsing error: {0}")]
    ParseError(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
