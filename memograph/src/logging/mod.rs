//! Structured logging setup on top of the tracing crate.

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};

/// Error type for logging operations.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// Error in subscriber setup
    #[error("subscriber error: {0}")]
    Subscriber(String),
}

/// Result type for logging operations.
pub type Result<T> = std::result::Result<T, LogError>;

/// Initialize the global subscriber from configuration.
///
/// `RUST_LOG` wins over the configured level when set. Calling this twice is
/// harmless — a subscriber that is already installed stays installed.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let result = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };

    match result {
        Ok(()) => Ok(()),
        Err(err) => {
            let message = err.to_string();
            if message.contains("already been set") {
                Ok(())
            } else {
                Err(LogError::Subscriber(message))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;

    #[test]
    fn repeated_init_is_a_no_op() {
        let config = LoggingConfig {
            level: LogLevel::Debug,
            format: LogFormat::Compact,
        };
        assert!(init(&config).is_ok());
        assert!(init(&config).is_ok());
    }
}
