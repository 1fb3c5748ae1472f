//! Configuration validation.

use super::{ConfigError, Result, models::MemographConfig};

/// Validate a configuration, returning the first problem found.
pub fn validate_config(config: &MemographConfig) -> Result<()> {
    if config.graph.uri.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "graph.uri must not be empty".to_string(),
        ));
    }
    if config.graph.max_connections == 0 {
        return Err(ConfigError::ValidationError(
            "graph.max_connections must be greater than 0".to_string(),
        ));
    }
    if config.llm.api_base.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "llm.api_base must not be empty".to_string(),
        ));
    }
    if config.llm.model.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "llm.model must not be empty".to_string(),
        ));
    }
    if config.llm.timeout.is_zero() {
        return Err(ConfigError::ValidationError(
            "llm.timeout must be greater than 0".to_string(),
        ));
    }
    Ok(())
}
