//! Configuration model definitions.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MemographConfig {
    /// Graph store connection
    pub graph: GraphConfig,

    /// Language-model endpoint
    pub llm: LlmConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Graph store connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Bolt URI of the store.
    pub uri: String,

    /// Username for authentication.
    pub user: String,

    /// Password for authentication.
    pub password: String,

    /// Database name; the server default when unset.
    pub database: Option<String>,

    /// Size of the shared connection pool.
    pub max_connections: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            // Compose service name; override for local development.
            uri: "bolt://neo4j:7687".to_string(),
            user: "neo4j".to_string(),
            password: "password".to_string(),
            database: None,
            max_connections: 16,
        }
    }
}

/// Language-model endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL of the OpenAI-compatible API.
    pub api_base: String,

    /// Bearer token.
    pub api_key: String,

    /// Model name sent with every request.
    pub model: String,

    /// Per-request timeout.
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.upstage.ai/v1/solar".to_string(),
            api_key: String::new(),
            model: "solar-pro".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Minimum level emitted (overridable via `RUST_LOG`).
    pub level: LogLevel,

    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Pretty,
        }
    }
}

/// Log verbosity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// The level as an env-filter directive.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable() {
        let config = MemographConfig::default();
        assert_eq!(config.graph.uri, "bolt://neo4j:7687");
        assert_eq!(config.graph.user, "neo4j");
        assert!(config.graph.database.is_none());
        assert_eq!(config.llm.model, "solar-pro");
        assert_eq!(config.llm.timeout, Duration::from_secs(30));
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn timeout_serializes_as_humantime() {
        let config = LlmConfig::default();
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["timeout"], "30s");
    }
}
