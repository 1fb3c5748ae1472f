//! Configuration loader.
//!
//! Merges, in order of increasing precedence: built-in defaults, an optional
//! TOML file (explicit path, working directory, or XDG config directory),
//! and `MEMOGRAPH_`-prefixed environment variables.

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use super::{ConfigError, DEFAULT_CONFIG_FILES, ENV_PREFIX, Result, models::MemographConfig, validation};

/// Configuration loader that handles loading from multiple sources.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    figment: Figment,
}

impl ConfigLoader {
    /// Create a new configuration loader seeded with default values.
    pub fn new() -> Self {
        let figment = Figment::new().merge(Serialized::defaults(MemographConfig::default()));
        Self { figment }
    }

    /// Load configuration from a TOML file.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<&mut Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileLoadError(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let figment = std::mem::take(&mut self.figment).merge(Toml::file(path));
        self.figment = figment;
        Ok(self)
    }

    /// Attempt to load from default configuration file locations.
    pub fn load_default_files(&mut self) -> &mut Self {
        for file in DEFAULT_CONFIG_FILES {
            let path = PathBuf::from(file);
            if path.exists() && self.load_file(&path).is_ok() {
                return self;
            }
        }

        if let Some(proj_dirs) = directories::ProjectDirs::from("org", "memograph", "memograph") {
            let path = proj_dirs.config_dir().join("config.toml");
            if path.exists() {
                let _ = self.load_file(&path);
            }
        }

        self
    }

    /// Load configuration from environment variables.
    ///
    /// Nested keys use a double underscore: `MEMOGRAPH_GRAPH__URI`,
    /// `MEMOGRAPH_LLM__API_KEY`.
    pub fn load_env(&mut self) -> &mut Self {
        let figment =
            std::mem::take(&mut self.figment).merge(Env::prefixed(ENV_PREFIX).split("__"));
        self.figment = figment;
        self
    }

    /// Load configuration from a custom source.
    pub fn merge<T: figment::Provider>(&mut self, provider: T) -> &mut Self {
        let figment = std::mem::take(&mut self.figment).merge(provider);
        self.figment = figment;
        self
    }

    /// Extract and validate the configuration.
    pub fn extract(&self) -> Result<MemographConfig> {
        let config: MemographConfig = self
            .figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        validation::validate_config(&config)?;

        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_extract_cleanly() {
        let config = ConfigLoader::new().extract().unwrap();
        assert_eq!(config.graph.uri, "bolt://neo4j:7687");
    }

    #[test]
    fn toml_overrides_defaults() {
        let mut loader = ConfigLoader::new();
        loader.merge(Toml::string(
            r#"
            [graph]
            uri = "bolt://localhost:7687"
            password = "secret"

            [llm]
            api_key = "key"
            timeout = "45s"
            "#,
        ));
        let config = loader.extract().unwrap();
        assert_eq!(config.graph.uri, "bolt://localhost:7687");
        assert_eq!(config.graph.password, "secret");
        assert_eq!(config.llm.timeout, std::time::Duration::from_secs(45));
        // untouched sections keep their defaults
        assert_eq!(config.llm.model, "solar-pro");
    }

    #[test]
    fn invalid_values_fail_validation() {
        let mut loader = ConfigLoader::new();
        loader.merge(Toml::string(
            r#"
            [graph]
            uri = ""
            "#,
        ));
        assert!(matches!(
            loader.extract(),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
