//! Configuration for the HTTP server.
//!
//! Settings come from an optional TOML file, then environment overrides
//! (`ANTHROPIC_API_KEY`, `DATABASE_PATH`, `LANGUAGE`, `PORT`).

use glossa_extractor::ExtractorConfig;
use glossa_llm::anthropic::DEFAULT_MODEL;
use glossa_llm::LlmConfig;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// A value is out of range or unparseable
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,

    /// SQLite database path
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Anthropic API key
    #[serde(default)]
    pub api_key: String,

    /// AI model used for extraction
    #[serde(default = "default_model")]
    pub model: String,

    /// Pipeline settings
    #[serde(default)]
    pub extractor: ExtractorConfig,
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_database_path() -> String {
    "glossa.db".to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            database_path: default_database_path(),
            api_key: String::new(),
            model: default_model(),
            extractor: ExtractorConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Apply environment-variable overrides
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, ignoring blank values
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(key) = get("ANTHROPIC_API_KEY") {
            self.api_key = key;
        }
        if let Some(path) = get("DATABASE_PATH") {
            self.database_path = path;
        }
        if let Some(language) = get("LANGUAGE") {
            self.extractor.default_language = language;
        }
        if let Some(port) = get("PORT") {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("PORT is not a valid port: {}", port)))?;
        }
        Ok(())
    }

    /// Check that the server can start with these settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingField(
                "api_key (or ANTHROPIC_API_KEY)".to_string(),
            ));
        }
        self.extractor.validate().map_err(ConfigError::Invalid)
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    /// Settings for the AI backend
    pub fn llm_config(&self) -> LlmConfig {
        LlmConfig {
            model: self.model.clone(),
            timeout_secs: self.extractor.extraction_timeout_secs,
            ..LlmConfig::with_api_key(self.api_key.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.database_path, "glossa.db");
        assert_eq!(config.extractor.default_language, "auto-detect");
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ServerConfig::default();
        config
            .apply_overrides(lookup(&[
                ("ANTHROPIC_API_KEY", "sk-env"),
                ("DATABASE_PATH", "/var/lib/glossa.db"),
                ("LANGUAGE", "Spanish"),
                ("PORT", "9090"),
            ]))
            .unwrap();

        assert_eq!(config.api_key, "sk-env");
        assert_eq!(config.database_path, "/var/lib/glossa.db");
        assert_eq!(config.extractor.default_language, "Spanish");
        assert_eq!(config.port, 9090);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_env_values_ignored() {
        let mut config = ServerConfig::default();
        config.apply_overrides(lookup(&[("PORT", " "), ("DATABASE_PATH", "")])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_path, "glossa.db");
    }

    #[test]
    fn test_bad_port() {
        let mut config = ServerConfig::default();
        let result = config.apply_overrides(lookup(&[("PORT", "eighty")]));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_missing_api_key() {
        let config = ServerConfig::default();
        assert!(matches!(config.validate(), Err(ConfigError::MissingField(_))));
    }

    #[test]
    fn test_from_toml() {
        let config: ServerConfig = toml::from_str(
            r#"
            port = 3000
            api_key = "sk-file"

            [extractor]
            extraction_timeout_secs = 45
            "#,
        )
        .unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.extractor.extraction_timeout_secs, 45);
        assert_eq!(config.llm_config().timeout_secs, 45);
        assert_eq!(config.bind_address, "0.0.0.0");
    }
}
