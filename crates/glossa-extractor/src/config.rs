//! Configuration for the extraction pipeline

use crate::validate::MAX_FILE_SIZE;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Language label used when the caller does not name one
pub const DEFAULT_LANGUAGE: &str = "auto-detect";

/// Configuration for the extraction pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Maximum time for a single AI call (seconds)
    pub extraction_timeout_secs: u64,

    /// Largest accepted document (bytes); may be lowered, never raised
    pub max_file_size_bytes: u64,

    /// Session language used when none is given
    pub default_language: String,
}

impl ExtractorConfig {
    /// Get the extraction timeout as a Duration
    pub fn extraction_timeout(&self) -> Duration {
        Duration::from_secs(self.extraction_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.extraction_timeout_secs == 0 {
            return Err("extraction_timeout_secs must be greater than 0".to_string());
        }
        if self.max_file_size_bytes == 0 {
            return Err("max_file_size_bytes must be greater than 0".to_string());
        }
        if self.max_file_size_bytes > MAX_FILE_SIZE {
            return Err(format!(
                "max_file_size_bytes cannot exceed {} bytes",
                MAX_FILE_SIZE
            ));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            extraction_timeout_secs: 60,
            max_file_size_bytes: MAX_FILE_SIZE,
            default_language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}
