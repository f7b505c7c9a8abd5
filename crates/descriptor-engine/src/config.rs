//! Realm configuration.
//!
//! Loaded from TOML; a missing file yields the defaults.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::resolver::MAX_PROTOTYPE_CHAIN_DEPTH;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid realm config: {0}")]
    Invalid(String),
    #[error("failed to parse realm config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to read realm config: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RealmConfig {
    /// Prefix for event trace ids.
    pub trace_prefix: String,
    /// Prototype hops followed before a walk is cut off.
    pub max_prototype_depth: u32,
    pub record_events: bool,
    /// Events buffered before the oldest are dropped.
    pub event_capacity: usize,
}

impl Default for RealmConfig {
    fn default() -> Self {
        Self {
            trace_prefix: "trace-object-model".to_string(),
            max_prototype_depth: MAX_PROTOTYPE_CHAIN_DEPTH,
            record_events: true,
            event_capacity: 4096,
        }
    }
}

impl RealmConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trace_prefix.trim().is_empty() {
            return Err(ConfigError::Invalid("trace_prefix is required".to_string()));
        }
        if self.max_prototype_depth == 0 {
            return Err(ConfigError::Invalid(
                "max_prototype_depth must be at least 1".to_string(),
            ));
        }
        if self.record_events && self.event_capacity == 0 {
            return Err(ConfigError::Invalid(
                "event_capacity must be non-zero when record_events is set".to_string(),
            ));
        }
        Ok(())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_toml(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if !path.as_ref().exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }
}
