//! Configuration loading and management

use crate::core::error::{ConfigError, SiftResult};
use crate::core::page::PageRequest;
use serde::{Deserialize, Serialize};

/// Paging defaults and limits applied when callers build page requests from
/// untrusted input (query strings, UI state).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagingConfig {
    /// Page length used when the caller supplies none
    #[serde(default = "default_page_length")]
    pub default_page_length: usize,

    /// Upper bound on caller-supplied page lengths
    #[serde(default = "default_max_page_length")]
    pub max_page_length: usize,
}

fn default_page_length() -> usize {
    20
}

fn default_max_page_length() -> usize {
    100
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_page_length: default_page_length(),
            max_page_length: default_max_page_length(),
        }
    }
}

impl PagingConfig {
    /// Build a [`PageRequest`] from caller input, applying the default and
    /// clamping to the configured maximum (minimum 1).
    pub fn page_request(&self, start_index: usize, page_length: Option<usize>) -> PageRequest {
        let length = page_length
            .unwrap_or(self.default_page_length)
            .clamp(1, self.max_page_length);
        PageRequest::new(start_index, length)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.default_page_length == 0 {
            return Err(ConfigError::InvalidValue {
                field: "default_page_length".to_string(),
                value: self.default_page_length.to_string(),
                message: "must be positive".to_string(),
            });
        }
        if self.max_page_length < self.default_page_length {
            return Err(ConfigError::InvalidValue {
                field: "max_page_length".to_string(),
                value: self.max_page_length.to_string(),
                message: "must be at least default_page_length".to_string(),
            });
        }
        Ok(())
    }
}

/// Complete toolkit configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiftConfig {
    /// Paging defaults and limits
    #[serde(default)]
    pub paging: PagingConfig,
}

impl SiftConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> SiftResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            file: Some(path.to_string()),
            message: e.to_string(),
        })?;
        config.paging.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> SiftResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.paging.validate()?;
        Ok(config)
    }
}
