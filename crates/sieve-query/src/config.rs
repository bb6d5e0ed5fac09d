//! Engine configuration.
//!
//! [`QueryConfig`] can be built in code or loaded from YAML or JSON. Missing
//! keys take their defaults:
//!
//! ```yaml
//! default_page_size: 100
//! max_page_size: 1000
//! cancel_check_interval: 1024
//! case_insensitive_search: true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::descriptor::Paging;
use crate::error::{ConfigError, QueryError, Result};

/// Tunables of a [`QueryEngine`](crate::QueryEngine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Page size used when a query does not set `take`.
    pub default_page_size: usize,
    /// Upper bound for `take`. Larger requests are clamped.
    pub max_page_size: usize,
    /// Number of records scanned between cancellation checks.
    pub cancel_check_interval: usize,
    /// Whether free-text search ignores case.
    pub case_insensitive_search: bool,
}

impl Default for QueryConfig {
    fn default() -> Self {
        QueryConfig {
            default_page_size: 100,
            max_page_size: 1000,
            cancel_check_interval: 1024,
            case_insensitive_search: true,
        }
    }
}

impl QueryConfig {
    /// Parses and validates a YAML document.
    pub fn from_yaml_str(source: &str) -> std::result::Result<Self, ConfigError> {
        let config: QueryConfig = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a JSON document.
    pub fn from_json_str(source: &str) -> std::result::Result<Self, ConfigError> {
        let config: QueryConfig = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a config file. `.json` files are read as JSON, anything else
    /// as YAML.
    pub fn from_path(path: impl AsRef<Path>) -> std::result::Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&source),
            _ => Self::from_yaml_str(&source),
        }
    }

    /// Checks that the values are consistent.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.default_page_size == 0 {
            return Err(ConfigError::Invalid(
                "default_page_size must be positive".to_string(),
            ));
        }
        if self.max_page_size < self.default_page_size {
            return Err(ConfigError::Invalid(format!(
                "max_page_size ({}) is smaller than default_page_size ({})",
                self.max_page_size, self.default_page_size
            )));
        }
        if self.cancel_check_interval == 0 {
            return Err(ConfigError::Invalid(
                "cancel_check_interval must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Validates the requested `skip`/`take` and applies the page size limits.
    pub fn resolve_paging(&self, skip: i64, take: Option<i64>) -> Result<Paging> {
        if skip < 0 {
            return Err(QueryError::InvalidPageSize(format!(
                "skip must not be negative, got {skip}"
            )));
        }

        let take = match take {
            None if self.default_page_size == 0 => {
                return Err(QueryError::InvalidPageSize(
                    "default_page_size must be positive".to_string(),
                ));
            }
            None => self.default_page_size.min(self.max_page_size),
            Some(take) if take <= 0 => {
                return Err(QueryError::InvalidPageSize(format!(
                    "take must be positive, got {take}"
                )));
            }
            Some(take) => {
                let take = usize::try_from(take).unwrap_or(usize::MAX);
                if take > self.max_page_size {
                    warn!(
                        requested = take,
                        max = self.max_page_size,
                        "page size clamped"
                    );
                    self.max_page_size
                } else {
                    take
                }
            }
        };

        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        Ok(Paging { skip, take })
    }
}
