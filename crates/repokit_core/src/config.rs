//! Repository configuration.
//!
//! # Invariants
//! - `per_page` is never zero in any constructed or deserialized config.
//! - Explicit page sizes passed to retrieval calls never modify the config.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Page size used when a retrieval call omits one.
pub const DEFAULT_PER_PAGE: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    InvalidPerPage(u32),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPerPage(value) => {
                write!(f, "per_page must be greater than zero, got {value}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Repository settings. Deserialization applies the same checks as [`new`].
///
/// [`new`]: RepositoryConfig::new
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRepositoryConfig")]
pub struct RepositoryConfig {
    per_page: u32,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl RepositoryConfig {
    pub fn new(per_page: u32) -> Result<Self, ConfigError> {
        if per_page == 0 {
            return Err(ConfigError::InvalidPerPage(per_page));
        }
        Ok(Self { per_page })
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }
}

/// Unchecked wire shape; missing fields take their defaults.
#[derive(Deserialize)]
#[serde(default)]
struct RawRepositoryConfig {
    per_page: u32,
}

impl Default for RawRepositoryConfig {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl TryFrom<RawRepositoryConfig> for RepositoryConfig {
    type Error = ConfigError;

    fn try_from(raw: RawRepositoryConfig) -> Result<Self, Self::Error> {
        Self::new(raw.per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, RepositoryConfig, DEFAULT_PER_PAGE};

    #[test]
    fn default_page_size_is_fifteen() {
        assert_eq!(RepositoryConfig::default().per_page(), DEFAULT_PER_PAGE);
        assert_eq!(DEFAULT_PER_PAGE, 15);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        assert_eq!(
            RepositoryConfig::new(0).unwrap_err(),
            ConfigError::InvalidPerPage(0)
        );
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: RepositoryConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, RepositoryConfig::default());

        let config: RepositoryConfig = serde_json::from_str(r#"{"per_page": 40}"#).unwrap();
        assert_eq!(config.per_page(), 40);
    }

    #[test]
    fn deserialized_zero_page_size_is_rejected() {
        let err = serde_json::from_str::<RepositoryConfig>(r#"{"per_page": 0}"#).unwrap_err();
        assert!(err.to_string().contains("per_page must be greater than zero"));
    }

    #[test]
    fn serializes_as_plain_object() {
        let config = RepositoryConfig::new(25).unwrap();
        assert_eq!(
            serde_json::to_value(config).unwrap(),
            serde_json::json!({"per_page": 25})
        );
    }
}
