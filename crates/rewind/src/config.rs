#![forbid(unsafe_code)]

//! Loading [`HistoryConfig`] from files.
//!
//! ```toml
//! # rewind.toml
//! max_depth = 250
//! # or, to keep every snapshot:
//! # max_depth = "unlimited"
//! ```
//!
//! ```rust,ignore
//! let config = HistoryConfig::from_toml_file("rewind.toml")?;
//! let config = HistoryConfig::from_json_str(r#"{ "max_depth": 250 }"#)?;
//! ```
//!
//! Missing fields take their defaults; unknown fields are rejected. Every
//! loader validates before returning.

use std::path::Path;

use thiserror::Error;

use crate::history::HistoryConfig;

/// Errors from loading a [`HistoryConfig`].
#[derive(Debug, Error)]
pub enum HistoryConfigError {
    /// I/O error reading a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parse error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// JSON parse error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// Validation errors.
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

impl HistoryConfig {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, HistoryConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, HistoryConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, HistoryConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validated()
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, HistoryConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Serialize to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.max_depth == 0 {
            errors.push("max_depth must be at least 1".to_string());
        }
        errors
    }

    fn validated(self) -> Result<Self, HistoryConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(HistoryConfigError::Validation(errors))
        }
    }
}

/// Wire form of `max_depth`: a positive integer, or `"unlimited"` for
/// [`HistoryConfig::unlimited`]. TOML integers are `i64`, so `usize::MAX`
/// cannot be written as a number.
pub(crate) mod max_depth {
    use serde::de::Error as _;
    use serde::ser::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    const UNLIMITED: &str = "unlimited";

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Depth(u64),
        Named(String),
    }

    pub fn serialize<S: Serializer>(value: &usize, serializer: S) -> Result<S::Ok, S::Error> {
        if *value == usize::MAX {
            return serializer.serialize_str(UNLIMITED);
        }
        let depth = u64::try_from(*value).map_err(S::Error::custom)?;
        serializer.serialize_u64(depth)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Depth(depth) => usize::try_from(depth).map_err(D::Error::custom),
            Repr::Named(name) if name == UNLIMITED => Ok(usize::MAX),
            Repr::Named(name) => Err(D::Error::custom(format!(
                "max_depth must be an integer or \"{UNLIMITED}\", got {name:?}"
            ))),
        }
    }
}
