//! # Pure Data Module - Data Transfer Objects Only
//!
//! ## Responsibilities
//!
//! - Define configuration data structures
//! - Provide TOML → DTO mapping
//!
//! ## Prohibited
//!
//! - No business logic or policies
//! - No validation logic
//! - No default value calculation
//!
//! > **This module contains data only, no policy, no validation.**
//! > Default locations are resolved by the bootstrap wiring, not here.

use std::path::PathBuf;

/// Application configuration DTO (pure data, no logic)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Root directory of the local document store (may be empty - this is a fact, not an error)
    pub data_dir: PathBuf,

    /// Directory for log files (path info only, no existence check)
    pub log_dir: PathBuf,

    /// System color-scheme preference, used when no theme was stored yet
    pub prefers_dark: bool,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    ///
    /// **Prohibited**: This method must NOT contain any validation
    /// or default value logic. Empty strings are valid "facts".
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        Ok(Self {
            data_dir: PathBuf::from(
                toml_value
                    .get("storage")
                    .and_then(|s| s.get("data_dir"))
                    .and_then(|v| v.as_str())
                    .unwrap_or(""),
            ),
            log_dir: PathBuf::from(
                toml_value
                    .get("logging")
                    .and_then(|l| l.get("dir"))
                    .and_then(|v| v.as_str())
                    .unwrap_or(""),
            ),
            prefers_dark: toml_value
                .get("appearance")
                .and_then(|a| a.get("prefers_dark"))
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
        })
    }

    /// Create empty AppConfig (all empty/default values)
    ///
    /// **Note**: This is a pure data constructor with "empty" as valid facts.
    pub fn empty() -> Self {
        Self {
            data_dir: PathBuf::new(),
            log_dir: PathBuf::new(),
            prefers_dark: false,
        }
    }
}
