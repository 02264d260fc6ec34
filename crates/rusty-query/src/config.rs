// File: src/config.rs
// Purpose: Configuration parsing from rusty-query.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level configuration file
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub query: QueryConfig,
}

/// How raw query strings are split into a key/value table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Treat `+` as an encoded space (default: true)
    #[serde(default = "default_true")]
    pub plus_as_space: bool,

    /// Trim surrounding whitespace from decoded values (default: false)
    #[serde(default = "default_false")]
    pub trim_values: bool,

    /// Which occurrence of a repeated key a lookup sees
    #[serde(default)]
    pub duplicate_keys: DuplicateKeys,
}

/// Resolution of repeated keys such as `?w=1&w=2`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateKeys {
    #[default]
    First,
    Last,
}

fn default_true() -> bool {
    true
}

fn default_false() -> bool {
    false
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            plus_as_space: true,
            trim_values: false,
            duplicate_keys: DuplicateKeys::First,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// A missing or empty file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load configuration from default path (./rusty-query.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("rusty-query.toml")
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(toml::from_str(content)?)
    }
}
