//! Configuration file parsing.
//!
//! Parses individual `.rad.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{fs, path::Path};

use serde::Deserialize;

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Dataset section.
    pub dataset: Option<RawDatasetSettings>,
    /// Search section.
    pub search: Option<RawSearchSettings>,
}

/// Raw dataset settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawDatasetSettings {
    /// Path to the dataset document, relative to the config file.
    pub path: Option<String>,
}

/// Raw search settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSearchSettings {
    /// Normalized edit-distance threshold (0.0-1.0).
    pub threshold: Option<f64>,
    /// Minimum match fragment length in characters.
    pub min_match_len: Option<usize>,
    /// Default result limit for free-text search.
    pub limit: Option<usize>,
    /// Result limit for error message lookups.
    pub error_limit: Option<usize>,
    /// Result limit for annex-scoped search.
    pub annex_limit: Option<usize>,
    /// Default number of suggestions.
    pub suggestion_limit: Option<usize>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Returns true if the file at `path` parses and sets `root = true`.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}
