//! Configuration system for rad.
//!
//! rad uses TOML configuration files named `.rad.toml`. Configuration is resolved by walking
//! up the directory tree from the current working directory, collecting any `.rad.toml`
//! files found, then loading `~/.rad.toml` as the global config with lowest precedence.
//!
//! ```toml
//! [dataset]
//! path = "rad-data.json"
//!
//! [search]
//! threshold = 0.3
//! limit = 50
//! ```

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod resolve;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawDatasetSettings, RawSearchSettings, parse_config_file, parse_config_str,
};
pub use resolve::resolve_path;
use serde::{Deserialize, Serialize};
use toml::ser;

/// Default dataset file name, resolved against the working directory.
pub const DEFAULT_DATASET_FILENAME: &str = "rad-data.json";

/// Top-level merged configuration for rad.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Dataset location.
    pub dataset: DatasetSettings,
    /// Search tuning and result limits.
    pub search: SearchSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.rad.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        let config = merge_configs(&parsed)?;
        config.search.validate()?;
        Ok(config)
    }

    /// Serializes the effective settings to TOML format.
    pub fn settings_to_toml(&self) -> Result<String, ser::Error> {
        let serializable = SerializableSettings {
            dataset: &self.dataset,
            search: &self.search,
        };
        toml::to_string_pretty(&serializable)
    }
}

/// Dataset settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatasetSettings {
    /// Path to the dataset document.
    pub path: PathBuf,
}

impl Default for DatasetSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATASET_FILENAME),
        }
    }
}

/// Search tuning and result limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Normalized edit-distance threshold: 0.0 matches exactly, 1.0 matches anything.
    pub threshold: f64,
    /// Matches shorter than this many characters are ignored.
    pub min_match_len: usize,
    /// Default result limit for free-text search.
    pub limit: usize,
    /// Result limit for error message lookups.
    pub error_limit: usize,
    /// Result limit for annex-scoped search.
    pub annex_limit: usize,
    /// Default number of suggestions.
    pub suggestion_limit: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            min_match_len: 2,
            limit: 50,
            error_limit: 20,
            annex_limit: 100,
            suggestion_limit: 5,
        }
    }
}

impl SearchSettings {
    /// Checks that tuning values are within range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ConfigError::InvalidValue {
                key: "search.threshold",
                message: format!("{} is outside 0.0-1.0", self.threshold),
            });
        }
        if self.min_match_len == 0 {
            return Err(ConfigError::InvalidValue {
                key: "search.min_match_len",
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Borrowed view of the settings for TOML output.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// Dataset settings.
    dataset: &'a DatasetSettings,
    /// Search settings.
    search: &'a SearchSettings,
}
