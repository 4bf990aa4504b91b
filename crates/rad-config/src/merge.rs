//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`,
//! applying precedence rules and resolving paths.

use std::path::{Path, PathBuf};

use crate::{
    Config, ConfigError, DatasetSettings, SearchSettings,
    parse::{RawConfig, RawSearchSettings},
    resolve::resolve_path,
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

impl ParsedConfig {
    /// Directory containing the config file.
    fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config). For every setting the first defined value wins.
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    if configs.is_empty() {
        return Ok(Config::default());
    }

    let dataset = merge_dataset_settings(configs)?;
    let search = merge_search_settings(configs);
    let config_root = configs.first().map(|c| c.dir().to_path_buf());

    Ok(Config {
        dataset,
        search,
        config_root,
    })
}

/// Takes the dataset path from the highest-precedence file that sets one.
fn merge_dataset_settings(configs: &[ParsedConfig]) -> Result<DatasetSettings, ConfigError> {
    let defined = configs.iter().find_map(|parsed| {
        parsed
            .config
            .dataset
            .as_ref()
            .and_then(|d| d.path.as_deref())
            .map(|path| (path, parsed.dir()))
    });

    match defined {
        Some((path, dir)) => Ok(DatasetSettings {
            path: resolve_path(path, dir)?,
        }),
        None => Ok(DatasetSettings::default()),
    }
}

/// Merges search settings, taking first defined value for each field.
fn merge_search_settings(configs: &[ParsedConfig]) -> SearchSettings {
    let mut result = SearchSettings::default();

    // Lowest precedence first so higher precedence overwrites
    for parsed in configs.iter().rev() {
        if let Some(ref search) = parsed.config.search {
            apply_raw_search(&mut result, search);
        }
    }

    result
}

/// Applies raw search settings to result, overwriting any present values.
fn apply_raw_search(result: &mut SearchSettings, raw: &RawSearchSettings) {
    if let Some(v) = raw.threshold {
        result.threshold = v;
    }
    if let Some(v) = raw.min_match_len {
        result.min_match_len = v;
    }
    if let Some(v) = raw.limit {
        result.limit = v;
    }
    if let Some(v) = raw.error_limit {
        result.error_limit = v;
    }
    if let Some(v) = raw.annex_limit {
        result.annex_limit = v;
    }
    if let Some(v) = raw.suggestion_limit {
        result.suggestion_limit = v;
    }
}
