//! Integration tests for rad-config.
//!
//! Tests the full configuration loading pipeline: discovery -> parse -> resolve -> merge.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use rad_config::{CONFIG_FILENAME, Config, ConfigError};

/// Test helper to create a temporary directory structure for tests.
struct TestEnv {
    root: tempfile::TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self) -> &Path {
        self.root.path()
    }

    /// Writes a `.rad.toml` under `rel_dir` and returns its path.
    fn create_config(&self, rel_dir: &str, content: &str) -> PathBuf {
        let dir = self.root.path().join(rel_dir);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILENAME);
        fs::write(&path, content).unwrap();
        path
    }
}

#[test]
fn test_nested_configs_merge_with_closest_winning() {
    let env = TestEnv::new();
    env.create_config(
        "",
        "root = true\n[dataset]\npath = \"shared/rad.json\"\n[search]\nlimit = 30\nerror_limit = 15\n",
    );
    env.create_config("ops", "[search]\nlimit = 12\n");

    let config = Config::load(&env.path().join("ops")).unwrap();

    assert_eq!(config.search.limit, 12);
    assert_eq!(config.search.error_limit, 15);
    assert_eq!(config.search.threshold, 0.3);
    assert_eq!(config.dataset.path, env.path().join("shared/rad.json"));
    assert_eq!(config.config_root, Some(env.path().join("ops")));
}

#[test]
fn test_invalid_threshold_fails_load() {
    let env = TestEnv::new();
    env.create_config("", "root = true\n[search]\nthreshold = -0.1\n");

    let err = Config::load(env.path()).unwrap_err();

    assert!(matches!(
        err,
        ConfigError::InvalidValue {
            key: "search.threshold",
            ..
        }
    ));
}

#[test]
fn test_malformed_toml_reports_file() {
    let env = TestEnv::new();
    let path = env.create_config("", "root = true\n[search\n");

    let err = Config::load(env.path()).unwrap_err();

    match err {
        ConfigError::ParseToml { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_load_from_empty_file_list_is_default() {
    let config = Config::load_from_files(&[]).unwrap();
    assert_eq!(config.dataset.path, PathBuf::from("rad-data.json"));
    assert_eq!(config.search.suggestion_limit, 5);
}
