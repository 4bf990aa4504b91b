//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
    sync::Arc,
};

use rad_config::{Config, resolve_path};
use rad_index::{Dataset, Resolver, SearchEngine};
use tracing::debug;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (default if no config files were found).
    pub config: Config,
    /// Dataset path given on the command line or in `RAD_DATA`.
    data_override: Option<PathBuf>,
    /// Engine holding the resolver once the dataset has loaded.
    engine: SearchEngine,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load(data_override: Option<PathBuf>) -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        let engine = SearchEngine::new(config.search.clone());
        Ok(Self {
            cwd,
            config,
            data_override,
            engine,
        })
    }

    /// Dataset path in effect: the override if given, else the configured path.
    ///
    /// Relative paths resolve against the working directory.
    pub fn dataset_path(&self) -> Result<PathBuf, ExitCode> {
        let path = self
            .data_override
            .as_deref()
            .unwrap_or(&self.config.dataset.path);
        resolve_path(&path.to_string_lossy(), &self.cwd).map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        })
    }

    /// Returns the resolver, loading the dataset on first use.
    pub fn resolver(&self) -> Result<Arc<Resolver>, ExitCode> {
        if let Ok(resolver) = self.engine.snapshot() {
            return Ok(resolver);
        }

        let path = self.dataset_path()?;
        debug!(path = %path.display(), "loading dataset");
        let dataset = load_dataset_or_failure(&path)?;
        self.engine.load(dataset).map_err(|e| {
            eprintln!("error: invalid dataset {}: {e}", path.display());
            ExitCode::FAILURE
        })
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}

/// Reads the dataset document or exits with an error.
fn load_dataset_or_failure(path: &Path) -> Result<Dataset, ExitCode> {
    Dataset::from_path(path).map_err(|e| {
        eprintln!("error: {e}");
        eprintln!("Set the dataset with --data, RAD_DATA, or [dataset] path in .rad.toml.");
        ExitCode::FAILURE
    })
}
