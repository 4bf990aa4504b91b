//! Shared, reloadable handle to the current resolver.

use std::sync::Arc;

use parking_lot::RwLock;
use rad_config::SearchSettings;
use tracing::info;

use crate::{Dataset, IndexError, Resolver};

/// Publishes the resolver for the most recently loaded dataset.
///
/// The engine starts unready and every query fails with [`IndexError::NotReady`] until
/// a dataset loads. Loading builds a complete new resolver before swapping it in, so
/// readers holding a [`snapshot`](Self::snapshot) finish against the old data and a
/// failed load leaves the current resolver in place.
pub struct SearchEngine {
    /// Settings for every resolver this engine builds.
    settings: SearchSettings,
    /// Current resolver, `None` until the first successful load.
    current: RwLock<Option<Arc<Resolver>>>,
}

impl SearchEngine {
    /// Creates an engine with no dataset loaded.
    pub fn new(settings: SearchSettings) -> Self {
        Self {
            settings,
            current: RwLock::new(None),
        }
    }

    /// Builds a resolver for `dataset` and makes it current.
    pub fn load(&self, dataset: Dataset) -> Result<Arc<Resolver>, IndexError> {
        let resolver = Arc::new(Resolver::new(dataset, &self.settings)?);
        let previous = self.current.write().replace(Arc::clone(&resolver));
        info!(
            entries = resolver.len(),
            reloaded = previous.is_some(),
            "search index ready"
        );
        Ok(resolver)
    }

    /// Whether a dataset has been loaded.
    pub fn is_ready(&self) -> bool {
        self.current.read().is_some()
    }

    /// The current resolver.
    pub fn snapshot(&self) -> Result<Arc<Resolver>, IndexError> {
        self.current.read().clone().ok_or(IndexError::NotReady)
    }

    /// Runs `f` against the current resolver.
    pub fn with_resolver<T>(&self, f: impl FnOnce(&Resolver) -> T) -> Result<T, IndexError> {
        let resolver = self.snapshot()?;
        Ok(f(&resolver))
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new(SearchSettings::default())
    }
}
