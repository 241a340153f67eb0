use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::services::{Catalog, CatalogCache, DataSource, Loader, Source};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub loader: Loader,
    pub catalog: Catalog,
}

impl AppState {
    /// Wires a loader and catalog around one shared cache slot
    pub fn new(source: Arc<dyn DataSource>, read_timeout: Duration) -> Self {
        let cache = Arc::new(CatalogCache::new());
        Self {
            loader: Loader::new(source, cache.clone(), read_timeout),
            catalog: Catalog::new(cache),
        }
    }

    /// Resolves a source locator the way the server does at startup
    pub fn from_locator(locator: &str, base_dir: &Path, read_timeout: Duration) -> Self {
        Self::new(Arc::new(Source::resolve(locator, base_dir)), read_timeout)
    }

    pub fn from_config(config: &Config) -> Self {
        Self::from_locator(
            &config.data_source,
            &config.base_dir(),
            Duration::from_secs(config.source_timeout_secs),
        )
    }
}
