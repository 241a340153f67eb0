use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard, RwLock};

use crate::models::Collection;

/// Lifecycle of the catalog slot
#[derive(Debug, Clone, Default)]
pub enum CacheSlot {
    #[default]
    Empty,
    Populated(Arc<Collection>),
}

/// Process-wide holder of the most recently loaded collection
///
/// Written once by the loader, read by every query afterwards. Nothing refreshes it;
/// a new dataset is only observed after a restart (or an explicit [`CatalogCache::reset`]).
#[derive(Debug, Default)]
pub struct CatalogCache {
    slot: RwLock<CacheSlot>,
    /// Admits one first-load at a time
    load_gate: Mutex<()>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the cached collection, if any
    pub async fn get(&self) -> Option<Arc<Collection>> {
        match &*self.slot.read().await {
            CacheSlot::Empty => None,
            CacheSlot::Populated(collection) => Some(collection.clone()),
        }
    }

    pub async fn state(&self) -> CacheSlot {
        self.slot.read().await.clone()
    }

    pub(crate) async fn store(&self, collection: Collection) -> Arc<Collection> {
        let collection = Arc::new(collection);
        *self.slot.write().await = CacheSlot::Populated(collection.clone());
        collection
    }

    pub(crate) async fn admit_load(&self) -> MutexGuard<'_, ()> {
        self.load_gate.lock().await
    }

    /// Drops the cached collection so the next load reads the source again
    pub async fn reset(&self) {
        *self.slot.write().await = CacheSlot::Empty;
    }
}
