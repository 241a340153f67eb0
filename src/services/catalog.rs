use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{Collection, Item, Stream},
    services::cache::CatalogCache,
};

/// Read-only queries over the cached collection
#[derive(Clone)]
pub struct Catalog {
    cache: Arc<CatalogCache>,
}

impl Catalog {
    pub fn new(cache: Arc<CatalogCache>) -> Self {
        Self { cache }
    }

    async fn collection(&self) -> AppResult<Arc<Collection>> {
        self.cache.get().await.ok_or(AppError::DataNotLoaded)
    }

    /// Items whose name contains `term`, ignoring case. An empty or absent term
    /// returns the whole collection; unnamed items never match a non-empty term.
    pub async fn search(&self, term: Option<&str>) -> AppResult<Vec<Item>> {
        let collection = self.collection().await?;

        let term = match term.filter(|t| !t.is_empty()) {
            Some(term) => term.to_lowercase(),
            None => return Ok(collection.items.clone()),
        };

        Ok(collection
            .items
            .iter()
            .filter(|item| {
                item.name
                    .as_deref()
                    .is_some_and(|name| name.to_lowercase().contains(&term))
            })
            .cloned()
            .collect())
    }

    /// First item with exactly this id
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<Item>> {
        let collection = self.collection().await?;
        Ok(collection.items.iter().find(|item| item.id == id).cloned())
    }
}

/// Keeps items whose type tag equals `item_type` exactly; `None` keeps everything.
pub fn filter_by_type(items: Vec<Item>, item_type: Option<&str>) -> Vec<Item> {
    match item_type {
        None => items,
        Some(wanted) => items
            .into_iter()
            .filter(|item| item.item_type.as_deref() == Some(wanted))
            .collect(),
    }
}

/// Streams of an item in dataset order
pub fn streams_for(item: &Item) -> Vec<Stream> {
    item.streams()
        .iter()
        .map(|stream| Stream {
            title: stream.title.clone(),
            url: stream.url.clone(),
        })
        .collect()
}
