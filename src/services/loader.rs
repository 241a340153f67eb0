use std::sync::Arc;
use std::time::Duration;

use crate::{
    error::{AppError, AppResult},
    models::Collection,
    services::{cache::CatalogCache, source::DataSource},
};

/// Populates the catalog cache from the configured source
///
/// Memoizes once: after the first successful load the source is never read again.
/// Failed loads leave the cache empty so a later call retries.
#[derive(Clone)]
pub struct Loader {
    source: Arc<dyn DataSource>,
    cache: Arc<CatalogCache>,
    read_timeout: Duration,
}

impl Loader {
    pub fn new(
        source: Arc<dyn DataSource>,
        cache: Arc<CatalogCache>,
        read_timeout: Duration,
    ) -> Self {
        Self {
            source,
            cache,
            read_timeout,
        }
    }

    pub fn cache(&self) -> &Arc<CatalogCache> {
        &self.cache
    }

    /// Returns the cached collection, reading and parsing the source on first use
    pub async fn load(&self) -> AppResult<Arc<Collection>> {
        if let Some(collection) = self.cache.get().await {
            tracing::debug!(items = collection.len(), "Catalog cache hit");
            return Ok(collection);
        }

        let _admission = self.cache.admit_load().await;

        // Another request may have finished loading while we waited
        if let Some(collection) = self.cache.get().await {
            return Ok(collection);
        }

        let source = self.source.describe();
        tracing::info!(source = %source, "Loading catalog");

        let bytes = tokio::time::timeout(self.read_timeout, self.source.read())
            .await
            .map_err(|_| {
                AppError::SourceUnavailable(format!(
                    "timed out after {}s reading {}",
                    self.read_timeout.as_secs_f64(),
                    source
                ))
            })?
            .inspect_err(|e| {
                tracing::warn!(source = %source, error = %e, "Source read failed");
            })?;

        let collection = Collection::from_slice(&bytes).map_err(|e| {
            tracing::error!(source = %source, error = %e, "Failed to parse catalog");
            AppError::from(e)
        })?;

        tracing::info!(
            source = %source,
            items = collection.len(),
            "Catalog loaded"
        );

        Ok(self.cache.store(collection).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::source::MockDataSource;
    use mockall::Sequence;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const DATA: &[u8] = br#"[
        {"id":"1","type":"movie","name":"Bunny Tales","streams":[{"title":"HD","url":"http://x/1"}]},
        {"id":"2","type":"show","name":"Bunny Show","streams":[]}
    ]"#;

    fn loader_for(source: impl DataSource + 'static) -> Loader {
        Loader::new(
            Arc::new(source),
            Arc::new(CatalogCache::new()),
            Duration::from_secs(5),
        )
    }

    fn mock_source() -> MockDataSource {
        let mut source = MockDataSource::new();
        source
            .expect_describe()
            .return_const("mock://catalog".to_string());
        source
    }

    #[tokio::test]
    async fn test_load_parses_and_caches() {
        let mut source = mock_source();
        source.expect_read().times(1).returning(|| Ok(DATA.to_vec()));
        let loader = loader_for(source);

        let collection = loader.load().await.unwrap();
        assert_eq!(collection.len(), 2);
        assert!(loader.cache().get().await.is_some());
    }

    #[tokio::test]
    async fn test_second_load_reuses_cached_collection() {
        let mut source = mock_source();
        source.expect_read().times(1).returning(|| Ok(DATA.to_vec()));
        let loader = loader_for(source);

        let first = loader.load().await.unwrap();
        let second = loader.load().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_unavailable_source_leaves_cache_empty() {
        let mut source = mock_source();
        source
            .expect_read()
            .times(1)
            .returning(|| Err(AppError::SourceUnavailable("Not Found".to_string())));
        let loader = loader_for(source);

        let result = loader.load().await;
        assert!(matches!(result, Err(AppError::SourceUnavailable(_))));
        assert!(loader.cache().get().await.is_none());
    }

    #[tokio::test]
    async fn test_malformed_then_corrected_source() {
        let mut source = mock_source();
        let mut seq = Sequence::new();
        source
            .expect_read()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(br#"{"id":"1","name":"not a list"}"#.to_vec()));
        source
            .expect_read()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(DATA.to_vec()));
        let loader = loader_for(source);

        let result = loader.load().await;
        assert!(matches!(result, Err(AppError::MalformedData(_))));
        assert!(loader.cache().get().await.is_none());

        let collection = loader.load().await.unwrap();
        assert_eq!(collection.len(), 2);
    }

    #[tokio::test]
    async fn test_reset_forces_reread() {
        let mut source = mock_source();
        source.expect_read().times(2).returning(|| Ok(DATA.to_vec()));
        let loader = loader_for(source);

        loader.load().await.unwrap();
        loader.cache().reset().await;
        loader.load().await.unwrap();
    }

    struct SlowCountingSource {
        reads: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl DataSource for SlowCountingSource {
        async fn read(&self) -> AppResult<Vec<u8>> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok(DATA.to_vec())
        }

        fn describe(&self) -> String {
            "slow://catalog".to_string()
        }
    }

    #[tokio::test]
    async fn test_concurrent_first_loads_read_source_once() {
        let reads = Arc::new(AtomicUsize::new(0));
        let loader = loader_for(SlowCountingSource {
            reads: reads.clone(),
        });

        let mut tasks = tokio::task::JoinSet::new();
        for _ in 0..8 {
            let loader = loader.clone();
            tasks.spawn(async move { loader.load().await.map(|c| c.len()) });
        }
        while let Some(result) = tasks.join_next().await {
            assert_eq!(result.unwrap().unwrap(), 2);
        }

        assert_eq!(reads.load(Ordering::SeqCst), 1);
    }

    struct HangingSource;

    #[async_trait::async_trait]
    impl DataSource for HangingSource {
        async fn read(&self) -> AppResult<Vec<u8>> {
            std::future::pending().await
        }

        fn describe(&self) -> String {
            "hang://catalog".to_string()
        }
    }

    #[tokio::test]
    async fn test_hung_source_times_out() {
        let loader = Loader::new(
            Arc::new(HangingSource),
            Arc::new(CatalogCache::new()),
            Duration::from_millis(20),
        );

        let result = loader.load().await;
        assert!(matches!(result, Err(AppError::SourceUnavailable(_))));
        assert!(loader.cache().get().await.is_none());
    }
}
