use std::path::{Path, PathBuf};

use reqwest::Client as HttpClient;

use crate::error::{AppError, AppResult};

/// Origin of the catalog dataset
///
/// Implementations return the raw bytes of the dataset; parsing is left to the loader.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait DataSource: Send + Sync {
    /// Read the full contents of the origin
    async fn read(&self) -> AppResult<Vec<u8>>;

    /// Human-readable location for logging
    fn describe(&self) -> String;
}

/// A source locator resolved once at startup
#[derive(Debug, Clone)]
pub enum Source {
    Remote { url: String, http_client: HttpClient },
    Local(PathBuf),
}

impl Source {
    /// Resolves a locator: `http://` and `https://` locators are fetched over the network,
    /// anything else is a filesystem path, relative ones taken from `base_dir`.
    pub fn resolve(locator: &str, base_dir: &Path) -> Self {
        if locator.starts_with("http://") || locator.starts_with("https://") {
            Source::Remote {
                url: locator.to_string(),
                http_client: HttpClient::new(),
            }
        } else {
            Source::Local(base_dir.join(locator))
        }
    }

    async fn fetch(http_client: &HttpClient, url: &str) -> AppResult<Vec<u8>> {
        let response = http_client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::SourceUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::SourceUnavailable(
                status
                    .canonical_reason()
                    .unwrap_or(status.as_str())
                    .to_string(),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::SourceUnavailable(e.to_string()))?;

        Ok(body.to_vec())
    }
}

#[async_trait::async_trait]
impl DataSource for Source {
    async fn read(&self) -> AppResult<Vec<u8>> {
        match self {
            Source::Remote { url, http_client } => Self::fetch(http_client, url).await,
            Source::Local(path) => tokio::fs::read(path).await.map_err(|e| {
                AppError::SourceUnavailable(format!("{}: {}", path.display(), e))
            }),
        }
    }

    fn describe(&self) -> String {
        match self {
            Source::Remote { url, .. } => url.clone(),
            Source::Local(path) => path.display().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_resolve_http_locators_as_remote() {
        let base = Path::new("/srv");
        assert!(matches!(
            Source::resolve("https://example.com/data.json", base),
            Source::Remote { .. }
        ));
        assert!(matches!(
            Source::resolve("http://localhost:8000/data.json", base),
            Source::Remote { .. }
        ));
    }

    #[test]
    fn test_resolve_relative_path_against_base_dir() {
        let source = Source::resolve("./data.json", Path::new("/srv/addon"));
        match source {
            Source::Local(path) => assert_eq!(path, Path::new("/srv/addon/./data.json")),
            other => panic!("expected local source, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_absolute_path_kept() {
        let source = Source::resolve("/var/lib/data.json", Path::new("/srv/addon"));
        assert_eq!(source.describe(), "/var/lib/data.json");
    }

    #[tokio::test]
    async fn test_local_read_returns_contents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id":"1","name":"A"}}]"#).unwrap();

        let source = Source::Local(file.path().to_path_buf());
        let bytes = source.read().await.unwrap();
        assert_eq!(bytes, br#"[{"id":"1","name":"A"}]"#);
    }

    #[tokio::test]
    async fn test_local_read_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let source = Source::Local(dir.path().join("missing.json"));

        let result = source.read().await;
        assert!(matches!(result, Err(AppError::SourceUnavailable(_))));
    }
}
