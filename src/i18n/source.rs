//! Where translation files come from.

use crate::i18n::{Language, MapError, TranslationMap};
use crate::retry::{with_retry_if, RetryConfig};
use futures::future::BoxFuture;
use reqwest::StatusCode;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// A translation resource could not be loaded.
///
/// The switch controller treats every variant the same way ("load failed");
/// the distinction only matters for logging and retries.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("translation resource for '{language}' not found")]
    NotFound { language: Language },

    #[error("translation request for '{language}' failed with status {status}")]
    Status { language: Language, status: u16 },

    #[error("network error loading '{language}': {source}")]
    Network {
        language: Language,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read translation file for '{language}': {source}")]
    Io {
        language: Language,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed translation resource for '{language}': {source}")]
    Malformed {
        language: Language,
        #[source]
        source: MapError,
    },
}

impl LoadError {
    /// Network errors, rate limiting and 5xx responses may succeed on retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            LoadError::Network { .. } => true,
            LoadError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Fetches the whole translation map for one language.
pub trait TranslationSource: Send + Sync {
    fn fetch(&self, language: Language) -> BoxFuture<'_, Result<TranslationMap, LoadError>>;
}

/// Reads `<root>/<code>.json` from disk.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, language: Language) -> PathBuf {
        self.root.join(format!("{}.json", language.code()))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TranslationSource for DirectorySource {
    fn fetch(&self, language: Language) -> BoxFuture<'_, Result<TranslationMap, LoadError>> {
        Box::pin(async move {
            let path = self.path_for(language);
            debug!("Reading translations from {}", path.display());

            let bytes = tokio::fs::read(&path).await.map_err(|source| {
                if source.kind() == std::io::ErrorKind::NotFound {
                    LoadError::NotFound { language }
                } else {
                    LoadError::Io { language, source }
                }
            })?;

            TranslationMap::from_slice(&bytes)
                .map_err(|source| LoadError::Malformed { language, source })
        })
    }
}

/// Fetches `<base_url>/<code>.json` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
    retry: RetryConfig,
}

impl HttpSource {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry: RetryConfig::translation_fetch(),
        }
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn url_for(&self, language: Language) -> String {
        format!("{}/{}.json", self.base_url, language.code())
    }

    async fn fetch_once(&self, language: Language, url: &str) -> Result<TranslationMap, LoadError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| LoadError::Network { language, source })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(LoadError::NotFound { language });
        }
        if !status.is_success() {
            return Err(LoadError::Status {
                language,
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| LoadError::Network { language, source })?;

        TranslationMap::from_slice(&bytes).map_err(|source| LoadError::Malformed { language, source })
    }
}

impl TranslationSource for HttpSource {
    fn fetch(&self, language: Language) -> BoxFuture<'_, Result<TranslationMap, LoadError>> {
        Box::pin(async move {
            let url = self.url_for(language);
            with_retry_if(
                &self.retry,
                &format!("Load {} translations", language),
                || self.fetch_once(language, &url),
                LoadError::is_retryable,
            )
            .await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_directory_source_reads_language_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("sr.json"),
            r#"{ "hero": { "title_main": "Vaš izvor kakaa" } }"#,
        )
        .unwrap();

        let source = DirectorySource::new(dir.path());
        let map = source.fetch(Language::SERBIAN).await.expect("should load");

        assert_eq!(map.lookup("hero.title_main").unwrap(), "Vaš izvor kakaa");
    }

    #[tokio::test]
    async fn test_directory_source_missing_file() {
        let dir = TempDir::new().unwrap();
        let source = DirectorySource::new(dir.path());

        let err = source.fetch(Language::SERBIAN).await.unwrap_err();
        assert!(matches!(err, LoadError::NotFound { language } if language == Language::SERBIAN));
    }

    #[tokio::test]
    async fn test_directory_source_malformed_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("en.json"), "\"just a string\"").unwrap();

        let err = DirectorySource::new(dir.path())
            .fetch(Language::ENGLISH)
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Malformed { .. }));
        assert!(err.to_string().contains("malformed"));
    }

    #[test]
    fn test_http_source_url() {
        let source = HttpSource::new("https://kakaobalkan.rs/languages/");
        assert_eq!(
            source.url_for(Language::SERBIAN),
            "https://kakaobalkan.rs/languages/sr.json"
        );
    }

    #[test]
    fn test_retryable_errors() {
        let language = Language::ENGLISH;
        assert!(LoadError::Status { language, status: 503 }.is_retryable());
        assert!(LoadError::Status { language, status: 429 }.is_retryable());
        assert!(!LoadError::Status { language, status: 403 }.is_retryable());
        assert!(!LoadError::NotFound { language }.is_retryable());
    }
}
