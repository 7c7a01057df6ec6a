//! Fetching raw source text.
//!
//! `http://` and `https://` URLs are fetched with `reqwest`; `file://` URLs
//! and bare paths are read from the local filesystem.

use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TabloadError};

/// Something that can turn a source URL into its text.
pub trait TextFetcher {
    /// Fetch the full text behind `url`.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Fetcher configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FetchConfig {
    /// Timeout for a whole HTTP request, in seconds.
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

/// Default fetcher for HTTP(S) URLs and local files.
#[derive(Debug, Clone)]
pub struct SourceFetcher {
    client: Client,
}

impl SourceFetcher {
    /// Create a fetcher with default settings.
    pub fn new() -> Result<Self> {
        Self::with_config(&FetchConfig::default())
    }

    /// Create a fetcher with custom configuration.
    pub fn with_config(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TabloadError::Config(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    async fn fetch_http(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TabloadError::Network {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TabloadError::Http {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| TabloadError::Network {
            url: url.to_string(),
            source: e,
        })
    }
}

impl TextFetcher for SourceFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!(url, "Fetching source");
        match local_path(url) {
            Some(path) => tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| TabloadError::Io { path, source: e }),
            None => self.fetch_http(url).await,
        }
    }
}

/// Filesystem path for `url`, or `None` if it must be fetched over HTTP.
fn local_path(url: &str) -> Option<PathBuf> {
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return None;
    }
    Some(PathBuf::from(url.strip_prefix("file://").unwrap_or(url)))
}
