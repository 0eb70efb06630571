//! Acquisition of raw catalog text from a file or an HTTP(S) URL.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

use crate::config::CatalogConfig;
use crate::{Result, TurfbookError};

/// Where the venue catalog is read from
#[derive(Debug, Clone)]
pub enum CatalogSource {
    File(PathBuf),
    Url { url: String, client: Client },
}

impl CatalogSource {
    /// Pick a file or URL source from a location string
    pub fn parse(location: &str, timeout: Duration) -> Result<Self> {
        let location = location.trim();
        if location.is_empty() {
            return Err(TurfbookError::config("Catalog source cannot be empty"));
        }

        if location.starts_with("http://") || location.starts_with("https://") {
            let client = Client::builder()
                .timeout(timeout)
                .user_agent(concat!("turfbook/", env!("CARGO_PKG_VERSION")))
                .build()
                .map_err(|e| {
                    TurfbookError::config(format!("Failed to create HTTP client: {e}"))
                })?;
            Ok(Self::Url {
                url: location.to_string(),
                client,
            })
        } else {
            Ok(Self::File(PathBuf::from(location)))
        }
    }

    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        Self::parse(
            &config.source,
            Duration::from_secs(u64::from(config.fetch_timeout_seconds)),
        )
    }

    /// Human readable description for logs
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            CatalogSource::File(path) => path.display().to_string(),
            CatalogSource::Url { url, .. } => url.clone(),
        }
    }

    /// Read the whole catalog as text
    pub async fn load_text(&self) -> Result<String> {
        debug!("Loading venue catalog from {}", self.describe());

        match self {
            CatalogSource::File(path) => tokio::fs::read_to_string(path).await.map_err(|e| {
                warn!("Failed to read catalog file {}: {}", path.display(), e);
                TurfbookError::catalog(format!("Failed to read {}: {e}", path.display()))
            }),
            CatalogSource::Url { url, client } => {
                let response = client
                    .get(url)
                    .send()
                    .await
                    .and_then(reqwest::Response::error_for_status)
                    .map_err(|e| {
                        warn!("Failed to fetch catalog from {}: {}", url, e);
                        TurfbookError::catalog(format!("Request to {url} failed: {e}"))
                    })?;

                response
                    .text()
                    .await
                    .map_err(|e| TurfbookError::catalog(format!("Failed to read body: {e}")))
            }
        }
    }
}
