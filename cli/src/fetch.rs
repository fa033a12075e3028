#![deny(missing_docs)]

//! # HTTP Fetching
//!
//! A [`DocumentFetcher`] that retrieves remote documents with `ureq` and
//! delegates local paths to [`FileFetcher`].

use specguard_core::{AppError, AppResult, DocumentFetcher, FileFetcher, SourceLocator};
use std::time::Duration;
use tracing::{debug, error, warn};

/// Fetches documents over HTTP(S) or from disk.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    agent: ureq::Agent,
    files: FileFetcher,
}

impl HttpFetcher {
    /// Builds a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();
        HttpFetcher {
            agent,
            files: FileFetcher,
        }
    }

    fn fetch_remote(&self, locator: &SourceLocator, url: &str) -> AppResult<String> {
        debug!(%url, "requesting document");
        let mut response = self.agent.get(url).call().map_err(|e| match e {
            ureq::Error::StatusCode(status) => {
                warn!(%url, status, "document request rejected");
                AppError::fetch(locator.to_string(), format!("HTTP status {}", status))
            }
            other => {
                error!(%url, error = %other, "document request failed");
                AppError::fetch(locator.to_string(), other)
            }
        })?;

        response.body_mut().read_to_string().map_err(|e| {
            error!(%url, error = %e, "failed to read document body");
            AppError::fetch(locator.to_string(), e)
        })
    }
}

impl DocumentFetcher for HttpFetcher {
    fn fetch_text(&self, locator: &SourceLocator) -> AppResult<String> {
        match locator {
            SourceLocator::Remote(url) => self.fetch_remote(locator, url.as_str()),
            SourceLocator::File(_) => self.files.fetch_text(locator),
        }
    }
}
