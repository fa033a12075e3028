#![deny(missing_docs)]

//! # Document Sources
//!
//! The fetch side of a comparison: where documents come from and how they
//! are turned into [`ApiDocument`]s.
//!
//! The core crate only reads local files ([`FileFetcher`]); fetching over
//! HTTP is provided by the CLI through the same [`DocumentFetcher`] trait.

use crate::diff::{compare_specifications, DifferenceCase};
use crate::error::{AppError, AppResult};
use crate::oas::document::{parse_openapi_document, ApiDocument};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, warn};
use url::Url;

/// Where a document is fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocator {
    /// An `http` or `https` URL.
    Remote(Url),
    /// A local path (plain path or `file://` URL).
    File(PathBuf),
}

impl FromStr for SourceLocator {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        if s.trim().is_empty() {
            return Err(AppError::locator(s, "empty source locator"));
        }

        match Url::parse(s) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(SourceLocator::Remote(url)),
            Ok(url) if url.scheme() == "file" => url
                .to_file_path()
                .map(SourceLocator::File)
                .map_err(|_| AppError::locator(s, "not a valid file URL")),
            _ => Ok(SourceLocator::File(PathBuf::from(s))),
        }
    }
}

impl fmt::Display for SourceLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLocator::Remote(url) => write!(f, "{}", url),
            SourceLocator::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Fetches and parses documents.
///
/// Implementations return the raw text; parsing is shared. A fetcher must
/// fail rather than return an empty document.
pub trait DocumentFetcher {
    /// Retrieves the raw document text.
    fn fetch_text(&self, locator: &SourceLocator) -> AppResult<String>;

    /// Retrieves and parses a document.
    fn fetch_document(&self, locator: &SourceLocator) -> AppResult<ApiDocument> {
        let text = self.fetch_text(locator)?;
        debug!(%locator, bytes = text.len(), "document fetched");
        parse_openapi_document(&text, &locator.to_string())
    }
}

/// Reads documents from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileFetcher;

impl DocumentFetcher for FileFetcher {
    fn fetch_text(&self, locator: &SourceLocator) -> AppResult<String> {
        match locator {
            SourceLocator::File(path) => std::fs::read_to_string(path).map_err(|e| {
                warn!(%locator, error = %e, "failed to read document");
                AppError::fetch(locator.to_string(), e)
            }),
            SourceLocator::Remote(_) => Err(AppError::fetch(
                locator.to_string(),
                "remote sources are not supported by this fetcher",
            )),
        }
    }
}

/// Fetches both documents concurrently and compares them.
///
/// Either fetch failing fails the whole comparison; no partial result is
/// returned.
pub fn compare_sources<F>(
    fetcher: &F,
    old: &SourceLocator,
    new: &SourceLocator,
) -> AppResult<Vec<DifferenceCase>>
where
    F: DocumentFetcher + Sync + ?Sized,
{
    let (old_document, new_document) = std::thread::scope(|scope| {
        let old_handle = scope.spawn(|| fetcher.fetch_document(old));
        let new_document = fetcher.fetch_document(new);
        let old_document = old_handle
            .join()
            .unwrap_or_else(|panic| std::panic::resume_unwind(panic));
        (old_document, new_document)
    });

    Ok(compare_specifications(&old_document?, &new_document?))
}
