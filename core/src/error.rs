//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.
//!
//! Only failures that abort a comparison run are represented here. A schema
//! reference that cannot be resolved is not an error: the affected field map
//! is left empty and the run continues.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// The document source could not be retrieved (missing file, network
    /// failure, non-2xx status).
    #[from(ignore)]
    #[display("Fetch Error: failed to fetch '{location}': {reason}")]
    Fetch {
        /// The locator that was being fetched.
        location: String,
        /// Why the fetch failed.
        reason: String,
    },

    /// The retrieved text is not a well-formed API description.
    #[from(ignore)]
    #[display("Parse Error: '{location}' is not a valid OpenAPI document: {reason}")]
    Parse {
        /// The locator the text was fetched from.
        location: String,
        /// Why parsing failed.
        reason: String,
    },

    /// The locator string names no usable document source.
    #[from(ignore)]
    #[display("Locator Error: '{input}' is not a usable document locator: {reason}")]
    Locator {
        /// The locator as given.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

impl AppError {
    /// Builds a [`AppError::Fetch`].
    pub fn fetch(location: impl Into<String>, reason: impl ToString) -> Self {
        AppError::Fetch {
            location: location.into(),
            reason: reason.to_string(),
        }
    }

    /// Builds a [`AppError::Parse`].
    pub fn parse(location: impl Into<String>, reason: impl ToString) -> Self {
        AppError::Parse {
            location: location.into(),
            reason: reason.to_string(),
        }
    }

    /// Builds a [`AppError::Locator`].
    pub fn locator(input: impl Into<String>, reason: impl ToString) -> Self {
        AppError::Locator {
            input: input.into(),
            reason: reason.to_string(),
        }
    }
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_conversion() {
        let io_err = Error::new(ErrorKind::NotFound, "test");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
    }

    #[test]
    fn test_string_conversion() {
        let msg = String::from("something wrong");
        let app_err: AppError = msg.into();
        match app_err {
            AppError::General(s) => assert_eq!(s, "something wrong"),
            _ => panic!("String should convert to AppError::General"),
        }
    }

    #[test]
    fn test_fetch_display() {
        let err = AppError::fetch("http://localhost/v3/api-docs", "HTTP status 503");
        assert_eq!(
            err.to_string(),
            "Fetch Error: failed to fetch 'http://localhost/v3/api-docs': HTTP status 503"
        );
    }

    #[test]
    fn test_parse_display() {
        let err = AppError::parse("old.yaml", "missing 'openapi' version field");
        assert_eq!(
            err.to_string(),
            "Parse Error: 'old.yaml' is not a valid OpenAPI document: missing 'openapi' version field"
        );
    }

    #[test]
    fn test_locator_display() {
        let err = AppError::locator("", "empty source locator");
        assert_eq!(
            err.to_string(),
            "Locator Error: '' is not a usable document locator: empty source locator"
        );
    }
}
