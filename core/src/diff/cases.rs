#![deny(missing_docs)]

//! # Difference Cases
//!
//! The typed vocabulary of breaking-change findings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of breaking change a finding reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DifferenceKind {
    /// An endpoint of the old document is missing from the new one.
    RemovedPath,
    /// The flattened request body differs in any way.
    RequestFieldDiffer,
    /// A field of the `200` response body was removed.
    ResponseFieldRemoved,
    /// A required parameter kept its name and location but changed shape.
    RequiredParamChanged,
    /// A required parameter no longer exists.
    RequiredParamNotExist,
    /// A new required parameter was added.
    RequiredParamAdded,
}

impl DifferenceKind {
    /// The wire name, e.g. `REMOVED_PATH`.
    pub fn as_str(self) -> &'static str {
        match self {
            DifferenceKind::RemovedPath => "REMOVED_PATH",
            DifferenceKind::RequestFieldDiffer => "REQUEST_FIELD_DIFFER",
            DifferenceKind::ResponseFieldRemoved => "RESPONSE_FIELD_REMOVED",
            DifferenceKind::RequiredParamChanged => "REQUIRED_PARAM_CHANGED",
            DifferenceKind::RequiredParamNotExist => "REQUIRED_PARAM_NOT_EXIST",
            DifferenceKind::RequiredParamAdded => "REQUIRED_PARAM_ADDED",
        }
    }
}

impl fmt::Display for DifferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a finding is about.
///
/// Only endpoint-level findings are produced today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum Entry {
    /// A single operation.
    Endpoint,
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Endpoint => f.write_str("ENDPOINT"),
        }
    }
}

/// One breaking-change finding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DifferenceCase {
    /// The kind of change.
    pub kind: DifferenceKind,
    /// What the change is about.
    pub entry: Entry,
    /// The endpoint key, absent for collection-level findings.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub endpoint: Option<String>,
}

impl DifferenceCase {
    /// A finding about one endpoint.
    pub fn endpoint(kind: DifferenceKind, key: impl Into<String>) -> Self {
        DifferenceCase {
            kind,
            entry: Entry::Endpoint,
            endpoint: Some(key.into()),
        }
    }
}

impl fmt::Display for DifferenceCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.kind, self.entry)?;
        if let Some(endpoint) = &self.endpoint {
            write!(f, " {}", endpoint)?;
        }
        Ok(())
    }
}
