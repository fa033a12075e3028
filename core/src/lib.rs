#![deny(missing_docs)]

//! # Specguard Core
//!
//! Detects breaking changes between two versions of an OpenAPI 3 document.
//!
//! Documents are reduced to an index of endpoints (flattened request and
//! response fields plus parameters) and compared rule by rule.

/// Shared error types.
pub mod error;

/// OpenAPI (OAS) parsing and endpoint extraction.
pub mod oas;

/// Diff calculation.
pub mod diff;

/// Document locators and fetchers.
pub mod source;

pub use diff::{
    compare_endpoints, compare_specifications, DifferenceCase, DifferenceKind, Entry,
};
pub use error::{AppError, AppResult};
pub use oas::{
    extract_endpoints, flatten_schema, parse_openapi_document, ApiDocument, Endpoint,
    EndpointIndex, FieldMap, HttpMethod, ParamLocation, ParameterDecl, SchemaCatalog, SchemaNode,
};
pub use source::{compare_sources, DocumentFetcher, FileFetcher, SourceLocator};
