#![deny(missing_docs)]

//! # OpenAPI Module
//!
//! - **shims**: Deserialization layer mapping the YAML/JSON document.
//! - **document**: Parsing entry point producing an [`ApiDocument`].
//! - **schemas**: The classified schema model and component catalog.
//! - **flatten**: Schema -> dotted field map.
//! - **routes**: Route table -> endpoint index.
//! - **models**: Intermediate Representation definitions.

pub mod document;
pub mod flatten;
pub mod models;
pub(crate) mod ref_utils;
pub mod routes;
pub mod schemas;
pub mod shims;

pub use document::{parse_openapi_document, ApiDocument};
pub use flatten::flatten_schema;
pub use models::{Endpoint, EndpointIndex, FieldMap, HttpMethod, ParamLocation, ParameterDecl};
pub use routes::extract_endpoints;
pub use schemas::{SchemaCatalog, SchemaNode};
