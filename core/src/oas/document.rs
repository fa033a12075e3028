#![deny(missing_docs)]

//! # OpenAPI Document Parsing
//!
//! Parses raw YAML or JSON text into an [`ApiDocument`]: the route table plus
//! the component schema table, which is all a comparison needs.

use crate::error::{AppError, AppResult};
use crate::oas::models::EndpointIndex;
use crate::oas::routes::extract_endpoints;
use crate::oas::schemas::SchemaCatalog;
use crate::oas::shims::{ShimOpenApi, ShimPathItem};
use indexmap::IndexMap;

/// A parsed API document.
#[derive(Debug, Clone)]
pub struct ApiDocument {
    /// The declared `openapi` version.
    pub version: String,
    /// Path items keyed by path template, in document order.
    pub paths: IndexMap<String, ShimPathItem>,
    /// The `components.schemas` table.
    pub components: SchemaCatalog,
}

impl ApiDocument {
    /// Builds the endpoint index of this document.
    pub fn endpoints(&self) -> EndpointIndex {
        extract_endpoints(&self.paths, &self.components)
    }
}

/// Parses an OpenAPI 3.x document.
///
/// `location` only names the source in error messages.
///
/// Swagger 2.0 documents are rejected: their bodies and parameters follow a
/// different model.
pub fn parse_openapi_document(content: &str, location: &str) -> AppResult<ApiDocument> {
    let shim: ShimOpenApi =
        serde_yaml::from_str(content).map_err(|e| AppError::parse(location, e))?;

    let version = match (shim.openapi, shim.swagger) {
        (Some(version), _) if version.starts_with("3.") => version,
        (Some(version), _) => {
            return Err(AppError::parse(
                location,
                format!("unsupported OpenAPI version: {}, only 3.x is supported", version),
            ))
        }
        (None, Some(version)) => {
            return Err(AppError::parse(
                location,
                format!("unsupported Swagger version: {}, only OpenAPI 3.x is supported", version),
            ))
        }
        (None, None) => {
            return Err(AppError::parse(
                location,
                "missing 'openapi' version field",
            ))
        }
    };

    Ok(ApiDocument {
        version,
        paths: shim.paths,
        components: SchemaCatalog::new(shim.components.unwrap_or_default().schemas),
    })
}
