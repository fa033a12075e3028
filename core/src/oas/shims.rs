#![deny(missing_docs)]

//! # Document Shims
//!
//! Structures acting as an Intermediate Deserialization Layer.
//! These structs map directly to the OpenAPI YAML/JSON objects the comparison
//! needs; everything else in the document is ignored.

use crate::oas::models::ParamLocation;
use crate::oas::schemas::SchemaNode;
use indexmap::IndexMap;
use serde::de::{DeserializeOwned, Error as DeError};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserializes a map while dropping specification extensions (`x-...`).
fn without_extensions<'de, D, T>(deserializer: D) -> Result<IndexMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<IndexMap<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
    let mut items = IndexMap::new();

    for (key, value) in raw {
        if key.starts_with("x-") {
            continue;
        }
        let item = serde_json::from_value::<T>(value)
            .map_err(|e| DeError::custom(format!("Failed to parse '{}': {}", key, e)))?;
        items.insert(key, item);
    }

    Ok(items)
}

/// Schema for the root document.
#[derive(Debug, Clone, Deserialize)]
pub struct ShimOpenApi {
    /// OpenAPI version (e.g. "3.1.0").
    pub openapi: Option<String>,

    /// Swagger version (e.g. "2.0"), only read to reject it.
    pub swagger: Option<String>,

    /// The route table, in document order.
    #[serde(default, deserialize_with = "without_extensions")]
    pub paths: IndexMap<String, ShimPathItem>,

    /// Reusable components.
    pub components: Option<ShimComponents>,
}

/// The Components Object. Only schemas take part in comparisons.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShimComponents {
    /// Named schemas, looked up by the last segment of a `$ref`.
    #[serde(default)]
    pub schemas: IndexMap<String, SchemaNode>,
}

/// A Path Item Object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShimPathItem {
    /// GET operation.
    pub get: Option<ShimOperation>,
    /// POST operation.
    pub post: Option<ShimOperation>,
    /// PUT operation.
    pub put: Option<ShimOperation>,
    /// PATCH operation.
    pub patch: Option<ShimOperation>,
    /// DELETE operation.
    pub delete: Option<ShimOperation>,
}

/// An Operation Object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShimOperation {
    /// Declared parameters, verbatim.
    pub parameters: Option<Vec<ShimParameter>>,

    /// Request body.
    #[serde(rename = "requestBody")]
    pub request_body: Option<ShimRequestBody>,

    /// Responses keyed by status code.
    #[serde(default, deserialize_with = "without_extensions")]
    pub responses: IndexMap<String, ShimResponse>,
}

/// A Parameter Object or a Reference to one.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShimParameter {
    /// Name of the parameter.
    pub name: Option<String>,
    /// Location of the parameter.
    #[serde(rename = "in")]
    pub location: Option<ParamLocation>,
    /// Whether the parameter is required.
    pub required: Option<bool>,
    /// `$ref` when the parameter is declared by reference.
    #[serde(rename = "$ref")]
    pub ref_path: Option<String>,
}

/// A Request Body Object or a Reference to one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShimRequestBody {
    /// `$ref` to `#/components/requestBodies/...`.
    #[serde(rename = "$ref")]
    pub ref_path: Option<String>,
    /// Media types keyed by content type.
    #[serde(default)]
    pub content: IndexMap<String, ShimMediaType>,
}

/// A Response Object or a Reference to one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShimResponse {
    /// `$ref` to `#/components/responses/...`.
    #[serde(rename = "$ref")]
    pub ref_path: Option<String>,
    /// Media types keyed by content type. Absent when the response has no body.
    pub content: Option<IndexMap<String, ShimMediaType>>,
}

/// A Media Type Object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShimMediaType {
    /// The body schema.
    pub schema: Option<SchemaNode>,
}
