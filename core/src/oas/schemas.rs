#![deny(missing_docs)]

//! # Schemas
//!
//! A reduced view of JSON Schema covering what the flattener needs: objects
//! with named properties, leaves with a type name, and references into the
//! component table.

use crate::oas::ref_utils::component_name;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// Type name recorded for schemas that declare no `type` at all.
pub const UNTYPED: &str = "any";

/// Keywords whose schemas are recorded as opaque polymorphic leaves.
const COMPOSITION_KEYWORDS: [&str; 3] = ["oneOf", "anyOf", "allOf"];

/// A schema definition, classified once at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "Value")]
pub enum SchemaNode {
    /// An object with declared properties.
    Object(IndexMap<String, SchemaNode>),
    /// Anything recorded as a leaf: primitives, arrays, polymorphic schemas
    /// and objects without properties.
    Primitive(String),
    /// A `$ref` to another schema.
    Reference(String),
    /// Not a schema object (e.g. a boolean schema).
    Unresolved,
}

impl SchemaNode {
    /// Shorthand for a leaf schema.
    pub fn primitive(type_name: impl Into<String>) -> Self {
        SchemaNode::Primitive(type_name.into())
    }

    /// Shorthand for an object schema.
    pub fn object<K: Into<String>>(properties: impl IntoIterator<Item = (K, SchemaNode)>) -> Self {
        SchemaNode::Object(
            properties
                .into_iter()
                .map(|(name, schema)| (name.into(), schema))
                .collect(),
        )
    }
}

impl From<Value> for SchemaNode {
    fn from(value: Value) -> Self {
        let Value::Object(mut map) = value else {
            return SchemaNode::Unresolved;
        };

        if let Some(Value::String(reference)) = map.remove("$ref") {
            return SchemaNode::Reference(reference);
        }

        let type_name = match map.get("type") {
            Some(Value::String(ty)) => Some(ty.clone()),
            Some(Value::Array(types)) => Some(
                types
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join("|"),
            ),
            _ => None,
        };

        let is_object = match &type_name {
            Some(ty) => ty.split('|').any(|t| t == "object"),
            None => true,
        };

        if is_object {
            if let Some(Value::Object(properties)) = map.remove("properties") {
                return SchemaNode::Object(
                    properties
                        .into_iter()
                        .map(|(name, schema)| (name, SchemaNode::from(schema)))
                        .collect(),
                );
            }
        }

        let type_name = type_name.unwrap_or_else(|| {
            COMPOSITION_KEYWORDS
                .iter()
                .find(|keyword| map.contains_key(**keyword))
                .map_or(UNTYPED, |keyword| *keyword)
                .to_string()
        });

        SchemaNode::Primitive(type_name)
    }
}

/// The `components.schemas` table of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaCatalog {
    schemas: IndexMap<String, SchemaNode>,
}

impl SchemaCatalog {
    /// Wraps a component schema table.
    pub fn new(schemas: IndexMap<String, SchemaNode>) -> Self {
        SchemaCatalog { schemas }
    }

    /// Looks a schema up by name.
    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.schemas.get(name)
    }

    /// Resolves a `$ref` by its local name (the segment after the last `/`).
    pub fn resolve(&self, reference: &str) -> Option<&SchemaNode> {
        self.schemas.get(&component_name(reference))
    }

    /// Number of component schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Returns true when the document declares no component schemas.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl FromIterator<(String, SchemaNode)> for SchemaCatalog {
    fn from_iter<T: IntoIterator<Item = (String, SchemaNode)>>(iter: T) -> Self {
        SchemaCatalog::new(iter.into_iter().collect())
    }
}
