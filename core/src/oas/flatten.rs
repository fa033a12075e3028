#![deny(missing_docs)]

//! # Schema Flattening
//!
//! Turns a nested schema into a flat map of dotted property path to type name.
//!
//! Objects are descended into, everything else is a leaf. Arrays and
//! polymorphic schemas are leaves too: their items and variants are not
//! inspected. Root leaves are recorded under `.`, so every path starts with a
//! dot.

use crate::oas::models::FieldMap;
use crate::oas::ref_utils::component_name;
use crate::oas::schemas::{SchemaCatalog, SchemaNode};
use tracing::debug;

/// Type name recorded when a reference loops back onto a schema that is
/// already being flattened on the current branch.
const CYCLE_TYPE: &str = "object";

/// Flattens `schema` into a [`FieldMap`], starting at `prefix`.
///
/// An absent schema yields an empty map. References, at the root or nested
/// in properties, are resolved against `catalog`; an unresolvable one
/// contributes no fields.
pub fn flatten_schema(
    schema: Option<&SchemaNode>,
    prefix: &str,
    catalog: &SchemaCatalog,
) -> FieldMap {
    let mut fields = FieldMap::new();
    let mut visiting = Vec::new();
    collect_fields(schema, prefix, catalog, &mut visiting, &mut fields);
    fields
}

fn collect_fields(
    schema: Option<&SchemaNode>,
    path: &str,
    catalog: &SchemaCatalog,
    visiting: &mut Vec<String>,
    fields: &mut FieldMap,
) {
    let Some(schema) = schema else {
        return;
    };

    match schema {
        SchemaNode::Object(properties) => {
            for (name, property) in properties {
                let property_path = format!("{}.{}", path, name);
                collect_fields(Some(property), &property_path, catalog, visiting, fields);
            }
        }
        SchemaNode::Primitive(type_name) => record_leaf(fields, path, type_name),
        SchemaNode::Reference(reference) => {
            let name = component_name(reference);
            if visiting.contains(&name) {
                record_leaf(fields, path, CYCLE_TYPE);
                return;
            }

            match catalog.get(&name) {
                Some(target) => {
                    visiting.push(name);
                    collect_fields(Some(target), path, catalog, visiting, fields);
                    visiting.pop();
                }
                None => debug!(%reference, "unresolved schema reference, no fields recorded"),
            }
        }
        SchemaNode::Unresolved => {}
    }
}

fn record_leaf(fields: &mut FieldMap, path: &str, type_name: &str) {
    let path = if path.is_empty() { "." } else { path };
    fields.insert(path.to_string(), type_name.to_string());
}
