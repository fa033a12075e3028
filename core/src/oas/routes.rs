#![deny(missing_docs)]

//! # Routes Module
//!
//! Builds the endpoint index of a document: one [`Endpoint`] per declared
//! method per path, keyed by `"<path> <METHOD>"`.
//!
//! Request and response bodies are resolved with different policies:
//! - request fields come from an `application/json` body, referenced or inline;
//! - response fields come only from the `200` response's `*/*` media type, and
//!   only when its schema is a reference.
//!
//! Any missing link in either chain yields an empty field map.

use crate::oas::flatten::flatten_schema;
use crate::oas::models::{Endpoint, EndpointIndex, FieldMap, HttpMethod, ParameterDecl};
use crate::oas::schemas::{SchemaCatalog, SchemaNode};
use crate::oas::shims::{ShimOperation, ShimPathItem};
use indexmap::IndexMap;
use tracing::debug;

const REQUEST_MEDIA_TYPE: &str = "application/json";
const RESPONSE_MEDIA_TYPE: &str = "*/*";
const SUCCESS_STATUS: &str = "200";

/// Extracts every endpoint of a route table.
pub fn extract_endpoints(
    paths: &IndexMap<String, ShimPathItem>,
    catalog: &SchemaCatalog,
) -> EndpointIndex {
    paths
        .iter()
        .flat_map(|(path, item)| {
            HttpMethod::ALL.into_iter().filter_map(move |method| {
                method
                    .operation(item)
                    .map(|operation| build_endpoint(path, method, operation, catalog))
            })
        })
        .map(|endpoint| (endpoint.key.clone(), endpoint))
        .collect()
}

fn build_endpoint(
    path: &str,
    method: HttpMethod,
    operation: &ShimOperation,
    catalog: &SchemaCatalog,
) -> Endpoint {
    let key = Endpoint::key_for(path, method);

    Endpoint {
        request_fields: extract_request_fields(&key, operation, catalog),
        response_fields: extract_response_fields(&key, operation, catalog),
        parameters: operation
            .parameters
            .iter()
            .flatten()
            .map(ParameterDecl::from)
            .collect(),
        key,
        path: path.to_string(),
        method,
    }
}

fn extract_request_fields(key: &str, operation: &ShimOperation, catalog: &SchemaCatalog) -> FieldMap {
    let Some(body) = &operation.request_body else {
        return FieldMap::new();
    };

    if let Some(reference) = &body.ref_path {
        debug!(endpoint = key, %reference, "request body given by reference, no fields recorded");
        return FieldMap::new();
    }

    match body.content.get(REQUEST_MEDIA_TYPE) {
        Some(media) => flatten_schema(media.schema.as_ref(), "", catalog),
        None => FieldMap::new(),
    }
}

fn extract_response_fields(
    key: &str,
    operation: &ShimOperation,
    catalog: &SchemaCatalog,
) -> FieldMap {
    let schema = operation
        .responses
        .get(SUCCESS_STATUS)
        .filter(|response| {
            if let Some(reference) = &response.ref_path {
                debug!(endpoint = key, %reference, "response given by reference, no fields recorded");
            }
            response.ref_path.is_none()
        })
        .and_then(|response| response.content.as_ref())
        .and_then(|content| content.get(RESPONSE_MEDIA_TYPE))
        .and_then(|media| media.schema.as_ref())
        .filter(|schema| matches!(schema, SchemaNode::Reference(_)));

    match schema {
        Some(schema) => flatten_schema(Some(schema), "", catalog),
        None => FieldMap::new(),
    }
}
