#![deny(missing_docs)]

//! # OpenAPI Models
//!
//! Intermediate Representation (IR) built from the parsed document shims.
//!
//! An [`Endpoint`] is an immutable snapshot of one operation, built once per
//! comparison run and compared by value.

use crate::oas::shims::{ShimOperation, ShimParameter, ShimPathItem};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Dotted schema path (e.g. `.address.city`) to declared primitive type name.
pub type FieldMap = BTreeMap<String, String>;

/// Endpoints of one document keyed by [`Endpoint::key`].
pub type EndpointIndex = BTreeMap<String, Endpoint>;

/// The HTTP methods an endpoint can be extracted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
}

impl HttpMethod {
    /// Every supported method, in extraction order.
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
    ];

    /// Uppercase method name as used in endpoint keys.
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// The operation declared for this method on a path item, if any.
    pub fn operation(self, item: &ShimPathItem) -> Option<&ShimOperation> {
        match self {
            HttpMethod::Get => item.get.as_ref(),
            HttpMethod::Post => item.post.as_ref(),
            HttpMethod::Put => item.put.as_ref(),
            HttpMethod::Patch => item.patch.as_ref(),
            HttpMethod::Delete => item.delete.as_ref(),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The source location of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    /// Path.
    Path,
    /// Query.
    Query,
    /// Query String (OAS 3.2).
    #[serde(rename = "querystring")]
    QueryString,
    /// Header.
    Header,
    /// Cookie.
    Cookie,
}

/// A parameter as declared on an operation.
///
/// Two declarations are the same parameter only if all four fields are equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterDecl {
    /// Parameter name. Absent when the parameter is a bare `$ref`.
    pub name: Option<String>,
    /// Parameter location. Absent when the parameter is a bare `$ref`.
    pub location: Option<ParamLocation>,
    /// Whether the parameter must be supplied.
    pub required: bool,
    /// The `$ref` string, if the parameter is declared by reference.
    pub reference: Option<String>,
}

impl ParameterDecl {
    /// A required parameter.
    pub fn required(name: impl Into<String>, location: ParamLocation) -> Self {
        ParameterDecl {
            name: Some(name.into()),
            location: Some(location),
            required: true,
            reference: None,
        }
    }

    /// An optional parameter.
    pub fn optional(name: impl Into<String>, location: ParamLocation) -> Self {
        ParameterDecl {
            required: false,
            ..ParameterDecl::required(name, location)
        }
    }
}

impl From<&ShimParameter> for ParameterDecl {
    fn from(shim: &ShimParameter) -> Self {
        ParameterDecl {
            name: shim.name.clone(),
            location: shim.location,
            required: shim.required.unwrap_or(false),
            reference: shim.ref_path.clone(),
        }
    }
}

/// One HTTP operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Canonical identity: `"<path> <METHOD>"`.
    pub key: String,
    /// The URL path template (e.g. "/users/{id}").
    pub path: String,
    /// The HTTP method.
    pub method: HttpMethod,
    /// Flattened JSON request body fields.
    pub request_fields: FieldMap,
    /// Flattened `200` response body fields.
    pub response_fields: FieldMap,
    /// Parameters copied verbatim from the operation.
    pub parameters: Vec<ParameterDecl>,
}

impl Endpoint {
    /// Builds the canonical key for a path and method.
    pub fn key_for(path: &str, method: HttpMethod) -> String {
        format!("{} {}", path, method)
    }
}
