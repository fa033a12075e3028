#![deny(missing_docs)]

//! # Diff Calculation
//!
//! Compares the endpoint indices of an old and a new document and reports
//! breaking changes as [`DifferenceCase`]s.
//!
//! Four rules run unconditionally, in this order, and their findings are
//! concatenated:
//! 1. removed paths,
//! 2. request field differences,
//! 3. removed response fields,
//! 4. required parameter changes.

pub mod cases;
pub mod rules;

use crate::oas::document::ApiDocument;
use crate::oas::models::EndpointIndex;
use tracing::{debug, info};

pub use cases::{DifferenceCase, DifferenceKind, Entry};
pub use rules::parameters_equal;

/// Runs every rule over two endpoint indices.
pub fn compare_endpoints(old: &EndpointIndex, new: &EndpointIndex) -> Vec<DifferenceCase> {
    let passes: [(&str, fn(&EndpointIndex, &EndpointIndex) -> Vec<DifferenceCase>); 4] = [
        ("removed_paths", rules::removed_paths),
        ("request_field_differences", rules::request_field_differences),
        ("removed_response_fields", rules::removed_response_fields),
        ("parameter_changes", rules::parameter_changes),
    ];

    let mut cases = Vec::new();
    for (rule, pass) in passes {
        let found = pass(old, new);
        debug!(rule, findings = found.len(), "rule finished");
        cases.extend(found);
    }
    cases
}

/// Compares two parsed documents.
///
/// An empty result means no breaking change was detected.
pub fn compare_specifications(old: &ApiDocument, new: &ApiDocument) -> Vec<DifferenceCase> {
    let old_endpoints = old.endpoints();
    let new_endpoints = new.endpoints();

    let cases = compare_endpoints(&old_endpoints, &new_endpoints);
    info!(
        old_endpoints = old_endpoints.len(),
        new_endpoints = new_endpoints.len(),
        findings = cases.len(),
        "comparison finished"
    );
    cases
}
