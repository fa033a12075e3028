#![deny(missing_docs)]

//! # Diff Rules
//!
//! The four independent passes run by [`super::compare_endpoints`]. Each rule
//! walks the old index in key order and looks endpoints up in the new one.

use crate::diff::cases::{DifferenceCase, DifferenceKind};
use crate::oas::models::{Endpoint, EndpointIndex, ParameterDecl};

/// Old endpoints paired with their counterpart in the new index.
fn shared<'a>(
    old: &'a EndpointIndex,
    new: &'a EndpointIndex,
) -> impl Iterator<Item = (&'a Endpoint, &'a Endpoint)> + 'a {
    old.iter().filter_map(move |(key, old_endpoint)| {
        new.get(key)
            .map(|new_endpoint| (old_endpoint, new_endpoint))
    })
}

/// One `REMOVED_PATH` per key of `old` missing from `new`.
///
/// Keys only present in `new` are additive and never reported.
pub fn removed_paths(old: &EndpointIndex, new: &EndpointIndex) -> Vec<DifferenceCase> {
    old.keys()
        .filter(|key| !new.contains_key(*key))
        .map(|key| DifferenceCase::endpoint(DifferenceKind::RemovedPath, key))
        .collect()
}

/// One `REQUEST_FIELD_DIFFER` per shared key whose request field maps are
/// not exactly equal.
///
/// Any drift counts, added optional fields included.
pub fn request_field_differences(old: &EndpointIndex, new: &EndpointIndex) -> Vec<DifferenceCase> {
    shared(old, new)
        .filter(|(old_endpoint, new_endpoint)| {
            old_endpoint.request_fields != new_endpoint.request_fields
        })
        .map(|(old_endpoint, _)| {
            DifferenceCase::endpoint(DifferenceKind::RequestFieldDiffer, &old_endpoint.key)
        })
        .collect()
}

/// One `RESPONSE_FIELD_REMOVED` per old response field missing from the new
/// response, for every shared key.
///
/// An endpoint losing several fields is reported once per lost field.
pub fn removed_response_fields(old: &EndpointIndex, new: &EndpointIndex) -> Vec<DifferenceCase> {
    shared(old, new)
        .flat_map(|(old_endpoint, new_endpoint)| {
            old_endpoint
                .response_fields
                .keys()
                .filter(move |path| !new_endpoint.response_fields.contains_key(*path))
                .map(move |_| {
                    DifferenceCase::endpoint(DifferenceKind::ResponseFieldRemoved, &old_endpoint.key)
                })
        })
        .collect()
}

/// Two declarations are the same parameter only if name, location, required
/// flag and reference are all equal.
pub fn parameters_equal(old: &ParameterDecl, new: &ParameterDecl) -> bool {
    old.name == new.name
        && old.location == new.location
        && old.required == new.required
        && old.reference == new.reference
}

/// Whether two declarations occupy the same slot: same name and location.
fn same_slot(old: &ParameterDecl, new: &ParameterDecl) -> bool {
    old.name.is_some()
        && old.location.is_some()
        && old.name == new.name
        && old.location == new.location
}

/// Parameter findings for every shared key, in this order per key:
/// - `REQUIRED_PARAM_CHANGED` when a parameter without an equal counterpart
///   shares its name and location with a new one, and either is required;
/// - `REQUIRED_PARAM_NOT_EXIST` when a removed parameter was required;
/// - `REQUIRED_PARAM_ADDED` when an added parameter is required.
///
/// Each kind is reported at most once per key.
pub fn parameter_changes(old: &EndpointIndex, new: &EndpointIndex) -> Vec<DifferenceCase> {
    let mut cases = Vec::new();

    for (old_endpoint, new_endpoint) in shared(old, new) {
        let old_params = &old_endpoint.parameters;
        let new_params = &new_endpoint.parameters;

        let removed: Vec<&ParameterDecl> = old_params
            .iter()
            .filter(|param| !new_params.iter().any(|other| parameters_equal(param, other)))
            .collect();
        let added: Vec<&ParameterDecl> = new_params
            .iter()
            .filter(|param| !old_params.iter().any(|other| parameters_equal(other, param)))
            .collect();

        let changed = removed.iter().any(|param| {
            added
                .iter()
                .any(|other| same_slot(param, other) && (param.required || other.required))
        });

        let key = &old_endpoint.key;
        if changed {
            cases.push(DifferenceCase::endpoint(DifferenceKind::RequiredParamChanged, key));
        }
        if removed.iter().any(|param| param.required) {
            cases.push(DifferenceCase::endpoint(DifferenceKind::RequiredParamNotExist, key));
        }
        if added.iter().any(|param| param.required) {
            cases.push(DifferenceCase::endpoint(DifferenceKind::RequiredParamAdded, key));
        }
    }

    cases
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::models::{FieldMap, HttpMethod, ParamLocation};

    fn endpoint(path: &str) -> Endpoint {
        Endpoint {
            key: Endpoint::key_for(path, HttpMethod::Get),
            path: path.to_string(),
            method: HttpMethod::Get,
            request_fields: FieldMap::new(),
            response_fields: FieldMap::new(),
            parameters: Vec::new(),
        }
    }

    fn fields(entries: &[(&str, &str)]) -> FieldMap {
        entries
            .iter()
            .map(|(path, ty)| (path.to_string(), ty.to_string()))
            .collect()
    }

    fn index(endpoints: impl IntoIterator<Item = Endpoint>) -> EndpointIndex {
        endpoints.into_iter().map(|e| (e.key.clone(), e)).collect()
    }

    fn kinds(cases: &[DifferenceCase]) -> Vec<DifferenceKind> {
        cases.iter().map(|c| c.kind).collect()
    }

    #[test]
    fn test_removed_path_exact() {
        let old = index([endpoint("/a"), endpoint("/b"), endpoint("/c")]);
        let new = index([endpoint("/a"), endpoint("/c"), endpoint("/d")]);

        let cases = removed_paths(&old, &new);
        assert_eq!(
            cases,
            vec![DifferenceCase::endpoint(DifferenceKind::RemovedPath, "/b GET")]
        );
    }

    #[test]
    fn test_added_path_is_silent() {
        let old = index([endpoint("/a")]);
        let new = index([endpoint("/a"), endpoint("/b")]);
        assert!(removed_paths(&old, &new).is_empty());
        assert!(parameter_changes(&old, &new).is_empty());
    }

    #[test]
    fn test_request_fields_strict_both_directions() {
        let mut old_endpoint = endpoint("/a");
        old_endpoint.request_fields = fields(&[(".id", "integer")]);

        let mut added = old_endpoint.clone();
        added.request_fields.insert(".note".into(), "string".into());
        let cases = request_field_differences(&index([old_endpoint.clone()]), &index([added]));
        assert_eq!(kinds(&cases), vec![DifferenceKind::RequestFieldDiffer]);

        let mut retyped = old_endpoint.clone();
        retyped.request_fields = fields(&[(".id", "string")]);
        let cases = request_field_differences(&index([old_endpoint.clone()]), &index([retyped]));
        assert_eq!(cases.len(), 1);

        let same = request_field_differences(
            &index([old_endpoint.clone()]),
            &index([old_endpoint]),
        );
        assert!(same.is_empty());
    }

    #[test]
    fn test_response_field_removal_asymmetric() {
        let mut old_endpoint = endpoint("/books");
        old_endpoint.response_fields = fields(&[(".id", "integer"), (".title", "string")]);
        let mut new_endpoint = endpoint("/books");
        new_endpoint.response_fields = fields(&[(".id", "integer")]);

        let removed = removed_response_fields(
            &index([old_endpoint.clone()]),
            &index([new_endpoint.clone()]),
        );
        assert_eq!(
            removed,
            vec![DifferenceCase::endpoint(
                DifferenceKind::ResponseFieldRemoved,
                "/books GET"
            )]
        );

        let mut widened = old_endpoint.clone();
        widened.response_fields.insert(".subtitle".into(), "string".into());
        assert!(removed_response_fields(&index([old_endpoint]), &index([widened])).is_empty());
    }

    #[test]
    fn test_response_field_removal_reported_per_field() {
        let mut old_endpoint = endpoint("/books");
        old_endpoint.response_fields = fields(&[
            (".author", "string"),
            (".id", "integer"),
            (".title", "string"),
        ]);
        let mut new_endpoint = endpoint("/books");
        new_endpoint.response_fields = fields(&[(".id", "integer")]);

        let cases = removed_response_fields(&index([old_endpoint]), &index([new_endpoint]));
        assert_eq!(cases.len(), 2);
        assert!(cases.iter().all(|c| c.endpoint.as_deref() == Some("/books GET")));
    }

    #[test]
    fn test_required_param_removed_and_added() {
        let mut with_q = endpoint("/search");
        with_q.parameters = vec![ParameterDecl::required("q", ParamLocation::Query)];
        let without = endpoint("/search");

        let cases = parameter_changes(&index([with_q.clone()]), &index([without.clone()]));
        assert_eq!(kinds(&cases), vec![DifferenceKind::RequiredParamNotExist]);

        let cases = parameter_changes(&index([without]), &index([with_q]));
        assert_eq!(kinds(&cases), vec![DifferenceKind::RequiredParamAdded]);
    }

    #[test]
    fn test_optional_param_changes_are_silent() {
        let mut with_q = endpoint("/search");
        with_q.parameters = vec![ParameterDecl::optional("q", ParamLocation::Query)];
        let without = endpoint("/search");

        assert!(parameter_changes(&index([with_q.clone()]), &index([without.clone()])).is_empty());
        assert!(parameter_changes(&index([without]), &index([with_q])).is_empty());
    }

    #[test]
    fn test_required_flag_flip_is_changed() {
        let mut optional = endpoint("/search");
        optional.parameters = vec![ParameterDecl::optional("q", ParamLocation::Query)];
        let mut required = endpoint("/search");
        required.parameters = vec![ParameterDecl::required("q", ParamLocation::Query)];

        let cases = parameter_changes(&index([optional.clone()]), &index([required.clone()]));
        assert_eq!(
            kinds(&cases),
            vec![
                DifferenceKind::RequiredParamChanged,
                DifferenceKind::RequiredParamAdded
            ]
        );

        let cases = parameter_changes(&index([required]), &index([optional]));
        assert_eq!(
            kinds(&cases),
            vec![
                DifferenceKind::RequiredParamChanged,
                DifferenceKind::RequiredParamNotExist
            ]
        );
    }

    #[test]
    fn test_location_move_is_not_changed() {
        let mut in_query = endpoint("/search");
        in_query.parameters = vec![ParameterDecl::required("q", ParamLocation::Query)];
        let mut in_header = endpoint("/search");
        in_header.parameters = vec![ParameterDecl::required("q", ParamLocation::Header)];

        let cases = parameter_changes(&index([in_query]), &index([in_header]));
        assert_eq!(
            kinds(&cases),
            vec![
                DifferenceKind::RequiredParamNotExist,
                DifferenceKind::RequiredParamAdded
            ]
        );
    }

    #[test]
    fn test_parameter_order_ignored() {
        let params = vec![
            ParameterDecl::required("a", ParamLocation::Query),
            ParameterDecl::required("b", ParamLocation::Header),
        ];
        let mut old_endpoint = endpoint("/x");
        old_endpoint.parameters = params.clone();
        let mut new_endpoint = endpoint("/x");
        new_endpoint.parameters = params.into_iter().rev().collect();

        assert!(parameter_changes(&index([old_endpoint]), &index([new_endpoint])).is_empty());
    }

    #[test]
    fn test_parameters_equal_compares_reference() {
        let inline = ParameterDecl::optional("limit", ParamLocation::Query);
        let referenced = ParameterDecl {
            reference: Some("#/components/parameters/limit".into()),
            ..inline.clone()
        };
        assert!(parameters_equal(&inline, &inline.clone()));
        assert!(!parameters_equal(&inline, &referenced));
    }
}
