#![deny(missing_docs)]

//! # Reference Utilities
//!
//! Helpers for turning `$ref` strings into component names.
//!
//! References are never fetched: a reference is resolved by the local name of
//! its target (the segment after the last `/`), whatever document part
//! precedes it.

use percent_encoding::percent_decode_str;

/// Extracts the local component name a `$ref` points at.
///
/// e.g. `#/components/schemas/User` -> `User`
pub(crate) fn component_name(reference: &str) -> String {
    let segment = reference
        .rsplit_once('/')
        .map_or(reference, |(_, last)| last);
    decode_pointer_segment(segment)
}

/// Decodes a JSON Pointer segment (handles `~1` and `~0`).
pub(crate) fn decode_pointer_segment(segment: &str) -> String {
    let decoded = segment.replace("~1", "/").replace("~0", "~");
    percent_decode_str(&decoded)
        .decode_utf8_lossy()
        .into_owned()
}
