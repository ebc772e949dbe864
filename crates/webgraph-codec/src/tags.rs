//! Tag codec.
//!
//! A tag structure (namespace -> key -> values) is flattened into repeated
//! `TAG` entries of the form `namespace:key=value`. Decoding splits on the
//! first `:` and then on the first `=` of the remainder, so namespaces must
//! not contain `:` and keys must not contain `=`. Values may contain either.
//! Separators are not escaped.
//!
//! Only values are written, so a namespace with no keys or a key with no
//! values leaves no entry and is gone after a round trip.

use tracing::warn;
use webgraph_types::{add_tag, Tags};

use crate::document::Document;
use crate::field::FieldName;

const NAMESPACE_SEPARATOR: char = ':';
const KEY_SEPARATOR: char = '=';

/// Format one flat tag value.
pub fn format_tag(namespace: &str, key: &str, value: &str) -> String {
    format!("{namespace}{NAMESPACE_SEPARATOR}{key}{KEY_SEPARATOR}{value}")
}

/// Split one flat tag value into `(namespace, key, value)`.
///
/// Returns None when either separator is missing.
pub fn parse_tag(raw: &str) -> Option<(&str, &str, &str)> {
    let (namespace, rest) = raw.split_once(NAMESPACE_SEPARATOR)?;
    let (key, value) = rest.split_once(KEY_SEPARATOR)?;
    Some((namespace, key, value))
}

/// Append one `TAG` entry per tag value. No-op for an empty structure.
pub fn encode_tags(document: &mut Document, tags: &Tags) {
    for (namespace, keys) in tags {
        for (key, values) in keys {
            for value in values {
                document.add(FieldName::Tag, format_tag(namespace, key, value));
            }
        }
    }
}

/// Rebuild the tag structure from a document's `TAG` entries.
///
/// Values that cannot be split are skipped.
pub fn decode_tags(document: &Document) -> Tags {
    let mut tags = Tags::new();
    for raw in document.get_all(FieldName::Tag) {
        match parse_tag(raw) {
            Some((namespace, key, value)) => add_tag(&mut tags, namespace, key, value),
            None => warn!(tag = raw, "Skipping malformed tag value"),
        }
    }
    tags
}
