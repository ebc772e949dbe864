//! Namespaced tags attached to pages and web entities.

use std::collections::{BTreeMap, BTreeSet};

/// namespace -> key -> values
pub type Tags = BTreeMap<String, BTreeMap<String, BTreeSet<String>>>;

/// Insert one tag value, creating the namespace and key as needed.
pub fn add_tag(
    tags: &mut Tags,
    namespace: impl Into<String>,
    key: impl Into<String>,
    value: impl Into<String>,
) {
    tags.entry(namespace.into())
        .or_default()
        .entry(key.into())
        .or_default()
        .insert(value.into());
}

/// Total number of values across all namespaces and keys.
pub fn tag_value_count(tags: &Tags) -> usize {
    tags.values()
        .flat_map(|keys| keys.values())
        .map(|values| values.len())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_tag_merges_values() {
        let mut tags = Tags::new();
        add_tag(&mut tags, "meta", "lang", "en");
        add_tag(&mut tags, "meta", "lang", "fr");
        add_tag(&mut tags, "meta", "lang", "en");
        add_tag(&mut tags, "user", "topic", "science");

        assert_eq!(tags.len(), 2);
        assert_eq!(tags["meta"]["lang"].len(), 2);
        assert_eq!(tag_value_count(&tags), 3);
    }
}
