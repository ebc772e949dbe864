//! Conversion between codec documents and Tantivy documents.

use tantivy::schema::Value;
use tantivy::TantivyDocument;

use webgraph_codec::{Document, FieldName};

use crate::schema::GraphSchema;

/// Convert a codec document to a Tantivy document, entry by entry.
pub fn to_tantivy_doc(schema: &GraphSchema, document: &Document) -> TantivyDocument {
    let mut doc = TantivyDocument::default();
    for (name, value) in document.iter() {
        doc.add_text(schema.field(name), value);
    }
    doc
}

/// Convert a stored Tantivy document back to a codec document.
///
/// Values of one field keep their stored order; fields come back in
/// [`FieldName::ALL`] order.
pub fn from_tantivy_doc(schema: &GraphSchema, doc: &TantivyDocument) -> Document {
    FieldName::ALL
        .iter()
        .flat_map(|name| {
            doc.get_all(schema.field(*name))
                .filter_map(|value| value.as_str().map(str::to_string))
                .map(move |value| (*name, value))
                .collect::<Vec<_>>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::build_graph_schema;

    #[test]
    fn test_conversion_keeps_repeated_values() {
        let schema = build_graph_schema();
        let mut doc = Document::new();
        doc.add(FieldName::Id, "we-1");
        doc.add(FieldName::Type, "WEBENTITY");
        doc.add(FieldName::Lru, "s:http|h:org|h:b|");
        doc.add(FieldName::Lru, "s:http|h:org|h:a|");
        doc.add(FieldName::Tag, "meta:lang=en");

        let tantivy_doc = to_tantivy_doc(&schema, &doc);
        let lru = tantivy_doc
            .get_first(schema.field(FieldName::Lru))
            .and_then(|v| v.as_str());
        assert_eq!(lru, Some("s:http|h:org|h:b|"));

        let back = from_tantivy_doc(&schema, &tantivy_doc);
        assert_eq!(back.len(), doc.len());
        let lrus: Vec<&str> = back.get_all(FieldName::Lru).collect();
        assert_eq!(lrus, vec!["s:http|h:org|h:b|", "s:http|h:org|h:a|"]);
        assert_eq!(back.id(), Some("we-1"));
        assert_eq!(back.get(FieldName::Tag), Some("meta:lang=en"));
    }
}
