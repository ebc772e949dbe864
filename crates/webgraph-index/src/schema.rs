//! Tantivy schema for graph documents.
//!
//! Every codec field becomes an untokenized, stored text field, so any value
//! can be matched exactly and read back as written.

use tantivy::schema::{Field, Schema, STORED, STRING};

use webgraph_codec::FieldName;

use crate::error::IndexError;

/// Schema field handles, one per [`FieldName`].
#[derive(Debug, Clone)]
pub struct GraphSchema {
    schema: Schema,
    /// Indexed by `FieldName as usize`
    fields: Vec<Field>,
}

impl GraphSchema {
    /// Get the underlying Tantivy schema
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Tantivy field for a codec field.
    pub fn field(&self, name: FieldName) -> Field {
        self.fields[name as usize]
    }

    /// Create a GraphSchema from an existing Tantivy Schema
    pub fn from_schema(schema: Schema) -> Result<Self, IndexError> {
        let fields = FieldName::ALL
            .iter()
            .map(|name| {
                schema
                    .get_field(name.as_str())
                    .map_err(|_| IndexError::SchemaMismatch(format!("missing {} field", name)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { schema, fields })
    }
}

/// Build the graph document schema.
pub fn build_graph_schema() -> GraphSchema {
    let mut schema_builder = Schema::builder();

    let fields: Vec<Field> = FieldName::ALL
        .iter()
        .map(|name| schema_builder.add_text_field(name.as_str(), STRING | STORED))
        .collect();

    GraphSchema {
        schema: schema_builder.build(),
        fields,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_schema() {
        let schema = build_graph_schema();
        for name in FieldName::ALL {
            assert!(schema.schema().get_field(name.as_str()).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_field_lookup_matches_names() {
        let schema = build_graph_schema();
        for name in FieldName::ALL {
            let field = schema.field(name);
            assert_eq!(schema.schema().get_field_name(field), name.as_str());
        }
    }

    #[test]
    fn test_from_schema() {
        let original = build_graph_schema();
        let rebuilt = GraphSchema::from_schema(original.schema().clone()).unwrap();
        assert_eq!(rebuilt.field(FieldName::Type), original.field(FieldName::Type));
        assert_eq!(rebuilt.field(FieldName::Tag), original.field(FieldName::Tag));
    }

    #[test]
    fn test_from_foreign_schema_fails() {
        let mut builder = Schema::builder();
        builder.add_text_field("doc_id", STRING | STORED);
        let err = GraphSchema::from_schema(builder.build()).unwrap_err();
        assert!(matches!(err, IndexError::SchemaMismatch(_)));
    }
}
