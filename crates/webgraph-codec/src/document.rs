//! Flat, schema-on-write document handed to the document store.
//!
//! A document is an ordered list of `(field, value)` entries. A field may
//! repeat; repeated entries keep their insertion order and are not
//! deduplicated. Values are plain strings, so an absent optional value and an
//! empty one are indistinguishable here: encode writes neither.

use webgraph_types::RecordKind;

use crate::field::FieldName;

/// Ordered multi-map of field name to string value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    fields: Vec<(FieldName, String)>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value for `field`, after any existing ones.
    pub fn add(&mut self, field: FieldName, value: impl Into<String>) {
        self.fields.push((field, value.into()));
    }

    /// First value of `field`, if any.
    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| value.as_str())
    }

    /// All values of `field`, in insertion order.
    pub fn get_all(&self, field: FieldName) -> impl Iterator<Item = &str> + '_ {
        self.fields
            .iter()
            .filter(move |(name, _)| *name == field)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, field: FieldName) -> bool {
        self.get(field).is_some()
    }

    /// Number of entries for `field`.
    pub fn count(&self, field: FieldName) -> usize {
        self.get_all(field).count()
    }

    /// Record kind named by the discriminator, if present and known.
    pub fn kind(&self) -> Option<RecordKind> {
        self.get(FieldName::Type).and_then(RecordKind::parse)
    }

    /// Document identity, if the kind carries one.
    pub fn id(&self) -> Option<&str> {
        self.get(FieldName::Id)
    }

    /// Every entry, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> + '_ {
        self.fields.iter().map(|(name, value)| (*name, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(FieldName, String)> for Document {
    fn from_iter<T: IntoIterator<Item = (FieldName, String)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
