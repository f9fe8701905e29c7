//! Flat records and their field metadata.

use crate::Value;
use std::collections::BTreeMap;

/// Tag key under which rule expressions are stored by default.
pub const VERIFY_TAG: &str = "verify";

/// Per-field metadata, keyed by tag name.
pub type Metadata = BTreeMap<String, String>;

/// A single named field of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Field name
    pub name: String,

    /// Current value of the field
    pub value: Value,

    /// Metadata attached to the field declaration
    pub metadata: Metadata,
}

impl Field {
    /// Creates a field without metadata.
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
            metadata: Metadata::new(),
        }
    }

    /// Returns the metadata stored under `key`, if any.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// Returns the rule expression stored under the default `verify` tag.
    pub fn rules(&self) -> Option<&str> {
        self.tag(VERIFY_TAG)
    }
}

/// A flat, named composite value.
///
/// Fields keep their declaration order, which is also the order in which they
/// are verified.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Type name of the record
    pub name: String,

    /// Fields in declaration order
    pub fields: Vec<Field>,
}

impl Record {
    /// Creates an empty record.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Looks a field up by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the field name to metadata mapping for `key`, in declaration
    /// order. Fields without that tag are left out.
    pub fn tagged<'a>(&'a self, key: &'a str) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.fields
            .iter()
            .filter_map(move |f| f.tag(key).map(|tag| (f.name.as_str(), tag)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tagged_skips_untagged_fields() {
        let mut tagged = Field::new("A", Value::Bool(true));
        tagged
            .metadata
            .insert(VERIFY_TAG.to_string(), "required".to_string());

        let record = Record {
            name: "Foo".to_string(),
            fields: vec![Field::new("B", Value::Bool(false)), tagged],
        };

        let rules: Vec<_> = record.tagged(VERIFY_TAG).collect();
        assert_eq!(rules, vec![("A", "required")]);
        assert_eq!(record.field("A").and_then(Field::rules), Some("required"));
        assert_eq!(record.field("B").and_then(Field::rules), None);
    }
}
