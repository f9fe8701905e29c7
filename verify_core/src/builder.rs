//! Builder pattern for creating records.
//!
//! This module provides ergonomic builders for describing a record and the
//! metadata attached to each of its fields with a fluent API.

use crate::{Field, Inspect, Metadata, Record, VERIFY_TAG, Value};

/// Builder for creating a `Record`.
///
/// # Example
///
/// ```rust
/// use verify_core::{RecordBuilder, Value};
///
/// let tags: Vec<String> = Vec::new();
/// let record = RecordBuilder::new("Signup")
///     .field("email", "a@b.c", "required,maxSize=64")
///     .field("tags", &tags, "maxSize=8")
///     .plain("source", "web")
///     .build();
///
/// assert_eq!(record.len(), 3);
/// assert_eq!(record.fields[0].rules(), Some("required,maxSize=64"));
/// assert_eq!(record.fields[2].rules(), None);
/// ```
#[derive(Debug)]
pub struct RecordBuilder {
    name: String,
    fields: Vec<Field>,
}

impl RecordBuilder {
    /// Creates a new record builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Adds a field carrying a rule expression.
    pub fn field<T: Inspect + ?Sized>(
        self,
        name: impl Into<String>,
        value: &T,
        rules: impl Into<String>,
    ) -> Self {
        self.push(FieldBuilder::new(name, value).rules(rules).build())
    }

    /// Adds a field without rules. It is carried along but never verified.
    pub fn plain<T: Inspect + ?Sized>(self, name: impl Into<String>, value: &T) -> Self {
        self.push(FieldBuilder::new(name, value).build())
    }

    /// Adds a field whose rule expression may be absent.
    pub fn field_with<T: Inspect + ?Sized>(
        self,
        name: impl Into<String>,
        value: &T,
        rules: Option<&str>,
    ) -> Self {
        let mut field = FieldBuilder::new(name, value);
        if let Some(rules) = rules {
            field = field.rules(rules);
        }
        self.push(field.build())
    }

    /// Adds a fully built field.
    pub fn push(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Builds the record.
    pub fn build(self) -> Record {
        Record {
            name: self.name,
            fields: self.fields,
        }
    }
}

/// Builder for creating a `Field` with arbitrary metadata.
///
/// # Example
///
/// ```rust
/// use verify_core::FieldBuilder;
///
/// let field = FieldBuilder::new("age", &42i64)
///     .rules("min=18")
///     .tag("json", "age")
///     .build();
///
/// assert_eq!(field.rules(), Some("min=18"));
/// assert_eq!(field.tag("json"), Some("age"));
/// ```
#[derive(Debug)]
pub struct FieldBuilder {
    name: String,
    value: Value,
    metadata: Metadata,
}

impl FieldBuilder {
    /// Creates a new field builder from an inspectable value.
    pub fn new<T: Inspect + ?Sized>(name: impl Into<String>, value: &T) -> Self {
        Self::from_value(name, value.to_value())
    }

    /// Creates a new field builder from an already inspected value.
    pub fn from_value(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
            metadata: Metadata::new(),
        }
    }

    /// Sets the rule expression under the `verify` tag.
    pub fn rules(self, rules: impl Into<String>) -> Self {
        self.tag(VERIFY_TAG, rules)
    }

    /// Sets arbitrary metadata.
    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Builds the field.
    pub fn build(self) -> Field {
        Field {
            name: self.name,
            value: self.value,
            metadata: self.metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Kind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builder_keeps_declaration_order() {
        let record = RecordBuilder::new("Foo")
            .plain("c", &1i64)
            .field("a", &vec!["x".to_string()], "minSize=1")
            .field_with("b", &true, None)
            .build();

        let names: Vec<_> = record.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
        assert_eq!(record.fields[1].value.kind(), Kind::Sequence);
        assert!(record.fields[2].metadata.is_empty());
    }

    #[test]
    fn test_custom_tag_key() {
        let field = FieldBuilder::from_value("a", Value::Bool(true))
            .tag("check", "required")
            .build();
        assert_eq!(field.rules(), None);
        assert_eq!(field.tag("check"), Some("required"));
    }
}
