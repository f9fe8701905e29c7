//! Record documents.
//!
//! A record document describes one flat record in YAML, TOML or JSON: its
//! name, and for every field a declared kind, a current value and optional
//! rules. Documents are how records reach the verifier from outside a Rust
//! program.
//!
//! ```yaml
//! name: Signup
//! fields:
//!   - name: email
//!     kind: string
//!     value: "a@b.c"
//!     verify: "required,maxSize=64"
//!   - name: nick
//!     kind: reference
//!     elem: string
//!     value: null
//! ```

use crate::{ParserError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use std::collections::BTreeMap;
use verify_core::{
    ChannelState, Field, FloatWidth, IntWidth, Kind, Metadata, Record, VERIFY_TAG, Value,
};

/// A record as written in a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordDocument {
    /// Record type name
    pub name: String,

    /// Fields in declaration order
    #[serde(default)]
    pub fields: Vec<FieldDocument>,
}

/// A single field as written in a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDocument {
    /// Field name
    pub name: String,

    /// Declared kind (e.g. `i32`, `string`, `sequence`, `reference`)
    pub kind: String,

    /// Kind of the referenced value or of collection elements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elem: Option<String>,

    /// Current value; `null` or missing means the kind's zero value
    #[serde(default)]
    pub value: Json,

    /// Rule expression
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verify: Option<String>,

    /// Additional metadata
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct ChannelDocument {
    len: usize,
    capacity: Option<usize>,
}

impl RecordDocument {
    /// Converts the document into a record.
    ///
    /// # Errors
    ///
    /// Returns `ParserError::InvalidDocument` for unknown kinds, values that
    /// do not fit their declared kind, or integers out of range for their
    /// width.
    pub fn into_record(self) -> Result<Record> {
        let fields = self
            .fields
            .into_iter()
            .map(FieldDocument::into_field)
            .collect::<Result<Vec<_>>>()?;

        Ok(Record {
            name: self.name,
            fields,
        })
    }
}

impl FieldDocument {
    /// Converts the document into a field.
    pub fn into_field(self) -> Result<Field> {
        let kind = parse_kind(&self.name, &self.kind)?;
        let elem = self
            .elem
            .as_deref()
            .map(|elem| parse_kind(&self.name, elem))
            .transpose()?;
        let value = convert(&self.name, kind, elem, &self.value)?;

        let mut metadata: Metadata = self.tags;
        if let Some(rules) = self.verify {
            metadata.insert(VERIFY_TAG.to_string(), rules);
        }

        Ok(Field {
            name: self.name,
            value,
            metadata,
        })
    }
}

fn parse_kind(field: &str, name: &str) -> Result<Kind> {
    Kind::from_name(name).ok_or_else(|| {
        ParserError::InvalidDocument(format!("field '{field}': unknown kind '{name}'"))
    })
}

fn mismatch(field: &str, kind: Kind, json: &Json) -> ParserError {
    ParserError::InvalidDocument(format!(
        "field '{field}': expected a {kind} value, found {json}"
    ))
}

fn out_of_range(field: &str, kind: Kind, json: &Json) -> ParserError {
    ParserError::InvalidDocument(format!(
        "field '{field}': value {json} out of range for {kind}"
    ))
}

fn integer_error(field: &str, kind: Kind, json: &Json, n: &serde_json::Number) -> ParserError {
    if n.is_f64() {
        mismatch(field, kind, json)
    } else {
        out_of_range(field, kind, json)
    }
}

/// Converts a document value into a value of the declared kind.
fn convert(field: &str, kind: Kind, elem: Option<Kind>, json: &Json) -> Result<Value> {
    let value = match (kind, json) {
        (Kind::Bool, Json::Null) => Value::Bool(false),
        (Kind::Bool, Json::Bool(b)) => Value::Bool(*b),

        (Kind::Int(width), Json::Null) => Value::Int(width, 0),
        (Kind::Int(width), Json::Number(n)) => {
            let i = n.as_i64().ok_or_else(|| integer_error(field, kind, json, n))?;
            let i = fit_signed(width, i).ok_or_else(|| out_of_range(field, kind, json))?;
            Value::Int(width, i)
        }

        (Kind::Uint(width), Json::Null) => Value::Uint(width, 0),
        (Kind::Uint(width), Json::Number(n)) => {
            let u = n.as_u64().ok_or_else(|| integer_error(field, kind, json, n))?;
            let u = fit_unsigned(width, u).ok_or_else(|| out_of_range(field, kind, json))?;
            Value::Uint(width, u)
        }

        (Kind::Float(width), Json::Null) => Value::Float(width, 0.0),
        (Kind::Float(width), Json::Number(n)) => {
            let x = n.as_f64().ok_or_else(|| mismatch(field, kind, json))?;
            match width {
                FloatWidth::W32 => Value::Float(width, f64::from(x as f32)),
                FloatWidth::W64 => Value::Float(width, x),
            }
        }

        (Kind::String, Json::Null) => Value::String(String::new()),
        (Kind::String, Json::String(s)) => Value::String(s.clone()),

        (Kind::Sequence, Json::Null) => Value::Sequence(None),
        (Kind::Sequence, Json::Array(items)) => Value::Sequence(Some(elements(field, elem, items)?)),

        (Kind::Array, Json::Null) => Value::Array(Vec::new()),
        (Kind::Array, Json::Array(items)) => Value::Array(elements(field, elem, items)?),

        (Kind::Set, Json::Null) => Value::Set(None),
        (Kind::Set, Json::Array(items)) => Value::Set(Some(elements(field, elem, items)?)),

        (Kind::Map, Json::Null) => Value::Map(None),
        (Kind::Map, Json::Object(entries)) => Value::Map(Some(
            entries
                .iter()
                .map(|(k, v)| Ok((Value::String(k.clone()), element(field, elem, v)?)))
                .collect::<Result<Vec<_>>>()?,
        )),

        (Kind::Channel, Json::Null) => Value::Channel(None),
        (Kind::Channel, Json::Object(_)) => {
            let channel: ChannelDocument =
                serde_json::from_value(json.clone()).map_err(|_| mismatch(field, kind, json))?;
            Value::Channel(Some(ChannelState {
                len: channel.len,
                capacity: channel.capacity.unwrap_or(channel.len),
            }))
        }

        (Kind::Function, Json::Null) => Value::Function(None),
        (Kind::Function, Json::String(name)) => Value::Function(Some(name.clone())),

        (Kind::Record, Json::Null) => Value::Record(Record::new(field)),
        (Kind::Record, Json::Object(entries)) => Value::Record(Record {
            name: field.to_string(),
            fields: entries
                .iter()
                .map(|(name, v)| Field::new(name.clone(), infer(v)))
                .collect(),
        }),

        (Kind::Reference, Json::Null) => Value::Reference(None),
        (Kind::Reference, target) => Value::Reference(Some(Box::new(element(field, elem, target)?))),

        (Kind::Interface, Json::Null) => Value::Interface(None),
        (Kind::Interface, inner) => Value::Interface(Some(Box::new(element(field, elem, inner)?))),

        _ => return Err(mismatch(field, kind, json)),
    };

    Ok(value)
}

fn element(field: &str, elem: Option<Kind>, json: &Json) -> Result<Value> {
    match elem {
        Some(kind) => convert(field, kind, None, json),
        None => Ok(infer(json)),
    }
}

fn elements(field: &str, elem: Option<Kind>, items: &[Json]) -> Result<Vec<Value>> {
    items.iter().map(|item| element(field, elem, item)).collect()
}

/// Derives a value from untyped document data.
fn infer(json: &Json) -> Value {
    match json {
        Json::Null => Value::Interface(None),
        Json::Bool(b) => Value::Bool(*b),
        Json::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(IntWidth::W64, i)
            } else if let Some(u) = n.as_u64() {
                Value::Uint(IntWidth::W64, u)
            } else {
                Value::Float(FloatWidth::W64, n.as_f64().unwrap_or_default())
            }
        }
        Json::String(s) => Value::String(s.clone()),
        Json::Array(items) => Value::Sequence(Some(items.iter().map(infer).collect())),
        Json::Object(entries) => Value::Map(Some(
            entries
                .iter()
                .map(|(k, v)| (Value::String(k.clone()), infer(v)))
                .collect(),
        )),
    }
}

fn fit_signed(width: IntWidth, i: i64) -> Option<i64> {
    match width {
        IntWidth::W8 => i8::try_from(i).ok().map(i64::from),
        IntWidth::W16 => i16::try_from(i).ok().map(i64::from),
        IntWidth::W32 => i32::try_from(i).ok().map(i64::from),
        IntWidth::W64 => Some(i),
        IntWidth::Size => isize::try_from(i).ok().map(|i| i as i64),
    }
}

fn fit_unsigned(width: IntWidth, u: u64) -> Option<u64> {
    match width {
        IntWidth::W8 => u8::try_from(u).ok().map(u64::from),
        IntWidth::W16 => u16::try_from(u).ok().map(u64::from),
        IntWidth::W32 => u32::try_from(u).ok().map(u64::from),
        IntWidth::W64 => Some(u),
        IntWidth::Size => usize::try_from(u).ok().map(|u| u as u64),
    }
}
