//! Inspectable field values.
//!
//! A [`Value`] is the closed set of shapes a field can take once a host type has
//! been inspected. Each variant carries exactly what rule evaluation needs:
//! numbers keep their declared width, collections keep their length and whether
//! their storage exists at all, and wrappers keep their (possibly absent) target.

use crate::Record;
use std::fmt;

/// Bit width of an integer kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntWidth {
    /// 8-bit integer
    W8,
    /// 16-bit integer
    W16,
    /// 32-bit integer
    W32,
    /// 64-bit integer
    W64,
    /// Pointer-sized integer
    Size,
}

/// Bit width of a floating-point kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatWidth {
    /// 32-bit float
    W32,
    /// 64-bit float
    W64,
}

/// The declared kind of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    Int(IntWidth),
    Uint(IntWidth),
    Float(FloatWidth),
    String,
    /// Growable sequence; may be absent (nil)
    Sequence,
    /// Fixed-size sequence; never absent
    Array,
    Set,
    Map,
    /// Buffered channel-like queue
    Channel,
    Function,
    Record,
    /// Optional reference to another value
    Reference,
    /// Dynamically typed wrapper around another value
    Interface,
}

impl Kind {
    /// All kinds in a stable order.
    pub const ALL: [Kind; 23] = [
        Kind::Bool,
        Kind::Int(IntWidth::W8),
        Kind::Int(IntWidth::W16),
        Kind::Int(IntWidth::W32),
        Kind::Int(IntWidth::W64),
        Kind::Int(IntWidth::Size),
        Kind::Uint(IntWidth::W8),
        Kind::Uint(IntWidth::W16),
        Kind::Uint(IntWidth::W32),
        Kind::Uint(IntWidth::W64),
        Kind::Uint(IntWidth::Size),
        Kind::Float(FloatWidth::W32),
        Kind::Float(FloatWidth::W64),
        Kind::String,
        Kind::Sequence,
        Kind::Array,
        Kind::Set,
        Kind::Map,
        Kind::Channel,
        Kind::Function,
        Kind::Record,
        Kind::Reference,
        Kind::Interface,
    ];

    /// Returns the canonical name of this kind (e.g. `i32`, `sequence`).
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Bool => "bool",
            Kind::Int(IntWidth::W8) => "i8",
            Kind::Int(IntWidth::W16) => "i16",
            Kind::Int(IntWidth::W32) => "i32",
            Kind::Int(IntWidth::W64) => "i64",
            Kind::Int(IntWidth::Size) => "isize",
            Kind::Uint(IntWidth::W8) => "u8",
            Kind::Uint(IntWidth::W16) => "u16",
            Kind::Uint(IntWidth::W32) => "u32",
            Kind::Uint(IntWidth::W64) => "u64",
            Kind::Uint(IntWidth::Size) => "usize",
            Kind::Float(FloatWidth::W32) => "f32",
            Kind::Float(FloatWidth::W64) => "f64",
            Kind::String => "string",
            Kind::Sequence => "sequence",
            Kind::Array => "array",
            Kind::Set => "set",
            Kind::Map => "map",
            Kind::Channel => "channel",
            Kind::Function => "function",
            Kind::Record => "record",
            Kind::Reference => "reference",
            Kind::Interface => "interface",
        }
    }

    /// Looks a kind up by its canonical name.
    pub fn from_name(name: &str) -> Option<Kind> {
        Kind::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Returns the zero value of this kind.
    ///
    /// Nilable kinds yield their absent form; an array yields an empty array
    /// and a record yields an empty, unnamed record.
    pub fn zero_value(&self) -> Value {
        match *self {
            Kind::Bool => Value::Bool(false),
            Kind::Int(width) => Value::Int(width, 0),
            Kind::Uint(width) => Value::Uint(width, 0),
            Kind::Float(width) => Value::Float(width, 0.0),
            Kind::String => Value::String(String::new()),
            Kind::Sequence => Value::Sequence(None),
            Kind::Array => Value::Array(Vec::new()),
            Kind::Set => Value::Set(None),
            Kind::Map => Value::Map(None),
            Kind::Channel => Value::Channel(None),
            Kind::Function => Value::Function(None),
            Kind::Record => Value::Record(Record::new("")),
            Kind::Reference => Value::Reference(None),
            Kind::Interface => Value::Interface(None),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Length and capacity of a channel-like buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelState {
    /// Number of buffered elements
    pub len: usize,
    /// Buffer capacity
    pub capacity: usize,
}

/// The current value of a field, tagged with its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(IntWidth, i64),
    Uint(IntWidth, u64),
    /// Float value widened to 64 bits
    Float(FloatWidth, f64),
    String(String),
    Sequence(Option<Vec<Value>>),
    Array(Vec<Value>),
    Set(Option<Vec<Value>>),
    Map(Option<Vec<(Value, Value)>>),
    Channel(Option<ChannelState>),
    /// Function-like value, identified by the name it is bound to
    Function(Option<String>),
    Record(Record),
    Reference(Option<Box<Value>>),
    Interface(Option<Box<Value>>),
}

impl Value {
    /// Wraps an inspectable value in an interface.
    pub fn interface<T: crate::Inspect + ?Sized>(inner: &T) -> Self {
        Value::Interface(Some(Box::new(inner.to_value())))
    }

    /// An interface holding nothing.
    pub fn nil_interface() -> Self {
        Value::Interface(None)
    }

    /// A reference to an inspectable value.
    pub fn reference<T: crate::Inspect + ?Sized>(target: &T) -> Self {
        Value::Reference(Some(Box::new(target.to_value())))
    }

    /// A function-like value bound to `name`.
    pub fn function(name: impl Into<String>) -> Self {
        Value::Function(Some(name.into()))
    }

    /// A channel-like buffer holding `len` elements out of `capacity`.
    pub fn channel(len: usize, capacity: usize) -> Self {
        Value::Channel(Some(ChannelState { len, capacity }))
    }

    /// Returns the kind of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Bool(_) => Kind::Bool,
            Value::Int(width, _) => Kind::Int(*width),
            Value::Uint(width, _) => Kind::Uint(*width),
            Value::Float(width, _) => Kind::Float(*width),
            Value::String(_) => Kind::String,
            Value::Sequence(_) => Kind::Sequence,
            Value::Array(_) => Kind::Array,
            Value::Set(_) => Kind::Set,
            Value::Map(_) => Kind::Map,
            Value::Channel(_) => Kind::Channel,
            Value::Function(_) => Kind::Function,
            Value::Record(_) => Kind::Record,
            Value::Reference(_) => Kind::Reference,
            Value::Interface(_) => Kind::Interface,
        }
    }

    /// Returns the length of a sized value.
    ///
    /// Strings report their length in bytes; absent collections and channels
    /// report zero. Returns `None` for kinds that have no length.
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::String(s) => Some(s.len()),
            Value::Sequence(items) | Value::Set(items) => {
                Some(items.as_ref().map_or(0, Vec::len))
            }
            Value::Array(items) => Some(items.len()),
            Value::Map(entries) => Some(entries.as_ref().map_or(0, Vec::len)),
            Value::Channel(state) => Some(state.map_or(0, |s| s.len)),
            _ => None,
        }
    }

    /// Returns true if this value is nilable and currently absent.
    pub fn is_nil(&self) -> bool {
        matches!(
            self,
            Value::Sequence(None)
                | Value::Set(None)
                | Value::Map(None)
                | Value::Channel(None)
                | Value::Function(None)
                | Value::Reference(None)
                | Value::Interface(None)
        )
    }

    /// Returns true if this value equals the zero value of its kind.
    ///
    /// Arrays and records are zero when every element or field is zero.
    /// Present references and interfaces are never zero, whatever they hold.
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Bool(b) => !*b,
            Value::Int(_, i) => *i == 0,
            Value::Uint(_, u) => *u == 0,
            Value::Float(_, f) => *f == 0.0,
            Value::String(s) => s.is_empty(),
            Value::Array(items) => items.iter().all(Value::is_zero),
            Value::Record(record) => record.fields.iter().all(|f| f.value.is_zero()),
            other => other.is_nil(),
        }
    }

    /// Follows references and interfaces until a concrete value is reached.
    ///
    /// Returns `None` when the chain ends in an absent reference or an empty
    /// interface.
    pub fn resolve(&self) -> Option<&Value> {
        let mut current = self;
        loop {
            match current {
                Value::Reference(target) | Value::Interface(target) => {
                    current = target.as_deref()?;
                }
                concrete => return Some(concrete),
            }
        }
    }

    /// Attempts to get this value as a record.
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Record(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_kind_names_round_trip() {
        for kind in Kind::ALL {
            assert_eq!(Kind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(Kind::from_name("int"), None);
    }

    #[test]
    fn test_zero_values_are_zero() {
        for kind in Kind::ALL {
            let zero = kind.zero_value();
            assert_eq!(zero.kind(), kind);
            assert!(zero.is_zero(), "{kind} zero value should be zero");
        }
    }

    #[test]
    fn test_len_of_absent_collections() {
        assert_eq!(Value::Sequence(None).len(), Some(0));
        assert_eq!(Value::Map(None).len(), Some(0));
        assert_eq!(Value::Channel(None).len(), Some(0));
        assert_eq!(Value::channel(3, 10).len(), Some(3));
        assert_eq!(Value::String("héllo".to_string()).len(), Some(6));
        assert_eq!(Value::Bool(true).len(), None);
    }

    #[test]
    fn test_empty_sequence_is_not_nil() {
        assert!(Value::Sequence(None).is_nil());
        assert!(!Value::Sequence(Some(vec![])).is_nil());
        assert!(!Value::Sequence(Some(vec![])).is_zero());
    }

    #[test]
    fn test_reference_to_zero_is_not_zero() {
        let value = Value::Reference(Some(Box::new(Value::Bool(false))));
        assert!(!value.is_zero());
    }

    #[test]
    fn test_resolve_follows_wrappers() {
        let record = Value::Record(Record::new("A"));
        let wrapped = Value::Interface(Some(Box::new(Value::Reference(Some(Box::new(
            record.clone(),
        ))))));
        assert_eq!(wrapped.resolve(), Some(&record));
        assert_eq!(Value::Reference(None).resolve(), None);
        assert_eq!(
            Value::Interface(Some(Box::new(Value::Interface(None)))).resolve(),
            None
        );
    }
}
