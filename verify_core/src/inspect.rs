//! Conversion of host values into inspectable [`Value`]s.
//!
//! [`Inspect`] is the metadata-accessor seam: anything that can describe
//! itself as a [`Value`] can be verified. Implementations are provided for
//! scalars, strings, the standard collections, smart pointers and `Option`.
//! Records are usually declared with the [`record!`](crate::record) macro.

use crate::{FloatWidth, IntWidth, Record, Value};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

/// A type that can be inspected for verification.
pub trait Inspect {
    /// Describes the current value.
    fn to_value(&self) -> Value;

    /// What `None::<Self>` looks like.
    ///
    /// Nilable kinds (sequences, sets, maps) report their own absent form so
    /// that `Option<Vec<T>>` behaves as a nilable sequence. Everything else is
    /// an absent reference.
    fn absent() -> Value
    where
        Self: Sized,
    {
        Value::Reference(None)
    }

    /// What `Some(self)` looks like. Defaults to a reference to `self`.
    fn present(&self) -> Value {
        Value::Reference(Some(Box::new(self.to_value())))
    }
}

impl Inspect for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl Inspect for Record {
    fn to_value(&self) -> Value {
        Value::Record(self.clone())
    }
}

impl Inspect for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

macro_rules! inspect_int {
    ($($ty:ty => $variant:ident($width:expr)),* $(,)?) => {
        $(
            impl Inspect for $ty {
                fn to_value(&self) -> Value {
                    Value::$variant($width, *self as _)
                }
            }
        )*
    };
}

inspect_int! {
    i8 => Int(IntWidth::W8),
    i16 => Int(IntWidth::W16),
    i32 => Int(IntWidth::W32),
    i64 => Int(IntWidth::W64),
    isize => Int(IntWidth::Size),
    u8 => Uint(IntWidth::W8),
    u16 => Uint(IntWidth::W16),
    u32 => Uint(IntWidth::W32),
    u64 => Uint(IntWidth::W64),
    usize => Uint(IntWidth::Size),
}

impl Inspect for f32 {
    fn to_value(&self) -> Value {
        Value::Float(FloatWidth::W32, f64::from(*self))
    }
}

impl Inspect for f64 {
    fn to_value(&self) -> Value {
        Value::Float(FloatWidth::W64, *self)
    }
}

impl Inspect for str {
    fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl Inspect for String {
    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl<T: Inspect> Inspect for Vec<T> {
    fn to_value(&self) -> Value {
        Value::Sequence(Some(self.iter().map(Inspect::to_value).collect()))
    }

    fn absent() -> Value {
        Value::Sequence(None)
    }

    fn present(&self) -> Value {
        self.to_value()
    }
}

impl<T: Inspect> Inspect for VecDeque<T> {
    fn to_value(&self) -> Value {
        Value::Sequence(Some(self.iter().map(Inspect::to_value).collect()))
    }

    fn absent() -> Value {
        Value::Sequence(None)
    }

    fn present(&self) -> Value {
        self.to_value()
    }
}

impl<T: Inspect, const N: usize> Inspect for [T; N] {
    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(Inspect::to_value).collect())
    }
}

impl<K: Inspect, V: Inspect, S> Inspect for HashMap<K, V, S> {
    fn to_value(&self) -> Value {
        Value::Map(Some(
            self.iter().map(|(k, v)| (k.to_value(), v.to_value())).collect(),
        ))
    }

    fn absent() -> Value {
        Value::Map(None)
    }

    fn present(&self) -> Value {
        self.to_value()
    }
}

impl<K: Inspect, V: Inspect> Inspect for BTreeMap<K, V> {
    fn to_value(&self) -> Value {
        Value::Map(Some(
            self.iter().map(|(k, v)| (k.to_value(), v.to_value())).collect(),
        ))
    }

    fn absent() -> Value {
        Value::Map(None)
    }

    fn present(&self) -> Value {
        self.to_value()
    }
}

impl<T: Inspect, S> Inspect for HashSet<T, S> {
    fn to_value(&self) -> Value {
        Value::Set(Some(self.iter().map(Inspect::to_value).collect()))
    }

    fn absent() -> Value {
        Value::Set(None)
    }

    fn present(&self) -> Value {
        self.to_value()
    }
}

impl<T: Inspect> Inspect for BTreeSet<T> {
    fn to_value(&self) -> Value {
        Value::Set(Some(self.iter().map(Inspect::to_value).collect()))
    }

    fn absent() -> Value {
        Value::Set(None)
    }

    fn present(&self) -> Value {
        self.to_value()
    }
}

impl<T: Inspect> Inspect for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(inner) => inner.present(),
            None => T::absent(),
        }
    }
}

// Owning and shared pointers are transparent: only `Option` introduces
// nilability.
impl<T: Inspect + ?Sized> Inspect for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: Inspect + ?Sized> Inspect for Box<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: Inspect + ?Sized> Inspect for Rc<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: Inspect + ?Sized> Inspect for Arc<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Kind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scalars_keep_width() {
        assert_eq!(7i8.to_value(), Value::Int(IntWidth::W8, 7));
        assert_eq!((-7isize).to_value(), Value::Int(IntWidth::Size, -7));
        assert_eq!(7u16.to_value(), Value::Uint(IntWidth::W16, 7));
        assert_eq!(1.5f32.to_value(), Value::Float(FloatWidth::W32, 1.5));
        assert_eq!("hi".to_value(), Value::String("hi".to_string()));
    }

    #[test]
    fn test_option_of_collection_is_nilable_collection() {
        let none: Option<Vec<i32>> = None;
        assert_eq!(none.to_value(), Value::Sequence(None));

        let some: Option<Vec<i32>> = Some(vec![]);
        assert_eq!(some.to_value(), Value::Sequence(Some(vec![])));

        let none: Option<HashMap<String, i32>> = None;
        assert_eq!(none.to_value(), Value::Map(None));
    }

    #[test]
    fn test_option_of_scalar_is_reference() {
        let none: Option<bool> = None;
        assert_eq!(none.to_value(), Value::Reference(None));

        let some = Some(false);
        assert_eq!(
            some.to_value(),
            Value::Reference(Some(Box::new(Value::Bool(false))))
        );
    }

    #[test]
    fn test_method_call_on_option_reaches_trait() {
        // `Option` has an inherent `inspect` adaptor; `to_value` must not clash with it
        let nested: Option<Option<Vec<u8>>> = Some(None);
        assert_eq!(
            nested.to_value(),
            Value::Reference(Some(Box::new(Value::Sequence(None))))
        );
        assert_eq!(Some(3i64).to_value(), Value::reference(&3i64));
    }

    #[test]
    fn test_pointers_are_transparent() {
        let boxed: Box<str> = "x".into();
        assert_eq!(boxed.to_value().kind(), Kind::String);
        assert_eq!(Arc::new(3i64).to_value(), Value::Int(IntWidth::W64, 3));
        assert_eq!(Rc::new(vec![1u8]).to_value().kind(), Kind::Sequence);
    }

    #[test]
    fn test_array_is_fixed_size() {
        assert_eq!([1i32, 2, 3].to_value().kind(), Kind::Array);
        assert_eq!([1i32, 2, 3].to_value().len(), Some(3));
    }
}
