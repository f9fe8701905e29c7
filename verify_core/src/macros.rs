//! Declarative record definitions.

/// Declares a struct together with its [`Inspect`](crate::Inspect) impl.
///
/// Each field may carry a `#[verify("...")]` attribute holding its rule
/// expression. Every declared field is exposed to the verifier in declaration
/// order, under its Rust field name; fields without the attribute are carried
/// but never checked. Other field attributes are not supported.
///
/// # Example
///
/// ```rust
/// use verify_core::{Inspect, record};
///
/// record! {
///     #[derive(Debug, Default)]
///     pub struct Signup {
///         #[verify("required,maxSize=64")]
///         pub email: String,
///         #[verify("min=18")]
///         pub age: i64,
///         pub referrer: Option<String>,
///     }
/// }
///
/// let value = Signup::default().to_value();
/// let record = value.as_record().unwrap();
/// assert_eq!(record.name, "Signup");
/// assert_eq!(record.fields[1].rules(), Some("min=18"));
/// assert_eq!(record.fields[2].rules(), None);
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[verify($rules:literal)])?
                $fvis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $( $fvis $field: $ty, )*
        }

        impl $crate::Inspect for $name {
            fn to_value(&self) -> $crate::Value {
                $crate::Value::Record(
                    $crate::RecordBuilder::new(stringify!($name))
                        $(
                            .field_with(
                                stringify!($field),
                                &self.$field,
                                $crate::__verify_rules!($($rules)?),
                            )
                        )*
                        .build(),
                )
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __verify_rules {
    () => {
        ::core::option::Option::None
    };
    ($rules:literal) => {
        ::core::option::Option::Some($rules)
    };
}
