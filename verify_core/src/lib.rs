//! # Verify Core
//!
//! Core data structures for declarative field-level verification.
//!
//! A record is a flat, named list of fields. Each field carries its current
//! [`Value`] and a metadata map; the `verify` entry of that map holds the
//! field's rule expression (e.g. `required,maxSize=64`). The verification
//! engine lives in `verify_validator`; this crate provides the shared
//! vocabulary:
//!
//! - **Value / Kind**: the closed set of field shapes a rule can inspect
//! - **Record / Field**: flat records and their per-field metadata
//! - **Inspect**: the seam through which host types describe themselves
//! - **Errors**: structural errors, violations and the single error a run returns
//!
//! ## Example
//!
//! ```rust
//! use verify_core::{Inspect, Kind, record};
//!
//! record! {
//!     pub struct Foo {
//!         #[verify("minSize=5")]
//!         pub a: Vec<String>,
//!         #[verify("min=3,max=7")]
//!         pub e: i64,
//!     }
//! }
//!
//! let foo = Foo { a: vec![], e: 4 };
//! let value = foo.to_value();
//! let record = value.as_record().unwrap();
//! assert_eq!(record.fields[0].value.kind(), Kind::Sequence);
//! ```

pub mod builder;
pub mod error;
pub mod inspect;
pub mod macros;
pub mod record;
pub mod rules;
pub mod validator;
pub mod value;

pub use builder::*;
pub use error::*;
pub use inspect::*;
pub use record::*;
pub use rules::*;
pub use validator::*;
pub use value::*;
