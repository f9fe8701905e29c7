//! # Verify Validator
//!
//! Rule evaluation engine for declarative field-level verification. This
//! crate checks a record's fields against the rule expressions attached to
//! them:
//!
//! - Record resolution (references and interfaces are followed to a record)
//! - Field traversal in declaration order, skipping fields without rules
//! - Clause evaluation: `minSize`, `maxSize`, `min`, `max`, `required`
//! - Per-field aggregation of violations into a single error
//!
//! A call returns one of: success, one field's aggregated violations, or the
//! first structural error. Errors are never collected across fields.
//!
//! ## Example
//!
//! ```rust
//! use verify_core::record;
//! use verify_validator::validate;
//!
//! record! {
//!     struct Foo {
//!         #[verify("required")]
//!         f: Option<bool>,
//!     }
//! }
//!
//! let err = validate(&Foo { f: None }).unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "verify found the following errors: [f is required but is set to zero value]"
//! );
//! ```

mod checks;
mod engine;
mod evaluator;
mod walker;

pub use engine::*;
pub use evaluator::*;
pub use walker::*;
