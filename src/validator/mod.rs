//! # Validator Module
//!
//! Transforms raw textual input (a captured path segment or the ordered
//! occurrences of a query key) into a typed [`ParamValue`], or rejects it
//! with a [`ParamError`], per the rules of a
//! [`ParameterSpec`](crate::spec::ParameterSpec).
//!
//! Validation is a pure, synchronous function of its inputs: no I/O, no
//! retries, no shared mutable state. Steps run in a fixed order per field —
//! presence, arity, type coercion, constraints — and stop at the first
//! failure *for that field*. Aggregation across fields is the
//! [binder](crate::binder)'s job: one request's rejection lists every
//! failing field.
//!
//! ## Example
//!
//! ```rust
//! use paramgate::spec::ParameterSpec;
//! use paramgate::validator::{validate, ParamValue};
//!
//! # fn main() -> Result<(), paramgate::spec::SpecError> {
//! let spec = ParameterSpec::query("limit").integer().ge(0).default_value(10).finish()?;
//!
//! assert_eq!(validate(&spec, &["25"], true), Ok(ParamValue::Integer(25)));
//! assert_eq!(validate(&spec, &[], false), Ok(ParamValue::Integer(10)));
//! assert!(validate(&spec, &["abc"], true).is_err());
//! # Ok(())
//! # }
//! ```

mod core;
mod issues;

pub use self::core::{validate, Bound, ParamError, ParamValue, StringFacet};
pub use self::issues::{FieldIssue, Rejection};
