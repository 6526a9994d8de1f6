//! # Spec Module
//!
//! Declarations consumed by the validator and the router: parameter specs,
//! their constraint payloads, and route definitions.
//!
//! A [`ParameterSpec`] is built once per route registration through the
//! builder API and is immutable afterwards; requests are validated against it
//! with no shared mutable state. Declarations that can never validate
//! correctly (a required parameter with a default, a pattern that does not
//! compile, contradictory numeric bounds, a path capture with no matching
//! parameter) fail at construction with a [`SpecError`] instead of surfacing
//! per request.
//!
//! ## Example
//!
//! ```rust
//! use http::Method;
//! use paramgate::spec::{ParameterSpec, RouteDef};
//!
//! # fn main() -> Result<(), paramgate::spec::SpecError> {
//! let route = RouteDef::new(
//!     Method::GET,
//!     "/items/{item_id}",
//!     "read_item",
//!     vec![
//!         ParameterSpec::path("item_id").integer().ge(0).le(1000).finish()?,
//!         ParameterSpec::query("q")
//!             .string()
//!             .min_length(3)
//!             .max_length(50)
//!             .alias("item-query")
//!             .optional()
//!             .finish()?,
//!     ],
//! )?;
//! assert_eq!(route.params.len(), 2);
//! # Ok(())
//! # }
//! ```

mod build;
mod types;

pub(crate) use build::{parse_template, TemplateSegment};

pub use build::{ParameterSpecBuilder, SpecError};
pub use types::{
    NumericConstraints, ParameterKind, ParameterLocation, ParameterSpec, Pattern, RouteDef,
    StringConstraints,
};
