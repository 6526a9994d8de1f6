//! # paramgate
//!
//! **paramgate** is a declarative request-parameter validation and coercion
//! library for HTTP services, with a path-template matcher and a per-request
//! binder. Each parameter's shape (kind, presence, constraints, alias) is an
//! explicit, immutable spec built once at route registration; every incoming
//! request is checked uniformly against it and either yields a typed value
//! map or a structured, per-field error report.
//!
//! ## Architecture
//!
//! - **[`spec`]** - parameter and route declarations with registration-time
//!   invariant checks
//! - **[`validator`]** - presence/arity/coercion/constraint checking for one
//!   parameter, plus the error taxonomy and the 422-style wire shape
//! - **[`router`]** - segment-trie path matching with static-over-parameter
//!   resolution and an explicit duplicate-registration policy
//! - **[`request`]** - ordered query-string multimap (repeated keys preserved)
//! - **[`binder`]** - per-request aggregation: all field failures for one
//!   request are reported together, never only the first
//!
//! ## What stays outside
//!
//! paramgate does not open sockets, dispatch to business handlers, or emit
//! OpenAPI documents. The hosting server hands in the matched path target and
//! query string, and turns a [`Rejection`](validator::Rejection) into a wire
//! response (status 422, JSON body from
//! [`Rejection::to_body`](validator::Rejection::to_body)) or a
//! [`BoundParams`](binder::BoundParams) into a handler invocation.
//!
//! ## Quick start
//!
//! ```rust
//! use http::Method;
//! use paramgate::request::QueryMap;
//! use paramgate::router::Router;
//! use paramgate::spec::{ParameterSpec, RouteDef};
//!
//! # fn main() -> Result<(), paramgate::spec::SpecError> {
//! let mut router = Router::new();
//! router.add(RouteDef::new(
//!     Method::GET,
//!     "/items/{item_id}",
//!     "read_item",
//!     vec![
//!         ParameterSpec::path("item_id").integer().ge(0).le(1000).finish()?,
//!         ParameterSpec::query("skip").integer().default_value(0).finish()?,
//!         ParameterSpec::query("limit").integer().default_value(10).finish()?,
//!     ],
//! )?)?;
//!
//! let (path, query) = QueryMap::split_target("/items/3?skip=5");
//! let matched = router.route(Method::GET, path).expect("route should match");
//! let params = matched.bind(&query).expect("request should validate");
//!
//! assert_eq!(params.int("item_id"), Some(3));
//! assert_eq!(params.int("skip"), Some(5));
//! assert_eq!(params.int("limit"), Some(10)); // default
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency
//!
//! Specs and the routing table are immutable after registration, and
//! validation is a pure function of its inputs. Any number of requests can
//! be matched and bound in parallel with no locking.

pub mod binder;
pub mod request;
pub mod router;
pub mod spec;
pub mod validator;

pub use binder::{bind, BoundParams};
pub use request::QueryMap;
pub use router::{DuplicatePolicy, RouteMatch, Router};
pub use spec::{
    NumericConstraints, ParameterKind, ParameterLocation, ParameterSpec, RouteDef, SpecError,
    StringConstraints,
};
pub use validator::{validate, Bound, FieldIssue, ParamError, ParamValue, Rejection, StringFacet};
