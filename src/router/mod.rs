//! # Router Module
//!
//! Path-template matching for registered routes.
//!
//! Templates use `{name}` captures for single segments and `{name:path}` for
//! a greedy tail capture (`/files/{file_path:path}` matches
//! `/files/home/johndoe/notes.txt` with `file_path = "home/johndoe/notes.txt"`).
//!
//! ## Resolution order
//!
//! At every position, static segments are tried before parameter captures,
//! and a catch-all only matches when nothing more specific does. A literal
//! `/users/me` therefore always wins against `/users/{user_id}`, regardless
//! of registration order.
//!
//! ## Duplicate registrations
//!
//! Registering a second route for the same method and template is a
//! registration-time error by default ([`DuplicatePolicy::Reject`]);
//! [`DuplicatePolicy::Shadow`] keeps the first registration and drops the
//! duplicate with a warning instead.
//!
//! ## Example
//!
//! ```rust
//! use http::Method;
//! use paramgate::router::Router;
//! use paramgate::spec::{ParameterSpec, RouteDef};
//!
//! # fn main() -> Result<(), paramgate::spec::SpecError> {
//! let mut router = Router::new();
//! router.add(RouteDef::new(
//!     Method::GET,
//!     "/items/{item_id}",
//!     "read_item",
//!     vec![ParameterSpec::path("item_id").integer().finish()?],
//! )?)?;
//!
//! let m = router.route(Method::GET, "/items/3").expect("route should match");
//! assert_eq!(m.get_path_param("item_id"), Some("3"));
//! # Ok(())
//! # }
//! ```

mod core;
mod trie;

pub use self::core::{CaptureVec, DuplicatePolicy, RouteMatch, Router, MAX_INLINE_CAPTURES};
