use crate::spec::{parse_template, RouteDef, SpecError};
use http::Method;
use smallvec::SmallVec;
use std::sync::Arc;
use tracing::{debug, info};

use super::trie::Node;

/// Maximum number of path captures before heap allocation. Tutorial-scale
/// templates rarely exceed two (`/users/{user_id}/items/{item_id}`).
pub const MAX_INLINE_CAPTURES: usize = 8;

/// Stack-allocated capture storage for the match path.
///
/// Capture names come from the static route tree and are shared as
/// `Arc<str>`; values are per-request data from the URL and stay `String`.
pub type CaptureVec = SmallVec<[(Arc<str>, String); MAX_INLINE_CAPTURES]>;

/// What to do when a second route is registered for the same method and
/// path template.
///
/// The source material this library grew out of silently kept the first
/// registration and left the second permanently unreachable. `Reject` makes
/// that a registration-time error instead; `Shadow` reproduces the legacy
/// first-wins behavior with a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    #[default]
    Reject,
    Shadow,
}

/// Result of successfully matching a request path to a route.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The matched route definition (Arc to avoid cloning the parameter set)
    pub route: Arc<RouteDef>,
    /// Raw path captures in match order, e.g. `{item_id}` -> `("item_id", "3")`
    pub path_params: CaptureVec,
}

impl RouteMatch {
    /// Get a raw path capture by name.
    ///
    /// Uses "last write wins" semantics: with duplicate capture names at
    /// different depths the deepest occurrence is returned.
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Matches incoming method + path pairs against registered route templates.
///
/// Matching uses a segment trie with a fixed resolution order per position:
/// static segments, then `{name}` captures, then a `{name:path}` catch-all.
/// Registration order never affects which route a request resolves to; it
/// only decides which duplicate survives under [`DuplicatePolicy::Shadow`].
///
/// After registration the router is read-only and can serve matches from any
/// number of threads concurrently.
#[derive(Debug, Default)]
pub struct Router {
    root: Node,
    policy: DuplicatePolicy,
    routes: Vec<Arc<RouteDef>>,
}

impl Router {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Router {
            policy,
            ..Self::default()
        }
    }

    /// Register one route.
    ///
    /// Fails with [`SpecError::RouteConflict`] under the default
    /// [`DuplicatePolicy::Reject`] when a route for the same method and
    /// template already exists.
    pub fn add(&mut self, route: RouteDef) -> Result<(), SpecError> {
        let segments = parse_template(&route.path_pattern)?;
        let route = Arc::new(route);
        let inserted = self.root.insert(&segments, Arc::clone(&route), self.policy)?;
        if inserted {
            info!(
                method = %route.method,
                pattern = %route.path_pattern,
                handler = %route.name,
                params = route.params.len(),
                "route registered"
            );
            self.routes.push(route);
        }
        Ok(())
    }

    /// Register several routes, stopping at the first registration error.
    pub fn add_all(&mut self, routes: impl IntoIterator<Item = RouteDef>) -> Result<(), SpecError> {
        for route in routes {
            self.add(route)?;
        }
        Ok(())
    }

    /// Match a request path, returning the route and its raw path captures.
    #[must_use]
    pub fn route(&self, method: Method, path: &str) -> Option<RouteMatch> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let mut captures = CaptureVec::new();
        match self.root.search(&segments, &method, &mut captures) {
            Some(route) => {
                debug!(
                    method = %method,
                    path = %path,
                    handler = %route.name,
                    pattern = %route.path_pattern,
                    path_params = ?captures,
                    "route matched"
                );
                Some(RouteMatch {
                    route,
                    path_params: captures,
                })
            }
            None => {
                debug!(method = %method, path = %path, "no route matched");
                None
            }
        }
    }

    /// Number of reachable registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Routes in registration order (shadowed duplicates excluded).
    pub fn routes(&self) -> impl Iterator<Item = &Arc<RouteDef>> {
        self.routes.iter()
    }

    /// Print the routing table to stdout, with the documented parameters of
    /// each route. Hidden parameters are omitted, which is the one place
    /// `include_in_docs` matters.
    pub fn dump_routes(&self) {
        println!("[routes] count={}", self.routes.len());
        for route in &self.routes {
            println!("[route] {} {} -> {}", route.method, route.path_pattern, route.name);
            for param in route.documented_params() {
                let mut notes = Vec::new();
                if !param.required {
                    notes.push("optional".to_string());
                }
                if param.deprecated {
                    notes.push("deprecated".to_string());
                }
                if let Some(alias) = &param.alias {
                    notes.push(format!("alias={alias}"));
                }
                let suffix = if notes.is_empty() {
                    String::new()
                } else {
                    format!(" ({})", notes.join(", "))
                };
                println!(
                    "[param]   {} in={} kind={}{}",
                    param.name,
                    param.location,
                    param.kind.expected(),
                    suffix
                );
            }
        }
    }
}
