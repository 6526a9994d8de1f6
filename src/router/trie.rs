use super::core::{CaptureVec, DuplicatePolicy};
use crate::spec::{RouteDef, SpecError, TemplateSegment};
use http::Method;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// One node of the segment trie.
///
/// Resolution order at each position is fixed: static children first, then
/// parameter children (in registration order), then the catch-all. This is
/// what makes a literal `/users/me` win against `/users/{user_id}` no matter
/// which was registered first.
#[derive(Debug, Default)]
pub(crate) struct Node {
    static_children: HashMap<String, Node>,
    param_children: Vec<ParamChild>,
    catch_all: Option<CatchAllChild>,
    routes: HashMap<Method, Arc<RouteDef>>,
}

/// A `{name}` child. Multiple parameter children with distinct names are
/// supported at the same position (`/users/{id}/posts` vs
/// `/users/{user_id}/comments`).
#[derive(Debug)]
struct ParamChild {
    name: Arc<str>,
    node: Node,
}

/// A `{name:path}` child; terminal by construction, so it carries its route
/// table directly.
#[derive(Debug)]
struct CatchAllChild {
    name: Arc<str>,
    routes: HashMap<Method, Arc<RouteDef>>,
}

impl Node {
    /// Insert a route under this node. Returns `Ok(false)` when the route was
    /// dropped under [`DuplicatePolicy::Shadow`].
    pub(crate) fn insert(
        &mut self,
        segments: &[TemplateSegment],
        route: Arc<RouteDef>,
        policy: DuplicatePolicy,
    ) -> Result<bool, SpecError> {
        let Some((head, rest)) = segments.split_first() else {
            return insert_terminal(&mut self.routes, route, policy);
        };
        match head {
            TemplateSegment::Static(segment) => self
                .static_children
                .entry(segment.clone())
                .or_default()
                .insert(rest, route, policy),
            TemplateSegment::Param(name) => {
                if let Some(child) = self
                    .param_children
                    .iter_mut()
                    .find(|c| c.name.as_ref() == name)
                {
                    return child.node.insert(rest, route, policy);
                }
                let mut child = ParamChild {
                    name: Arc::from(name.as_str()),
                    node: Node::default(),
                };
                let inserted = child.node.insert(rest, route, policy)?;
                self.param_children.push(child);
                Ok(inserted)
            }
            TemplateSegment::CatchAll(name) => match &mut self.catch_all {
                Some(child) if child.name.as_ref() == name => {
                    insert_terminal(&mut child.routes, route, policy)
                }
                Some(child) => {
                    // Two catch-alls at the same position differ only in
                    // capture name; they would match the same requests.
                    conflict(&child.routes, route, policy)
                }
                None => {
                    let mut child = CatchAllChild {
                        name: Arc::from(name.as_str()),
                        routes: HashMap::new(),
                    };
                    let inserted = insert_terminal(&mut child.routes, route, policy)?;
                    self.catch_all = Some(child);
                    Ok(inserted)
                }
            },
        }
    }

    /// Depth-first search with backtracking over parameter children.
    /// Captures are appended in match order and truncated on backtrack.
    pub(crate) fn search(
        &self,
        segments: &[&str],
        method: &Method,
        captures: &mut CaptureVec,
    ) -> Option<Arc<RouteDef>> {
        let Some((segment, rest)) = segments.split_first() else {
            if let Some(route) = self.routes.get(method) {
                return Some(Arc::clone(route));
            }
            // A catch-all may match an empty remainder (`/files/`).
            if let Some(child) = &self.catch_all {
                if let Some(route) = child.routes.get(method) {
                    captures.push((Arc::clone(&child.name), String::new()));
                    return Some(Arc::clone(route));
                }
            }
            return None;
        };

        if let Some(child) = self.static_children.get(*segment) {
            if let Some(route) = child.search(rest, method, captures) {
                return Some(route);
            }
        }

        for child in &self.param_children {
            let depth = captures.len();
            captures.push((Arc::clone(&child.name), (*segment).to_string()));
            if let Some(route) = child.node.search(rest, method, captures) {
                return Some(route);
            }
            captures.truncate(depth);
        }

        if let Some(child) = &self.catch_all {
            if let Some(route) = child.routes.get(method) {
                captures.push((Arc::clone(&child.name), segments.join("/")));
                return Some(Arc::clone(route));
            }
        }

        None
    }
}

fn insert_terminal(
    routes: &mut HashMap<Method, Arc<RouteDef>>,
    route: Arc<RouteDef>,
    policy: DuplicatePolicy,
) -> Result<bool, SpecError> {
    match routes.entry(route.method.clone()) {
        Entry::Occupied(existing) => shadow_or_reject(existing.get(), route, policy),
        Entry::Vacant(slot) => {
            slot.insert(route);
            Ok(true)
        }
    }
}

fn conflict(
    routes: &HashMap<Method, Arc<RouteDef>>,
    route: Arc<RouteDef>,
    policy: DuplicatePolicy,
) -> Result<bool, SpecError> {
    match routes.get(&route.method) {
        Some(existing) => shadow_or_reject(existing, route, policy),
        // Same position, different method: no overlap, but we keep a single
        // catch-all name per node, so reject outright.
        None => Err(SpecError::RouteConflict {
            method: route.method.clone(),
            pattern: route.path_pattern.clone(),
            existing: routes
                .values()
                .next()
                .map(|r| r.name.clone())
                .unwrap_or_default(),
        }),
    }
}

fn shadow_or_reject(
    existing: &Arc<RouteDef>,
    route: Arc<RouteDef>,
    policy: DuplicatePolicy,
) -> Result<bool, SpecError> {
    match policy {
        DuplicatePolicy::Reject => Err(SpecError::RouteConflict {
            method: route.method.clone(),
            pattern: route.path_pattern.clone(),
            existing: existing.name.clone(),
        }),
        DuplicatePolicy::Shadow => {
            warn!(
                method = %route.method,
                pattern = %route.path_pattern,
                existing = %existing.name,
                shadowed = %route.name,
                "duplicate route registration dropped; the later handler is unreachable"
            );
            Ok(false)
        }
    }
}
