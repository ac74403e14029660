// Router port used by the registry, plus an in-memory implementation

use crate::error::{Result, RouteError};
use crate::model::RouteDefinition;
use crate::path::path_matches;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Disposal token for one added route. Not `Clone`: a route can only be
/// removed once, by whoever holds the handle.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct RouteHandle(u64);

impl RouteHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

pub trait Router {
    /// Is a route with this name registered anywhere in the route tree?
    fn has_route(&self, name: &str) -> bool;
    fn add_route(&mut self, route: RouteDefinition) -> Result<RouteHandle>;
    fn remove_route(&mut self, handle: RouteHandle);
}

#[derive(Debug, Default)]
pub struct MemoryRouter {
    static_routes: Vec<RouteDefinition>,
    dynamic_routes: BTreeMap<u64, RouteDefinition>,
    next_id: u64,
}

impl MemoryRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route that lives for the router's whole lifetime (login page,
    /// error pages).
    pub fn with_static_route(mut self, route: RouteDefinition) -> Self {
        self.static_routes.push(route);
        self
    }

    pub fn routes(&self) -> impl Iterator<Item = &RouteDefinition> {
        self.static_routes.iter().chain(self.dynamic_routes.values())
    }

    pub fn dynamic_routes(&self) -> impl Iterator<Item = &RouteDefinition> {
        self.dynamic_routes.values()
    }

    pub fn dynamic_count(&self) -> usize {
        self.dynamic_routes.len()
    }

    /// Every named route currently known, static and dynamic.
    pub fn route_names(&self) -> BTreeSet<String> {
        self.routes()
            .flat_map(|r| r.names())
            .map(str::to_string)
            .collect()
    }

    /// Chain of routes, outermost first, whose leaf matches `path`.
    pub fn resolve(&self, path: &str) -> Option<Vec<&RouteDefinition>> {
        self.routes().find_map(|route| resolve_in(route, path))
    }
}

fn resolve_in<'a>(route: &'a RouteDefinition, path: &str) -> Option<Vec<&'a RouteDefinition>> {
    if let Some(mut chain) = route.children.iter().find_map(|c| resolve_in(c, path)) {
        chain.insert(0, route);
        return Some(chain);
    }

    if route.children.is_empty() && path_matches(&route.path, path) {
        return Some(vec![route]);
    }

    None
}

impl Router for MemoryRouter {
    fn has_route(&self, name: &str) -> bool {
        self.routes().any(|r| r.names().contains(&name))
    }

    fn add_route(&mut self, route: RouteDefinition) -> Result<RouteHandle> {
        {
            let mut incoming = HashSet::new();
            for name in route.names() {
                if !incoming.insert(name) || self.has_route(name) {
                    return Err(RouteError::DuplicateRoute(name.to_string()));
                }
            }
        }

        let id = self.next_id;
        self.next_id += 1;
        self.dynamic_routes.insert(id, route);
        Ok(RouteHandle::new(id))
    }

    fn remove_route(&mut self, handle: RouteHandle) {
        self.dynamic_routes.remove(&handle.id());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ComponentRef, MenuMeta};

    fn route(name: &str, path: &str, children: Vec<RouteDefinition>) -> RouteDefinition {
        RouteDefinition {
            name: name.to_string(),
            path: path.to_string(),
            component: Some(ComponentRef::View(path.to_string())),
            meta: MenuMeta::default(),
            children,
        }
    }

    #[test]
    fn test_add_and_remove() {
        let mut router = MemoryRouter::new();
        let handle = router
            .add_route(route("System", "/system", vec![route("User", "/system/user", vec![])]))
            .unwrap();

        assert!(router.has_route("System"));
        assert!(router.has_route("User"));

        router.remove_route(handle);
        assert!(!router.has_route("User"));
        assert_eq!(router.dynamic_count(), 0);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut router = MemoryRouter::new().with_static_route(route("Login", "/auth/login", vec![]));

        let err = router.add_route(route("Login", "/login", vec![])).unwrap_err();
        assert!(matches!(err, RouteError::DuplicateRoute(ref n) if n == "Login"));

        let err = router
            .add_route(route("A", "/a", vec![route("A", "/a/a", vec![])]))
            .unwrap_err();
        assert!(matches!(err, RouteError::DuplicateRoute(_)));
        assert_eq!(router.dynamic_count(), 0);
    }

    #[test]
    fn test_anonymous_routes_never_collide() {
        let mut router = MemoryRouter::new();
        router.add_route(route("", "/a", vec![route("A", "/a", vec![])])).unwrap();
        router.add_route(route("", "/b", vec![route("B", "/b", vec![])])).unwrap();

        assert_eq!(
            router.route_names(),
            BTreeSet::from(["A".to_string(), "B".to_string()])
        );
    }

    #[test]
    fn test_resolve_returns_chain() {
        let mut router = MemoryRouter::new();
        router
            .add_route(route(
                "",
                "/article",
                vec![route("ArticleDetail", "/article/:id", vec![])],
            ))
            .unwrap();

        let chain = router.resolve("/article/7").unwrap();
        let names: Vec<_> = chain.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["", "ArticleDetail"]);
        assert!(router.resolve("/missing").is_none());
    }
}
