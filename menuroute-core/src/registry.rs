use crate::error::{Result, RouteError};
use crate::model::MenuNode;
use crate::path::drop_empty_paths;
use crate::router::{RouteHandle, Router};
use crate::transform::RouteTransformer;
use crate::validate::RouteValidator;
use tracing::{debug, info, warn};

/// Registers menu-derived routes on a router and keeps the handles needed
/// to take them down again.
///
/// State goes `idle -> registered -> idle`; a second `register` while
/// registered is a logged no-op.
pub struct RouteRegistry<R: Router> {
    router: R,
    validator: RouteValidator,
    transformer: RouteTransformer,
    handles: Vec<RouteHandle>,
    registered: bool,
}

impl<R: Router> RouteRegistry<R> {
    pub fn new(router: R, transformer: RouteTransformer) -> Self {
        Self {
            router,
            validator: RouteValidator::new(),
            transformer,
            handles: Vec::new(),
            registered: false,
        }
    }

    /// Validate and add one route per named top-level menu. Entries with an
    /// empty path are dropped first, at any depth.
    pub fn register(&mut self, menus: &[MenuNode]) -> Result<()> {
        if self.registered {
            warn!("Routes already registered, skipping duplicate registration");
            return Ok(());
        }

        let menus = drop_empty_paths(menus);
        let validation = self.validator.validate(&menus);
        if !validation.valid {
            return Err(RouteError::InvalidMenu(validation.errors));
        }

        let iframes_before = self.transformer.iframes().len();
        let mut handles = Vec::new();
        for menu in &menus {
            let Some(name) = menu.name.as_deref().filter(|n| !n.is_empty()) else {
                continue;
            };
            if self.router.has_route(name) {
                debug!("Route {} already known to the router, skipping", name);
                continue;
            }

            let route = self.transformer.transform(menu);
            match self.router.add_route(route) {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    // Leave the router and iframe list as they were before this attempt
                    for handle in handles.into_iter().rev() {
                        self.router.remove_route(handle);
                    }
                    self.transformer.iframes().truncate(iframes_before);
                    return Err(e);
                }
            }
        }

        info!("Registered {} dynamic routes", handles.len());
        self.handles = handles;
        self.registered = true;
        Ok(())
    }

    /// Remove every route added by the last `register`. Safe when idle.
    pub fn unregister(&mut self) {
        let handles = std::mem::take(&mut self.handles);
        if !handles.is_empty() {
            info!("Removing {} dynamic routes", handles.len());
        }
        for handle in handles {
            self.router.remove_route(handle);
        }
        self.registered = false;
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }

    /// Flag the registry as registered without adding anything, so a failed
    /// menu fetch is not retried on every guarded navigation.
    pub fn mark_as_registered(&mut self) {
        self.registered = true;
    }

    pub fn registered_count(&self) -> usize {
        self.handles.len()
    }

    pub fn router(&self) -> &R {
        &self.router
    }
}
