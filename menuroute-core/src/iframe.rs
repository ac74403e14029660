use crate::error::Result;
use crate::model::MenuNode;
use crate::session::{MemorySessionStore, SessionStore};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, error};

/// Storage key the registry is saved under.
pub const IFRAME_ROUTES_KEY: &str = "iframeRoutes";

/// Registry of iframe-flagged menu entries met during route transformation.
///
/// One instance is owned by the application root and shared with the
/// transformer. The list is saved to the session store so the iframe pages
/// can be restored after a reload.
pub struct IframeRouteManager {
    routes: RwLock<Vec<MenuNode>>,
    store: Arc<dyn SessionStore>,
}

impl IframeRouteManager {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            routes: RwLock::new(Vec::new()),
            store,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStore::new()))
    }

    /// Record an iframe route. The first entry for a path wins.
    pub fn add(&self, route: MenuNode) {
        let mut routes = self.routes.write().unwrap_or_else(PoisonError::into_inner);
        if !routes.iter().any(|r| r.path == route.path) {
            debug!("Recording iframe route {}", route.path);
            routes.push(route);
        }
    }

    pub fn get_all(&self) -> Vec<MenuNode> {
        self.routes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn find_by_path(&self, path: &str) -> Option<MenuNode> {
        self.routes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|r| r.path == path)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.routes.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keep only the first `len` entries, dropping anything recorded after.
    pub fn truncate(&self, len: usize) {
        self.routes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .truncate(len);
    }

    /// Forget every entry held in memory. The saved copy is left alone.
    pub fn clear(&self) {
        self.routes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Write the current list to the session store. Nothing is written
    /// while the list is empty.
    pub fn save(&self) -> Result<()> {
        let routes = self.get_all();
        if routes.is_empty() {
            return Ok(());
        }
        self.store
            .set(IFRAME_ROUTES_KEY, serde_json::to_string(&routes)?)
    }

    /// Replace the in-memory list with the saved one, returning how many
    /// entries were restored. A corrupt or unreadable copy resets the list.
    pub fn load(&self) -> usize {
        let restored = match self.store.get(IFRAME_ROUTES_KEY) {
            Ok(Some(data)) => match serde_json::from_str::<Vec<MenuNode>>(&data) {
                Ok(routes) => Some(routes),
                Err(e) => {
                    error!("Failed to load iframe routes: {}", e);
                    Some(Vec::new())
                }
            },
            Ok(None) => None,
            Err(e) => {
                error!("Failed to load iframe routes: {}", e);
                Some(Vec::new())
            }
        };

        let mut routes = self.routes.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(restored) = restored {
            *routes = restored;
        }
        routes.len()
    }

    /// Drop the saved copy from the session store.
    pub fn discard_saved(&self) -> Result<()> {
        self.store.remove(IFRAME_ROUTES_KEY)
    }
}
