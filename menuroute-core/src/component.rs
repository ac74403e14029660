use crate::model::{ComponentRef, LAYOUT_COMPONENT};
use std::collections::HashSet;
use tracing::warn;

/// Resolves the component strings declared on menu entries.
///
/// Without a catalog every key is trusted. With one, keys that name no
/// known view resolve to nothing and a warning is logged.
#[derive(Debug, Clone, Default)]
pub struct ComponentLoader {
    catalog: Option<HashSet<String>>,
}

impl ComponentLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog<I, S>(views: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            catalog: Some(views.into_iter().map(|v| view_key(v.as_ref())).collect()),
        }
    }

    pub fn load_layout(&self) -> ComponentRef {
        ComponentRef::Layout
    }

    pub fn load_iframe(&self) -> ComponentRef {
        ComponentRef::Iframe
    }

    pub fn load(&self, component: &str) -> Option<ComponentRef> {
        let component = component.trim();
        if component.is_empty() {
            return None;
        }

        if component == LAYOUT_COMPONENT {
            return Some(self.load_layout());
        }

        let key = view_key(component);
        match self.catalog {
            Some(ref catalog) if !catalog.contains(&key) => {
                warn!("No view found for component {}", component);
                None
            }
            _ => Some(ComponentRef::View(key)),
        }
    }
}

/// `system/user/` and `/system/user` name the same view.
fn view_key(component: &str) -> String {
    let trimmed = component.trim().trim_matches('/');
    format!("/{}", trimmed)
}
