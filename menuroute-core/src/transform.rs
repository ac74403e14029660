// Menu node -> route definition conversion

use crate::component::ComponentLoader;
use crate::iframe::IframeRouteManager;
use crate::model::{ComponentRef, MenuNode, RouteDefinition};
use crate::path::extract_first_segment;
use std::sync::Arc;

/// How a node is turned into a route. Computed once per node; earlier
/// variants take precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// `meta.isIframe` is set.
    Iframe,
    /// Top-level entry without children; needs a layout wrapper.
    FirstLevelLeaf,
    Normal,
}

impl RouteKind {
    pub fn classify(node: &MenuNode, depth: usize) -> Self {
        if node.meta.is_iframe {
            RouteKind::Iframe
        } else if depth == 0 && !node.has_children() {
            RouteKind::FirstLevelLeaf
        } else {
            RouteKind::Normal
        }
    }
}

pub struct RouteTransformer {
    loader: ComponentLoader,
    iframes: Arc<IframeRouteManager>,
}

impl RouteTransformer {
    pub fn new(loader: ComponentLoader, iframes: Arc<IframeRouteManager>) -> Self {
        Self { loader, iframes }
    }

    pub fn iframes(&self) -> &Arc<IframeRouteManager> {
        &self.iframes
    }

    /// Transform a top-level menu node.
    pub fn transform(&self, node: &MenuNode) -> RouteDefinition {
        self.transform_at(node, 0)
    }

    /// Transform `node` sitting `depth` levels below the top of the tree.
    ///
    /// Top-level iframes and top-level leaves are mounted inside an anonymous
    /// layout route at the first path segment; the node itself becomes that
    /// wrapper's only child and keeps its transformed children.
    pub fn transform_at(&self, node: &MenuNode, depth: usize) -> RouteDefinition {
        let children: Vec<RouteDefinition> = node
            .children()
            .iter()
            .map(|child| self.transform_at(child, depth + 1))
            .collect();

        match RouteKind::classify(node, depth) {
            RouteKind::Iframe => {
                self.iframes.add(node.clone());
                let route = route_for(node, Some(self.loader.load_iframe()), children);
                if depth == 0 {
                    self.wrap_in_layout(node, route)
                } else {
                    route
                }
            }
            RouteKind::FirstLevelLeaf => {
                let mut route = route_for(node, self.resolve(node), children);
                route.meta.is_first_level = true;
                self.wrap_in_layout(node, route)
            }
            RouteKind::Normal => route_for(node, self.resolve(node), children),
        }
    }

    fn resolve(&self, node: &MenuNode) -> Option<ComponentRef> {
        node.component.as_deref().and_then(|c| self.loader.load(c))
    }

    fn wrap_in_layout(&self, node: &MenuNode, inner: RouteDefinition) -> RouteDefinition {
        RouteDefinition {
            name: String::new(),
            path: extract_first_segment(&node.path),
            component: Some(self.loader.load_layout()),
            meta: inner.meta.clone(),
            children: vec![inner],
        }
    }
}

fn route_for(
    node: &MenuNode,
    component: Option<ComponentRef>,
    children: Vec<RouteDefinition>,
) -> RouteDefinition {
    RouteDefinition {
        name: node.name.clone().unwrap_or_default(),
        path: node.path.clone(),
        component,
        meta: node.meta.clone(),
        children,
    }
}
