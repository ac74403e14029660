// Shared fixtures for the integration tests

#![allow(dead_code)]

use menuroute_core::MenuNode;
use menuroute_core::component::ComponentLoader;
use menuroute_core::iframe::IframeRouteManager;
use menuroute_core::model::LAYOUT_COMPONENT;
use menuroute_core::registry::RouteRegistry;
use menuroute_core::router::MemoryRouter;
use menuroute_core::transform::RouteTransformer;
use std::sync::Arc;

pub fn roles(list: &[&str]) -> Vec<String> {
    list.iter().map(|r| r.to_string()).collect()
}

/// Admin-dashboard style menu: a public dashboard, a role-gated system
/// section, a result section, and an iframe page.
pub fn sample_menus() -> Vec<MenuNode> {
    vec![
        MenuNode::new("Dashboard", "/dashboard")
            .with_id(1)
            .with_component(LAYOUT_COMPONENT)
            .with_children(vec![
                MenuNode::new("Console", "console")
                    .with_id(11)
                    .with_component("/dashboard/console"),
            ]),
        MenuNode::new("System", "/system")
            .with_id(2)
            .with_component(LAYOUT_COMPONENT)
            .with_roles(["R_SUPER", "R_ADMIN"])
            .with_children(vec![
                MenuNode::new("User", "user")
                    .with_id(21)
                    .with_component("/system/user")
                    .with_roles(["R_SUPER", "R_ADMIN"]),
                MenuNode::new("Role", "role")
                    .with_id(22)
                    .with_component("/system/role")
                    .with_roles(["R_SUPER"]),
            ]),
        MenuNode::new("Result", "/result")
            .with_id(3)
            .with_component(LAYOUT_COMPONENT)
            .with_children(vec![
                MenuNode::new("ResultSuccess", "success")
                    .with_id(31)
                    .with_component("/result/success")
                    .with_roles(["R_SUPER"]),
            ]),
        MenuNode::new("ErrorDashboard", "/error-dashboard")
            .with_id(5)
            .with_component("/error-dashboard"),
        MenuNode::new("Docs", "/outside/iframe/docs")
            .with_id(6)
            .as_iframe()
            .with_link("https://example.com/docs"),
    ]
}

pub fn registry_from(
    router: MemoryRouter,
    iframes: Arc<IframeRouteManager>,
) -> RouteRegistry<MemoryRouter> {
    RouteRegistry::new(router, RouteTransformer::new(ComponentLoader::new(), iframes))
}

pub fn registry_on(router: MemoryRouter) -> RouteRegistry<MemoryRouter> {
    registry_from(router, Arc::new(IframeRouteManager::in_memory()))
}

pub fn registry_with(iframes: Arc<IframeRouteManager>) -> RouteRegistry<MemoryRouter> {
    registry_from(MemoryRouter::new(), iframes)
}

pub fn registry() -> RouteRegistry<MemoryRouter> {
    registry_on(MemoryRouter::new())
}
