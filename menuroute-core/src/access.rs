// Navigation and button-level permission checks against the user's menu tree

use crate::model::{MenuMeta, MenuNode};
use crate::path::{is_external_link, path_matches};

/// Paths every user may reach regardless of menu permissions.
pub const DEFAULT_STATIC_PATHS: &[&str] = &[
    "/",
    "/auth/login",
    "/auth/register",
    "/auth/forget-password",
    "/exception/403",
    "/exception/404",
    "/exception/500",
];

/// Answers whether a navigation target is part of the user's menu.
#[derive(Debug, Clone)]
pub struct RoutePermissionValidator {
    menu_paths: Vec<String>,
    static_paths: Vec<String>,
}

impl RoutePermissionValidator {
    /// Build from a normalized menu tree.
    pub fn from_menus(menus: &[MenuNode]) -> Self {
        Self {
            menu_paths: collect_menu_paths(menus),
            static_paths: DEFAULT_STATIC_PATHS.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn with_static_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.static_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_path_allowed(&self, target: &str) -> bool {
        self.static_paths
            .iter()
            .chain(&self.menu_paths)
            .any(|pattern| path_matches(pattern, target))
    }
}

/// Every internal path in the tree, parents before children.
pub fn collect_menu_paths(menus: &[MenuNode]) -> Vec<String> {
    let mut paths = Vec::new();
    collect_into(menus, &mut paths);
    paths
}

fn collect_into(menus: &[MenuNode], out: &mut Vec<String>) {
    for menu in menus {
        if !menu.path.is_empty() && !is_external_link(&menu.path) && !out.contains(&menu.path) {
            out.push(menu.path.clone());
        }
        collect_into(menu.children(), out);
    }
}

/// Button-level check: does the current route grant `mark`?
pub fn has_auth_mark(meta: &MenuMeta, mark: &str) -> bool {
    meta.auth_list.iter().any(|item| item.auth_mark == mark)
}
