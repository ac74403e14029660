// Path normalization and the development-time path lint.

use crate::model::MenuNode;
use serde::Serialize;
use std::fmt;
use tracing::{debug, error};

/// Absolute child paths under this prefix are legal (iframe pages mounted
/// outside the layout).
pub const IFRAME_OUTSIDE_PREFIX: &str = "/outside/iframe/";

pub fn is_external_link(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}

/// Absolute forms a non-root menu node is allowed to declare.
pub fn is_valid_absolute_path(path: &str) -> bool {
    is_external_link(path) || path.starts_with(IFRAME_OUTSIDE_PREFIX)
}

/// Build the full path of a menu entry from its own fragment and the
/// parent's full path.
///
/// Empty fragments yield an empty string, external links and absolute
/// paths are returned unchanged, everything else is joined onto the
/// parent with a single `/`.
///
/// ```
/// use menuroute_core::path::build_full_path;
///
/// assert_eq!(build_full_path("user", "/system"), "/system/user");
/// assert_eq!(build_full_path("user", ""), "/user");
/// assert_eq!(build_full_path("/outside/iframe/x", "/system"), "/outside/iframe/x");
/// ```
pub fn build_full_path(path: &str, parent_path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }

    if is_external_link(path) || path.starts_with('/') {
        return path.to_string();
    }

    if !parent_path.is_empty() {
        let clean_parent = parent_path.strip_suffix('/').unwrap_or(parent_path);
        let clean_child = path.strip_prefix('/').unwrap_or(path);
        return format!("{}/{}", clean_parent, clean_child);
    }

    format!("/{}", path)
}

/// Rewrite every `path` in the tree to its full form. Children are resolved
/// against their parent's freshly computed path. Entries whose path resolves
/// to the empty string (a blank fragment) are dropped along with their subtree.
pub fn normalize_menu_paths(nodes: &[MenuNode], parent_path: &str) -> Vec<MenuNode> {
    nodes
        .iter()
        .filter_map(|node| {
            let full_path = build_full_path(&node.path, parent_path);
            if full_path.is_empty() {
                debug!("Dropping {} with an empty path", node.display_name());
                return None;
            }
            let mut item = node.clone_without_children();
            item.children = match node.children.as_deref() {
                Some(children) if !children.is_empty() => {
                    Some(normalize_menu_paths(children, &full_path))
                }
                other => other.map(<[MenuNode]>::to_vec),
            };
            item.path = full_path;
            Some(item)
        })
        .collect()
}

/// Remove entries with an empty `path` at any depth, leaving every other
/// field (including whether `children` was declared) untouched.
pub fn drop_empty_paths(nodes: &[MenuNode]) -> Vec<MenuNode> {
    nodes
        .iter()
        .filter_map(|node| {
            if node.path.is_empty() {
                debug!("Dropping {} with an empty path", node.display_name());
                return None;
            }
            let mut item = node.clone_without_children();
            item.children = node.children.as_deref().map(drop_empty_paths);
            Some(item)
        })
        .collect()
}

/// First `/`-delimited segment of a path, e.g. `/a/b/c` -> `/a`.
pub fn extract_first_segment(path: &str) -> String {
    match path.split('/').find(|s| !s.is_empty()) {
        Some(segment) => format!("/{}", segment),
        None => "/".to_string(),
    }
}

/// Does `pattern` (a route path, possibly with `:param` segments) match the
/// concrete `target` path? Query strings and fragments on the target are
/// ignored, as is a trailing slash on either side.
pub fn path_matches(pattern: &str, target: &str) -> bool {
    if is_external_link(pattern) {
        return false;
    }

    let target = target
        .split(['?', '#'])
        .next()
        .unwrap_or_default();

    let pattern_segments: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let target_segments: Vec<&str> = target.split('/').filter(|s| !s.is_empty()).collect();

    pattern_segments.len() == target_segments.len()
        && pattern_segments
            .iter()
            .zip(&target_segments)
            .all(|(p, t)| p.starts_with(':') || p == t)
}

/// A child menu entry that declares an absolute path where a relative
/// fragment is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathViolation {
    pub parent_name: String,
    pub route_name: String,
    pub title: String,
    pub path: String,
    /// Menu level of the offending entry (top level is 1).
    pub level: usize,
    pub suggested_path: String,
}

impl PathViolation {
    fn new(child: &MenuNode, parent_name: &str, level: usize) -> Self {
        let path = child.path.clone();
        let route_name = match child.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => path.clone(),
        };
        let title = child
            .meta
            .title
            .clone()
            .unwrap_or_else(|| route_name.clone());

        Self {
            parent_name: parent_name.to_string(),
            route_name,
            title,
            suggested_path: suggest_relative_path(&path),
            path,
            level,
        }
    }
}

impl fmt::Display for PathViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "menu \"{}\" (name: {}, path: {}) is misconfigured\n  \
             location: {} > {}\n  \
             problem: level {} menu paths must not start with '/'\n  \
             current: path: '{}'\n  \
             suggested: path: '{}'",
            self.title,
            self.route_name,
            self.path,
            self.parent_name,
            self.route_name,
            self.level,
            self.path,
            self.suggested_path
        )
    }
}

fn suggest_relative_path(path: &str) -> String {
    match path.rsplit('/').next() {
        Some(last) if !last.is_empty() => last.to_string(),
        _ => path.get(1..).unwrap_or_default().to_string(),
    }
}

/// Lint the raw (pre-normalization) tree for child entries that start with
/// `/`. Violations are logged and returned; they never block registration.
pub fn validate_menu_paths(nodes: &[MenuNode]) -> Vec<PathViolation> {
    let mut violations = Vec::new();
    collect_path_violations(nodes, 1, &mut violations);
    violations
}

fn collect_path_violations(nodes: &[MenuNode], level: usize, out: &mut Vec<PathViolation>) {
    for route in nodes {
        if !route.has_children() {
            continue;
        }

        let parent_name = route.display_name();
        for child in route.children() {
            if is_valid_absolute_path(&child.path) || !child.path.starts_with('/') {
                continue;
            }

            let violation = PathViolation::new(child, &parent_name, level + 1);
            error!("Route configuration error: {}", violation);
            out.push(violation);
        }

        collect_path_violations(route.children(), level + 1, out);
    }
}
