// Role-based menu filtering and dead-branch pruning

use crate::model::{LAYOUT_COMPONENT, MenuMeta, MenuNode, RoleCode};
use tracing::debug;

/// A node is visible when it requires no roles or shares at least one role
/// with the caller.
pub fn has_role_access(meta: &MenuMeta, roles: &[RoleCode]) -> bool {
    meta.is_public() || meta.required_roles().iter().any(|role| roles.contains(role))
}

/// Keep only the nodes the caller's roles may see. A denied node takes its
/// whole subtree with it; children of a visible node are filtered on their
/// own.
pub fn filter_menu_by_roles(nodes: &[MenuNode], roles: &[RoleCode]) -> Vec<MenuNode> {
    nodes
        .iter()
        .filter(|node| has_role_access(&node.meta, roles))
        .map(|node| {
            if node.has_children() {
                let mut item = node.clone_without_children();
                item.children = Some(filter_menu_by_roles(node.children(), roles));
                item
            } else {
                node.clone()
            }
        })
        .collect()
}

/// Why a node survives pruning. Checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetainReason {
    /// The node declared a `children` key, even an empty one.
    Directory,
    /// External link or iframe page.
    Embedded,
    /// The node renders a real view.
    Component,
}

pub fn retain_reason(node: &MenuNode) -> Option<RetainReason> {
    if node.declares_children() {
        return Some(RetainReason::Directory);
    }

    if node.meta.is_iframe || node.is_external_link() {
        return Some(RetainReason::Embedded);
    }

    match node.component.as_deref() {
        Some(component) if !component.is_empty() && component != LAYOUT_COMPONENT => {
            Some(RetainReason::Component)
        }
        _ => None,
    }
}

/// Drop entries that have nothing left to show once filtering is done.
/// Children are pruned first, then the node itself is judged by
/// [`retain_reason`].
pub fn filter_empty_menus(nodes: &[MenuNode]) -> Vec<MenuNode> {
    nodes
        .iter()
        .map(|node| {
            if node.has_children() {
                let mut item = node.clone_without_children();
                item.children = Some(filter_empty_menus(node.children()));
                item
            } else {
                node.clone()
            }
        })
        .filter(|node| {
            let keep = retain_reason(node).is_some();
            if !keep {
                debug!("Pruning empty menu entry {}", node.display_name());
            }
            keep
        })
        .collect()
}
