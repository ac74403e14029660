use crate::model::MenuNode;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Structural checks run on a menu list before anything touches the router.
/// Every defect is collected; nothing is raised here.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteValidator;

impl RouteValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, nodes: &[MenuNode]) -> ValidationResult {
        let mut errors = Vec::new();

        if nodes.is_empty() {
            errors.push("menu list is empty".to_string());
        }

        let mut seen = HashSet::new();
        let mut duplicates = HashSet::new();
        check_nodes(nodes, &mut seen, &mut duplicates, &mut errors);

        ValidationResult {
            valid: errors.is_empty(),
            errors,
        }
    }
}

fn check_nodes<'a>(
    nodes: &'a [MenuNode],
    seen: &mut HashSet<&'a str>,
    duplicates: &mut HashSet<&'a str>,
    errors: &mut Vec<String>,
) {
    for node in nodes {
        if node.path.is_empty() {
            errors.push(format!("route '{}' has no path", node.display_name()));
        }

        if let Some(name) = node.name.as_deref().filter(|n| !n.is_empty())
            && !seen.insert(name)
            && duplicates.insert(name)
        {
            errors.push(format!("route name '{}' is declared more than once", name));
        }

        if !node.declares_children()
            && !node.meta.is_iframe
            && !node.is_external_link()
            && node.component.as_deref().is_none_or(str::is_empty)
        {
            errors.push(format!(
                "route '{}' declares neither children nor a component",
                node.display_name()
            ));
        }

        check_nodes(node.children(), seen, duplicates, errors);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_is_invalid() {
        let result = RouteValidator::new().validate(&[]);
        assert!(!result.valid);
        assert_eq!(result.errors, vec!["menu list is empty".to_string()]);
    }

    #[test]
    fn test_valid_tree() {
        let menus = vec![
            MenuNode::new("A", "/a").with_children(vec![]),
            MenuNode::new("Dashboard", "/dashboard").with_component("/dashboard/console"),
        ];
        let result = RouteValidator::new().validate(&menus);
        assert!(result.valid, "{:?}", result.errors);
    }

    #[test]
    fn test_all_defects_reported_together() {
        let menus = vec![
            MenuNode::new("A", "").with_component("/a"),
            MenuNode::new("B", "/b").with_children(vec![
                MenuNode::new("A", "/b/a").with_component("/b/a"),
                MenuNode::new("A", "/b/a2").with_component("/b/a2"),
                MenuNode::new("Bare", "/b/bare"),
            ]),
        ];
        let result = RouteValidator::new().validate(&menus);

        assert!(!result.valid);
        assert_eq!(result.errors.len(), 3);
        assert!(result.errors[0].contains("has no path"));
        assert!(result.errors[1].contains("'A' is declared more than once"));
        assert!(result.errors[2].contains("'Bare'"));
    }
}
