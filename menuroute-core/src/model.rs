// Menu tree as delivered by the backend or declared statically, and the
// route definitions derived from it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Component alias marking a pure container node (rendered by the layout).
pub const LAYOUT_COMPONENT: &str = "/index/index";

pub type RoleCode = String;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MenuId {
    Number(i64),
    Text(String),
}

impl fmt::Display for MenuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuId::Number(n) => write!(f, "{}", n),
            MenuId::Text(s) => f.write_str(s),
        }
    }
}

/// Button-level permission mark carried in `meta.authList`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthMark {
    #[serde(default)]
    pub title: String,
    pub auth_mark: String,
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Roles allowed to see the node. Absent or empty means public.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<RoleCode>>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_iframe: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_hide: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_hide_tab: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub keep_alive: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_full_page: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_first_level: bool,
    /// External link target; an entry with a link is kept even without a component.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub auth_list: Vec<AuthMark>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MenuMeta {
    pub fn required_roles(&self) -> &[RoleCode] {
        self.roles.as_deref().unwrap_or_default()
    }

    pub fn is_public(&self) -> bool {
        self.required_roles().is_empty()
    }

    pub fn has_link(&self) -> bool {
        self.link.as_deref().is_some_and(|l| !l.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<MenuId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(default)]
    pub meta: MenuMeta,
    /// `Some` (even when empty) marks a directory node; `None` a plain entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<MenuNode>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MenuNode {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(MenuId::Number(id));
        self
    }

    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<RoleCode>,
    {
        self.meta.roles = Some(roles.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_children(mut self, children: Vec<MenuNode>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.meta.title = Some(title.into());
        self
    }

    pub fn as_iframe(mut self) -> Self {
        self.meta.is_iframe = true;
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.meta.link = Some(link.into());
        self
    }

    /// True when the node carries the `children` key at all.
    pub fn declares_children(&self) -> bool {
        self.children.is_some()
    }

    /// True when the node has at least one child.
    pub fn has_children(&self) -> bool {
        self.children.as_ref().is_some_and(|c| !c.is_empty())
    }

    pub fn children(&self) -> &[MenuNode] {
        self.children.as_deref().unwrap_or_default()
    }

    pub fn is_external_link(&self) -> bool {
        self.meta.has_link()
    }

    /// Name used in diagnostics: route name, else path, else a placeholder.
    pub fn display_name(&self) -> String {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ if !self.path.is_empty() => self.path.clone(),
            _ => "unknown route".to_string(),
        }
    }

    /// Copy of the node with its children detached, used when the children
    /// are about to be replaced by a filtered or rewritten list.
    pub fn clone_without_children(&self) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            path: self.path.clone(),
            component: self.component.clone(),
            meta: self.meta.clone(),
            children: None,
            extra: self.extra.clone(),
        }
    }
}

/// Renderable unit a route points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "key", rename_all = "lowercase")]
pub enum ComponentRef {
    Layout,
    Iframe,
    View(String),
}

impl fmt::Display for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentRef::Layout => f.write_str("<layout>"),
            ComponentRef::Iframe => f.write_str("<iframe>"),
            ComponentRef::View(key) => f.write_str(key),
        }
    }
}

/// Router-native route produced by the transformer. Lives for one
/// registration epoch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDefinition {
    pub name: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<ComponentRef>,
    pub meta: MenuMeta,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteDefinition>,
}

impl RouteDefinition {
    /// Layout wrappers are registered without a name.
    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty()
    }

    /// Every non-empty route name in this tree, depth first.
    pub fn names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        collect_names(self, &mut names);
        names
    }
}

fn collect_names<'a>(route: &'a RouteDefinition, out: &mut Vec<&'a str>) {
    if !route.name.is_empty() {
        out.push(&route.name);
    }
    for child in &route.children {
        collect_names(child, out);
    }
}
