// Menu source selection and the filter -> prune -> lint -> normalize pipeline

use crate::error::{Result, RouteError};
use crate::filter::{filter_empty_menus, filter_menu_by_roles};
use crate::model::{MenuNode, RoleCode};
use crate::path::{normalize_menu_paths, validate_menu_paths};
use menuroute_fetch::MenuClient;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::str::FromStr;
use tracing::{debug, info};

/// Who decides what the menu contains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppMode {
    /// Statically declared menus, filtered client-side by role.
    #[default]
    Frontend,
    /// Menus fetched from the backend, already filtered server-side.
    Backend,
}

impl FromStr for AppMode {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "frontend" => Ok(AppMode::Frontend),
            "backend" => Ok(AppMode::Backend),
            other => Err(RouteError::Config(format!("unknown mode '{}'", other))),
        }
    }
}

impl fmt::Display for AppMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppMode::Frontend => f.write_str("frontend"),
            AppMode::Backend => f.write_str("backend"),
        }
    }
}

/// Where backend-mode menus come from.
pub trait MenuSource {
    fn fetch_menu_list(&self) -> impl Future<Output = Result<Vec<MenuNode>>> + Send;
}

impl MenuSource for MenuClient {
    async fn fetch_menu_list(&self) -> Result<Vec<MenuNode>> {
        Ok(self.fetch_menus::<MenuNode>().await?)
    }
}

/// A menu list held in memory, e.g. a saved backend response.
#[derive(Debug, Clone, Default)]
pub struct FixedMenuSource(pub Vec<MenuNode>);

impl MenuSource for FixedMenuSource {
    async fn fetch_menu_list(&self) -> Result<Vec<MenuNode>> {
        Ok(self.0.clone())
    }
}

pub struct MenuProcessor<S> {
    mode: AppMode,
    static_menus: Vec<MenuNode>,
    source: S,
}

impl MenuProcessor<FixedMenuSource> {
    /// Frontend-mode processor over a statically declared menu list.
    pub fn frontend(static_menus: Vec<MenuNode>) -> Self {
        Self::new(AppMode::Frontend, FixedMenuSource::default()).with_static_menus(static_menus)
    }
}

impl<S: MenuSource> MenuProcessor<S> {
    pub fn new(mode: AppMode, source: S) -> Self {
        Self {
            mode,
            static_menus: Vec::new(),
            source,
        }
    }

    pub fn with_static_menus(mut self, menus: Vec<MenuNode>) -> Self {
        self.static_menus = menus;
        self
    }

    /// Produce the menu tree the router should receive for a user holding
    /// `roles`. The path lint runs on the pre-normalization tree so that
    /// reported paths are the ones a developer wrote.
    pub async fn get_menu_list(&self, roles: &[RoleCode]) -> Result<Vec<MenuNode>> {
        let menu_list = match self.mode {
            AppMode::Frontend => self.process_frontend_menu(roles),
            AppMode::Backend => self.process_backend_menu().await?,
        };

        let violations = validate_menu_paths(&menu_list);
        if !violations.is_empty() {
            debug!("{} menu path violations found", violations.len());
        }

        Ok(normalize_menu_paths(&menu_list, ""))
    }

    /// Role filtering is skipped when no roles are known.
    pub fn process_frontend_menu(&self, roles: &[RoleCode]) -> Vec<MenuNode> {
        let menu_list = if roles.is_empty() {
            self.static_menus.clone()
        } else {
            filter_menu_by_roles(&self.static_menus, roles)
        };
        filter_empty_menus(&menu_list)
    }

    /// The backend already filtered by role; only pruning is applied.
    pub async fn process_backend_menu(&self) -> Result<Vec<MenuNode>> {
        let list = self.source.fetch_menu_list().await?;
        info!("Fetched {} top-level menu entries", list.len());
        Ok(filter_empty_menus(&list))
    }
}
