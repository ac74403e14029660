use crate::error::{Result, RouteError};
use crate::processor::AppMode;
use menuroute_fetch::MENU_LIST_PATH;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

pub const DEFAULT_STATE_DIR: &str = "~/.config/menuroute/";
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const SESSION_FILE_NAME: &str = "session.json";
pub const MENU_FILE_NAME: &str = "menus.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    pub mode: AppMode,
    pub api_base_url: String,
    pub menu_endpoint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    pub timeout_secs: u64,
    pub state_dir: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            mode: AppMode::Frontend,
            api_base_url: "http://127.0.0.1:3000".to_string(),
            menu_endpoint: MENU_LIST_PATH.to_string(),
            access_token: None,
            timeout_secs: 10,
            state_dir: DEFAULT_STATE_DIR.to_string(),
        }
    }
}

impl MenuConfig {
    /// Read a config file; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Apply `MENUROUTE_*` environment variables on top of the current values.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|key| env::var(key).ok())
    }

    /// Same as [`with_env_overrides`](Self::with_env_overrides) with an
    /// injectable lookup.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(mode) = lookup("MENUROUTE_MODE") {
            self.mode = mode.parse()?;
        }
        if let Some(url) = lookup("MENUROUTE_API_BASE_URL") {
            self.api_base_url = url;
        }
        if let Some(token) = lookup("MENUROUTE_ACCESS_TOKEN") {
            self.access_token = Some(token).filter(|t| !t.is_empty());
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.api_base_url).map_err(|e| {
            RouteError::Config(format!("api_base_url '{}': {}", self.api_base_url, e))
        })?;
        if self.timeout_secs == 0 {
            return Err(RouteError::Config("timeout_secs must be positive".to_string()));
        }
        Ok(())
    }

    pub fn state_dir(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.state_dir).as_ref())
    }

    pub fn session_file(&self) -> PathBuf {
        self.state_dir().join(SESSION_FILE_NAME)
    }

    pub fn menu_file(&self) -> PathBuf {
        self.state_dir().join(MENU_FILE_NAME)
    }
}
