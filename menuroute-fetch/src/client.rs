use crate::envelope::ApiEnvelope;
use crate::error::{FetchError, Result};
use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Endpoint serving the menu tree the current user may see.
pub const MENU_LIST_PATH: &str = "/api/v3/system/menus/simple";

/// Thin client for the admin backend. Every call unwraps the
/// `{code, msg, data}` envelope and hands back `data`.
pub struct MenuClient {
    client: Client,
    base_url: Url,
    menu_path: String,
    access_token: Option<String>,
}

impl MenuClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, 10)
    }

    pub fn with_timeout(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        let client = Client::builder()
            .user_agent(concat!("menuroute/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.div_ceil(2)))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self {
            client,
            base_url,
            menu_path: MENU_LIST_PATH.to_string(),
            access_token: None,
        })
    }

    pub fn with_menu_path(mut self, path: impl Into<String>) -> Self {
        self.menu_path = path.into();
        self
    }

    /// Token is sent verbatim in the `Authorization` header.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| FetchError::InvalidUrl(format!("{}{}: {}", self.base_url, path, e)))
    }

    /// GET `path` and decode the envelope's `data` field as `T`.
    pub async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        debug!("GET {}", url);

        let mut request = self.client.get(url.clone());
        if let Some(ref token) = self.access_token {
            request = request.header(AUTHORIZATION, token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::BadStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        let envelope: ApiEnvelope<T> = serde_json::from_slice(&body)?;

        if !envelope.is_success() {
            if envelope.is_unauthorized() {
                warn!("Backend reports the access token as invalid or expired");
            }
            return Err(FetchError::ApiError {
                code: envelope.code,
                msg: envelope.msg,
            });
        }

        envelope
            .data
            .ok_or_else(|| FetchError::MissingData(url.to_string()))
    }

    /// Fetch the raw menu list from the configured menu endpoint.
    pub async fn fetch_menus<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        info!("Fetching menu list from {}{}", self.base_url, self.menu_path);
        let menus: Vec<T> = self.get_data(&self.menu_path).await?;
        info!("Received {} top-level menu entries", menus.len());
        Ok(menus)
    }
}
