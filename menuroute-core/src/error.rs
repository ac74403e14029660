use menuroute_fetch::FetchError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RouteError {
    #[error("Route configuration is invalid: {}", .0.join(", "))]
    InvalidMenu(Vec<String>),

    #[error("Route name already registered: {0}")]
    DuplicateRoute(String),

    #[error("Menu fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Session store error: {0}")]
    Session(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RouteError>;
