use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unexpected HTTP status {status} from {url}")]
    BadStatus { status: u16, url: String },

    #[error("Backend rejected request (code {code}): {msg}")]
    ApiError { code: i64, msg: String },

    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Response from {0} carried no data")]
    MissingData(String),
}

pub type Result<T> = std::result::Result<T, FetchError>;
