use serde::{Deserialize, Serialize};

/// Business status code the backend uses for a successful call.
pub const API_SUCCESS: i64 = 200;

/// Business status code the backend uses for an expired or missing token.
pub const API_UNAUTHORIZED: i64 = 401;

/// The `{code, msg, data}` wrapper every backend response is delivered in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    pub fn is_success(&self) -> bool {
        self.code == API_SUCCESS
    }

    pub fn is_unauthorized(&self) -> bool {
        self.code == API_UNAUTHORIZED
    }
}
