pub mod client;
pub mod envelope;
pub mod error;

pub use client::{MENU_LIST_PATH, MenuClient};
pub use envelope::ApiEnvelope;
pub use error::{FetchError, Result};
