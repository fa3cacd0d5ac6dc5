use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("browser window is not available")]
    NoWindow,
    #[error("document is not available")]
    NoDocument,
    #[error("malformed feed config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("invalid feed config: {0}")]
    InvalidConfig(String),
    #[error("host call failed: {0}")]
    Host(String),
}

impl From<JsValue> for FeedError {
    fn from(value: JsValue) -> Self {
        FeedError::Host(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

pub type Result<T> = std::result::Result<T, FeedError>;
