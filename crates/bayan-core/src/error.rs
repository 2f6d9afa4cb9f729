use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown locale: {0}")]
    UnknownLocale(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
