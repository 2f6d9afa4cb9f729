use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("history data is corrupt: {0}")]
    Corrupt(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl From<bayan_core::error::CoreError> for StorageError {
    fn from(e: bayan_core::error::CoreError) -> Self {
        match e {
            bayan_core::error::CoreError::Serialization(e) => StorageError::Serialization(e),
            other => StorageError::Corrupt(other.to_string()),
        }
    }
}
