use thiserror::Error;

/// Failures raised by a persistence adapter.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database operation failed
    #[cfg(feature = "server")]
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A stored document could not be decoded
    #[error("Corrupt document: {0}")]
    Corrupt(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Corrupt(err.to_string())
    }
}
