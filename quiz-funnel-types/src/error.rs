/// Error type for key-value store operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The store cannot be used at all (private browsing, missing directory).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage quota exceeded")]
    QuotaExceeded,

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend-specific failure.
    #[error("Backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

impl StorageError {
    /// Create a backend error from any error type.
    pub fn backend(err: impl Into<anyhow::Error>) -> Self {
        Self::Backend(err.into())
    }
}
