use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Lookup by an id the store does not know. Callers surface this to the
    /// user as a retryable message.
    #[error("transaction {0} not found")]
    TransactionNotFound(u64),

    #[error("server returned {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("internal lock poisoned")]
    LockPoisoned,
}

pub type Result<T> = std::result::Result<T, ApiError>;
