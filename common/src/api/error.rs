use thiserror::Error;

use crate::transaction::TransactionError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },
    #[error("Node responded with HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Failed to decode node response: {0}")]
    Decode(String),
    #[error("Invalid node url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error(transparent)]
    Transaction(#[from] TransactionError),
}

impl ApiError {
    /// Whether sending the same request again may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Transport { .. } => true,
            ApiError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
