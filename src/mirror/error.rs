//! Mirror REST client errors.

use thiserror::Error;

/// Errors distinguished by kind so the Supervisor can log structured fields
/// rather than string-match error text, and so every 4xx/5xx is uniformly
/// treated as retryable per spec.
#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("transient transport error: {0}")]
    Transient(#[from] reqwest::Error),

    #[error("mirror returned status {status}")]
    Status { status: u16, body: String },

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}
