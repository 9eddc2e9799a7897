use std::{io, path::PathBuf};

use thiserror::Error;

/// Failure modes of a single fetch-and-save run.
///
/// None of these are retried or recovered internally; they surface directly
/// to the caller.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The API answered 503, meaning the daily request quota is exhausted.
    #[error("503 - Daily limit reached")]
    RateLimitExceeded,

    /// Any other non-200 status, with the canonical reason phrase.
    #[error("{code} - {reason}")]
    RequestFailed { code: u16, reason: String },

    /// Transport-level failure (DNS, connection refused, timeout) before a
    /// complete response was received.
    #[error("network error: {0}")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The response arrived but could not be written to disk.
    #[error("failed to write {}: {source}", .path.display())]
    FileWrite { path: PathBuf, source: io::Error },
}
