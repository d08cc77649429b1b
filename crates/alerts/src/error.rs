//! Error types for alert delivery.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by alert delivery.
///
/// Nothing is retried or swallowed here. Both failure surfaces, the
/// connection lookup and the webhook transmission, propagate to the
/// callback's caller.
#[derive(Debug, Error)]
pub enum AlertError {
    /// The connection id did not resolve to a configured connection.
    #[error("connection `{id}` is not configured: {reason}")]
    UnknownConnection { id: String, reason: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The webhook endpoint answered with a non-success status.
    #[error("webhook returned {status}: {body}")]
    Rejected { status: StatusCode, body: String },

    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },
}
