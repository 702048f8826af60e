//! Client-side setup errors.

use thiserror::Error;

/// Errors raised while constructing the HTTP layer.
///
/// Request-level failures are not here: those are normalized into
/// `jl_core::ApiFailure` so the flow services see one failure shape.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Request timeout must be a positive number of seconds, got {0}")]
    InvalidTimeout(i64),

    #[error("Failed to build HTTP client: {0}")]
    Http(String),
}
