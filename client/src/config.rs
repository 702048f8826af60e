//! Environment-driven configuration for the HTTP layer.

use crate::error::ClientError;

/// Configuration for the REST backend connection
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the JobLink REST backend
    pub base_url: String,

    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl ClientConfig {
    /// Create configuration from environment variables.
    ///
    /// Reads `JOBLINK_API_BASE_URL` (required) and
    /// `JOBLINK_REQUEST_TIMEOUT_SECS` (default 30). A `.env` file is loaded
    /// first when present.
    pub fn from_env() -> Result<Self, ClientError> {
        dotenvy::dotenv().ok();

        let settings = config::Config::builder()
            .set_default("request_timeout_secs", 30i64)?
            .add_source(config::Environment::with_prefix("JOBLINK"))
            .build()?;

        let base_url = settings.get_string("api_base_url")?;
        validate_base_url(&base_url)?;

        Ok(Self {
            base_url,
            request_timeout_secs: validate_timeout(settings.get_int("request_timeout_secs")?)?,
        })
    }

    /// Configuration pointing at an explicit base URL, for tests and tools.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout_secs: 30,
        }
    }
}

fn validate_base_url(base_url: &str) -> Result<(), ClientError> {
    if base_url.starts_with("http://") || base_url.starts_with("https://") {
        Ok(())
    } else {
        Err(ClientError::InvalidBaseUrl(base_url.to_string()))
    }
}

fn validate_timeout(seconds: i64) -> Result<u64, ClientError> {
    u64::try_from(seconds)
        .ok()
        .filter(|&s| s > 0)
        .ok_or(ClientError::InvalidTimeout(seconds))
}
