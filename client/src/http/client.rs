//! Thin JSON client over `reqwest`.
//!
//! Every backend call goes through [`ApiClient::post_json`], which reads the
//! full body before deciding anything. Decoding happens in [`RawResponse`]:
//! a 2xx body is parsed as the standard success envelope, anything else is
//! decoded into the backend error envelope so the caller receives one
//! normalized [`ApiFailure`] shape.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use jl_core::errors::ApiFailure;
use jl_shared::types::{ApiEnvelope, BackendErrorEnvelope};

use crate::config::ClientConfig;
use crate::error::ClientError;

/// JSON client bound to one backend base URL.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ClientError::Http(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// POST a JSON body to `path` and capture the raw response.
    ///
    /// Only transport-level problems (connect, timeout, body read) become an
    /// error here; HTTP rejections come back as a [`RawResponse`] so the
    /// structured body survives for message extraction.
    pub async fn post_json<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<RawResponse, ApiFailure> {
        let url = format!("{}{}", self.base_url, path);
        debug!(event = "api_request", %url);

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiFailure::transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiFailure::transport(e.to_string()))?;

        debug!(event = "api_response", %url, status);
        Ok(RawResponse { status, body })
    }
}

/// An HTTP response captured before any interpretation.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    /// Whether the HTTP status is in the 2xx range.
    pub fn is_success_status(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode a 2xx body as the standard success envelope.
    ///
    /// A non-2xx status or an undecodable body becomes an [`ApiFailure`]
    /// carrying whatever the backend attached.
    pub fn decode<T: DeserializeOwned>(self) -> Result<ApiEnvelope<T>, ApiFailure> {
        if !self.is_success_status() {
            return Err(self.into_failure());
        }
        let status = self.status;
        serde_json::from_str(&self.body).map_err(|_| ApiFailure::backend_raw(status, self.body))
    }

    /// Turn a rejection into an [`ApiFailure`].
    ///
    /// The raw body text is always kept; a structured decode is attached on
    /// top so the extraction precedence can still fall back to the raw text
    /// when the envelope carries no usable message.
    pub fn into_failure(self) -> ApiFailure {
        let envelope = serde_json::from_str::<BackendErrorEnvelope>(&self.body).ok();
        let failure = ApiFailure::backend_raw(self.status, self.body);
        match envelope {
            Some(envelope) => failure.with_envelope(envelope),
            None => failure,
        }
    }
}
