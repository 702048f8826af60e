//! OTP dispatch and verification over REST.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

use jl_core::domain::value_objects::OtpPurpose;
use jl_core::errors::ApiFailure;
use jl_core::services::verification::OtpTransport;
use jl_shared::types::ApiEnvelope;
use serde::Serialize;

use super::client::{ApiClient, RawResponse};

const OTP_REQUEST_PATH: &str = "/otp/request";
const OTP_VERIFY_PATH: &str = "/otp/verify";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OtpRequestBody<'a> {
    email: &'a str,
    purpose: i32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OtpVerifyBody<'a> {
    email: &'a str,
    otp_code: &'a str,
    purpose: i32,
}

/// REST implementation of the OTP backend.
pub struct HttpOtpGateway {
    api: Arc<ApiClient>,
}

impl HttpOtpGateway {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// The backend sometimes reports success only in the transport status and
    /// sometimes only in the envelope's statusCode; either one saying 200
    /// counts as success.
    fn accept(response: RawResponse) -> Result<(), ApiFailure> {
        if response.status == 200 {
            return Ok(());
        }
        if let Ok(envelope) =
            serde_json::from_str::<ApiEnvelope<serde_json::Value>>(&response.body)
        {
            if envelope.is_ok() {
                return Ok(());
            }
        }
        let http_status = response.status;
        let failure = response.into_failure();
        warn!(event = "otp_rejected", http_status);
        Err(failure)
    }
}

#[async_trait]
impl OtpTransport for HttpOtpGateway {
    async fn request_code(&self, email: &str, purpose: OtpPurpose) -> Result<(), ApiFailure> {
        let body = OtpRequestBody {
            email,
            purpose: purpose.wire_value(),
        };
        Self::accept(self.api.post_json(OTP_REQUEST_PATH, &body).await?)
    }

    async fn verify_code(
        &self,
        email: &str,
        code: &str,
        purpose: OtpPurpose,
    ) -> Result<(), ApiFailure> {
        let body = OtpVerifyBody {
            email,
            otp_code: code,
            purpose: purpose.wire_value(),
        };
        Self::accept(self.api.post_json(OTP_VERIFY_PATH, &body).await?)
    }
}
