//! Transport seam for the OTP backend.

use async_trait::async_trait;

use crate::domain::value_objects::OtpPurpose;
use crate::errors::ApiFailure;

/// Trait for the OTP backend integration.
///
/// Implementations issue the `POST /otp/request` and `POST /otp/verify`
/// calls. An `Ok` return means the backend answered with status 200 (by the
/// envelope's statusCode or the transport status); every other outcome is an
/// [`ApiFailure`] carrying whatever structured body the backend attached.
#[async_trait]
pub trait OtpTransport: Send + Sync {
    /// Ask the backend to dispatch a code to `email`.
    async fn request_code(&self, email: &str, purpose: OtpPurpose) -> Result<(), ApiFailure>;

    /// Ask the backend to verify a user-supplied code.
    async fn verify_code(
        &self,
        email: &str,
        code: &str,
        purpose: OtpPurpose,
    ) -> Result<(), ApiFailure>;
}
