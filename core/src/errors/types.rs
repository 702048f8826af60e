//! Error taxonomy for the registration and verification flow.
//!
//! Three layers, mirroring how failures actually reach the user:
//! local validation never touches the network, [`ApiFailure`] normalizes
//! transport and backend rejections into one displayable message, and the
//! [`OtpError`] / [`RegistrationError`] enums describe flow-level refusals
//! (cooldown active, request in flight, closed session). Nothing here is
//! fatal: every variant leaves the user in a recoverable state.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use jl_shared::types::envelope::{failure_message, BackendErrorEnvelope};

/// Normalized transport or backend failure.
///
/// Decoded once at the transport boundary: a rejection with a structured
/// body keeps its [`BackendErrorEnvelope`], a transport-level failure keeps
/// whatever raw text it carried. [`ApiFailure::message`] applies the ordered
/// extraction rules so no call site re-derives them.
#[derive(Debug, Clone, Default)]
pub struct ApiFailure {
    /// HTTP status of the rejected response, if one arrived
    pub http_status: Option<u16>,

    /// Decoded backend error body, if it was structured
    pub envelope: Option<BackendErrorEnvelope>,

    /// Raw transport error or undecodable body text
    pub raw: Option<String>,
}

impl ApiFailure {
    /// A rejection with a decoded structured body.
    pub fn backend(http_status: u16, envelope: BackendErrorEnvelope) -> Self {
        Self {
            http_status: Some(http_status),
            envelope: Some(envelope),
            raw: None,
        }
    }

    /// A rejection whose body could not be decoded.
    pub fn backend_raw(http_status: u16, body: impl Into<String>) -> Self {
        Self {
            http_status: Some(http_status),
            envelope: None,
            raw: Some(body.into()),
        }
    }

    /// A transport-level failure (network, timeout) with no response.
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            http_status: None,
            envelope: None,
            raw: Some(message.into()),
        }
    }

    /// Attach a structured body found inside a transport error.
    ///
    /// Some transports attach the server's response to a thrown error; the
    /// structured message must win over the generic transport text.
    pub fn with_envelope(mut self, envelope: BackendErrorEnvelope) -> Self {
        self.envelope = Some(envelope);
        self
    }

    /// The human-readable message, resolved by the ordered precedence:
    /// field map -> message -> title -> data.message -> raw text -> generic.
    pub fn message(&self) -> String {
        failure_message(self.envelope.as_ref(), self.raw.as_deref())
    }
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for ApiFailure {}

/// OTP session errors
#[derive(Error, Debug)]
pub enum OtpError {
    #[error("Verification code must be 4-8 digits")]
    InvalidFormat,

    #[error("Please wait {remaining} seconds before requesting a new code")]
    CooldownActive { remaining: u64 },

    #[error("A request is already in flight")]
    RequestInFlight,

    #[error("No verification code has been dispatched yet")]
    NoOutstandingCode,

    #[error("This code has already been verified")]
    AlreadyVerified,

    #[error("Maximum verification attempts exceeded. Please request a new code")]
    AttemptsExhausted,

    #[error("The verification session is closed")]
    SessionClosed,

    #[error("{0}")]
    Api(#[from] ApiFailure),
}

/// Registration coordinator errors
#[derive(Error, Debug)]
pub enum RegistrationError {
    #[error("Validation failed")]
    Invalid {
        fields: BTreeMap<String, Vec<String>>,
    },

    #[error("The verification session does not target the draft's email address")]
    SessionMismatch,

    #[error("The verification challenge is not verified")]
    ChallengeNotVerified,

    #[error("An account-creation attempt has already been made for this code")]
    AlreadyAttempted,

    #[error("The registration flow is closed")]
    FlowClosed,

    #[error(transparent)]
    Otp(#[from] OtpError),

    #[error("{0}")]
    Api(#[from] ApiFailure),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_failure_prefers_structured_message() {
        let envelope: BackendErrorEnvelope =
            serde_json::from_str(r#"{"errors":{"OtpCode":["invalid"]}}"#).unwrap();
        let failure = ApiFailure::transport("connection reset").with_envelope(envelope);
        assert_eq!(failure.message(), "invalid");
    }

    #[test]
    fn test_api_failure_falls_back_to_raw() {
        let failure = ApiFailure::transport("connection reset");
        assert_eq!(failure.message(), "connection reset");
        assert_eq!(failure.to_string(), "connection reset");
    }

    #[test]
    fn test_otp_error_display() {
        let err = OtpError::CooldownActive { remaining: 42 };
        assert!(err.to_string().contains("42 seconds"));
    }

    #[test]
    fn test_registration_error_wraps_api_failure() {
        let err: RegistrationError = ApiFailure::backend_raw(500, "boom").into();
        assert_eq!(err.to_string(), "boom");
    }
}
