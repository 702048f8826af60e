//! Flow-specific error types and error handling.

mod types;

pub use types::{ApiFailure, OtpError, RegistrationError};

/// Result alias for OTP session operations
pub type OtpResult<T> = Result<T, OtpError>;

/// Result alias for registration coordinator operations
pub type RegistrationResult<T> = Result<T, RegistrationError>;
