//! OTP verification session for email-based sign-up confirmation.
//!
//! This module owns the full lifecycle of one OTP exchange:
//! - code dispatch and explicit resend with a cooldown window
//! - code verification with format pre-checks and attempt tracking
//! - a single-in-flight guarantee for dispatch and verify requests
//! - deterministic teardown (the cooldown task never outlives the session,
//!   late responses are discarded instead of applied)

mod config;
mod cooldown;
mod session;
mod traits;
mod types;

#[cfg(test)]
pub(crate) mod tests;

pub use config::OtpSessionConfig;
pub use cooldown::Cooldown;
pub use session::OtpVerificationSession;
pub use traits::OtpTransport;
pub use types::CodeDispatch;
