//! Configuration for the OTP verification session.

/// Default resend cooldown window in seconds
pub const DEFAULT_COOLDOWN_SECONDS: u64 = 180;

/// Configuration for an OTP verification session
#[derive(Debug, Clone)]
pub struct OtpSessionConfig {
    /// Seconds the user must wait between code dispatches
    pub cooldown_seconds: u64,
}

impl Default for OtpSessionConfig {
    fn default() -> Self {
        Self {
            cooldown_seconds: DEFAULT_COOLDOWN_SECONDS,
        }
    }
}
