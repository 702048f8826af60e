//! Configuration for the registration coordinator.

/// Delay before the post-registration redirect fires
pub const DEFAULT_REDIRECT_DELAY_MS: u64 = 3000;

/// Configuration for the registration coordinator
#[derive(Debug, Clone)]
pub struct RegistrationConfig {
    /// Milliseconds between a successful registration and the redirect
    pub redirect_delay_ms: u64,

    /// Minimum password length
    pub min_password_chars: usize,

    /// Minimum phone number length (after trimming)
    pub min_phone_chars: usize,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            redirect_delay_ms: DEFAULT_REDIRECT_DELAY_MS,
            min_password_chars: 6,
            min_phone_chars: 6,
        }
    }
}
