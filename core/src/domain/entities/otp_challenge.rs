//! OTP challenge entity: one outstanding code-verification attempt.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::OtpPurpose;
use crate::errors::OtpError;

/// Maximum verify attempts per dispatched code
pub const MAX_VERIFY_ATTEMPTS: u32 = 5;

/// Accepted code length bounds (digits)
pub const MIN_CODE_DIGITS: usize = 4;
pub const MAX_CODE_DIGITS: usize = 8;

/// Where a challenge currently is in its lifecycle.
///
/// Legal transitions:
/// Idle -> Sending -> AwaitingCode -> Verifying -> {Verified | Failed}.
/// Failed re-enters Verifying on a manual retry, and AwaitingCode re-enters
/// Sending on an explicit resend once the cooldown has elapsed. Verified is
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttemptState {
    Idle,
    Sending,
    AwaitingCode,
    Verifying,
    Verified,
    Failed,
}

/// One outstanding OTP verification attempt.
///
/// The challenge enforces its own state machine; the owning session layers
/// cooldown and transport handling on top. All mutation goes through the
/// transition methods, which reject illegal moves instead of panicking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpChallenge {
    /// Unique identifier for this challenge
    pub id: Uuid,

    /// Email address the code is sent to
    target_email: String,

    /// Why the code was requested
    purpose: OtpPurpose,

    /// When the most recent code was dispatched
    dispatched_at: Option<DateTime<Utc>>,

    /// Current lifecycle state
    state: AttemptState,

    /// Message describing the most recent failure
    failure_message: Option<String>,

    /// Verify attempts made against the current code
    verify_attempts: u32,
}

impl OtpChallenge {
    /// Creates a new idle challenge for an email address.
    pub fn new(target_email: impl Into<String>, purpose: OtpPurpose) -> Self {
        Self {
            id: Uuid::new_v4(),
            target_email: target_email.into(),
            purpose,
            dispatched_at: None,
            state: AttemptState::Idle,
            failure_message: None,
            verify_attempts: 0,
        }
    }

    pub fn target_email(&self) -> &str {
        &self.target_email
    }

    pub fn purpose(&self) -> OtpPurpose {
        self.purpose
    }

    pub fn state(&self) -> AttemptState {
        self.state
    }

    pub fn dispatched_at(&self) -> Option<DateTime<Utc>> {
        self.dispatched_at
    }

    pub fn is_verified(&self) -> bool {
        self.state == AttemptState::Verified
    }

    /// Message from the most recent send or verify failure.
    pub fn failure_message(&self) -> Option<&str> {
        self.failure_message.as_deref()
    }

    /// Verify attempts left for the current code.
    pub fn remaining_attempts(&self) -> u32 {
        MAX_VERIFY_ATTEMPTS.saturating_sub(self.verify_attempts)
    }

    /// Move into `Sending` ahead of a dispatch request.
    pub fn begin_send(&mut self) -> Result<(), OtpError> {
        match self.state {
            AttemptState::Idle | AttemptState::AwaitingCode | AttemptState::Failed => {
                self.state = AttemptState::Sending;
                Ok(())
            }
            AttemptState::Sending | AttemptState::Verifying => Err(OtpError::RequestInFlight),
            AttemptState::Verified => Err(OtpError::AlreadyVerified),
        }
    }

    /// Record a successful dispatch: the code is out, attempts reset.
    pub fn mark_dispatched(&mut self, at: DateTime<Utc>) {
        debug_assert_eq!(self.state, AttemptState::Sending);
        self.state = AttemptState::AwaitingCode;
        self.dispatched_at = Some(at);
        self.failure_message = None;
        self.verify_attempts = 0;
    }

    /// Record a failed dispatch.
    pub fn mark_send_failed(&mut self, message: impl Into<String>) {
        debug_assert_eq!(self.state, AttemptState::Sending);
        self.state = AttemptState::Failed;
        self.failure_message = Some(message.into());
    }

    /// Move into `Verifying` ahead of a verify request.
    ///
    /// Allowed from `AwaitingCode`, and from `Failed` when a code has been
    /// dispatched (the user edited the code and resubmitted).
    pub fn begin_verify(&mut self) -> Result<(), OtpError> {
        match self.state {
            AttemptState::AwaitingCode | AttemptState::Failed => {
                if self.dispatched_at.is_none() {
                    return Err(OtpError::NoOutstandingCode);
                }
                if self.verify_attempts >= MAX_VERIFY_ATTEMPTS {
                    return Err(OtpError::AttemptsExhausted);
                }
                self.state = AttemptState::Verifying;
                Ok(())
            }
            AttemptState::Idle => Err(OtpError::NoOutstandingCode),
            AttemptState::Sending | AttemptState::Verifying => Err(OtpError::RequestInFlight),
            AttemptState::Verified => Err(OtpError::AlreadyVerified),
        }
    }

    /// Record a successful verification. Terminal.
    pub fn mark_verified(&mut self) {
        debug_assert_eq!(self.state, AttemptState::Verifying);
        self.state = AttemptState::Verified;
        self.failure_message = None;
    }

    /// Record a failed verification and consume one attempt.
    pub fn mark_verify_failed(&mut self, message: impl Into<String>) {
        debug_assert_eq!(self.state, AttemptState::Verifying);
        self.state = AttemptState::Failed;
        self.verify_attempts += 1;
        self.failure_message = Some(message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatched_challenge() -> OtpChallenge {
        let mut challenge = OtpChallenge::new("a@b.com", OtpPurpose::AccountVerification);
        challenge.begin_send().unwrap();
        challenge.mark_dispatched(Utc::now());
        challenge
    }

    #[test]
    fn test_new_challenge_is_idle() {
        let challenge = OtpChallenge::new("a@b.com", OtpPurpose::AccountVerification);
        assert_eq!(challenge.state(), AttemptState::Idle);
        assert_eq!(challenge.target_email(), "a@b.com");
        assert!(challenge.dispatched_at().is_none());
        assert_eq!(challenge.remaining_attempts(), MAX_VERIFY_ATTEMPTS);
    }

    #[test]
    fn test_happy_path_transitions() {
        let mut challenge = dispatched_challenge();
        assert_eq!(challenge.state(), AttemptState::AwaitingCode);

        challenge.begin_verify().unwrap();
        assert_eq!(challenge.state(), AttemptState::Verifying);

        challenge.mark_verified();
        assert!(challenge.is_verified());
        assert!(challenge.failure_message().is_none());
    }

    #[test]
    fn test_verify_before_dispatch_rejected() {
        let mut challenge = OtpChallenge::new("a@b.com", OtpPurpose::AccountVerification);
        assert!(matches!(
            challenge.begin_verify(),
            Err(OtpError::NoOutstandingCode)
        ));
    }

    #[test]
    fn test_failed_verify_consumes_attempt_and_allows_retry() {
        let mut challenge = dispatched_challenge();

        challenge.begin_verify().unwrap();
        challenge.mark_verify_failed("invalid");
        assert_eq!(challenge.state(), AttemptState::Failed);
        assert_eq!(challenge.failure_message(), Some("invalid"));
        assert_eq!(challenge.remaining_attempts(), MAX_VERIFY_ATTEMPTS - 1);

        // Manual retry re-enters Verifying from Failed
        challenge.begin_verify().unwrap();
        assert_eq!(challenge.state(), AttemptState::Verifying);
    }

    #[test]
    fn test_attempts_exhausted() {
        let mut challenge = dispatched_challenge();
        for _ in 0..MAX_VERIFY_ATTEMPTS {
            challenge.begin_verify().unwrap();
            challenge.mark_verify_failed("invalid");
        }
        assert_eq!(challenge.remaining_attempts(), 0);
        assert!(matches!(
            challenge.begin_verify(),
            Err(OtpError::AttemptsExhausted)
        ));
    }

    #[test]
    fn test_resend_resets_attempts() {
        let mut challenge = dispatched_challenge();
        challenge.begin_verify().unwrap();
        challenge.mark_verify_failed("invalid");

        challenge.begin_send().unwrap();
        challenge.mark_dispatched(Utc::now());
        assert_eq!(challenge.remaining_attempts(), MAX_VERIFY_ATTEMPTS);
        assert!(challenge.failure_message().is_none());
    }

    #[test]
    fn test_verified_is_terminal() {
        let mut challenge = dispatched_challenge();
        challenge.begin_verify().unwrap();
        challenge.mark_verified();

        assert!(matches!(
            challenge.begin_verify(),
            Err(OtpError::AlreadyVerified)
        ));
        assert!(matches!(
            challenge.begin_send(),
            Err(OtpError::AlreadyVerified)
        ));
    }

    #[test]
    fn test_in_flight_send_blocks_second_send() {
        let mut challenge = OtpChallenge::new("a@b.com", OtpPurpose::AccountVerification);
        challenge.begin_send().unwrap();
        assert!(matches!(
            challenge.begin_send(),
            Err(OtpError::RequestInFlight)
        ));
    }

    #[test]
    fn test_send_failure_keeps_challenge_retryable() {
        let mut challenge = OtpChallenge::new("a@b.com", OtpPurpose::AccountVerification);
        challenge.begin_send().unwrap();
        challenge.mark_send_failed("smtp down");

        assert_eq!(challenge.state(), AttemptState::Failed);
        assert_eq!(challenge.failure_message(), Some("smtp down"));
        assert!(challenge.begin_send().is_ok());
    }
}
