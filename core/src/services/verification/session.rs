//! OTP verification session implementation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::entities::otp_challenge::{AttemptState, OtpChallenge};
use crate::domain::value_objects::OtpPurpose;
use crate::errors::{OtpError, OtpResult};

use super::config::OtpSessionConfig;
use super::cooldown::Cooldown;
use super::traits::OtpTransport;
use super::types::CodeDispatch;

/// Codes are 4 to 8 digits; anything else fails before any network call.
static CODE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4,8}$").expect("code pattern is valid"));

/// Session managing the full lifecycle of one OTP exchange.
///
/// The session owns its [`OtpChallenge`] exclusively; callers observe it
/// through [`challenge`](Self::challenge) snapshots. State is guarded by a
/// mutex that is never held across an await, so a second dispatch or verify
/// while one is in flight is rejected instead of run concurrently. Failures
/// are surfaced to the caller and never retried automatically.
pub struct OtpVerificationSession<T: OtpTransport> {
    /// Transport to the OTP backend
    transport: Arc<T>,
    /// Session configuration
    config: OtpSessionConfig,
    /// The single challenge this session tracks
    challenge: Mutex<OtpChallenge>,
    /// Resend countdown
    cooldown: Mutex<Cooldown>,
    /// Cleared on teardown; late responses are discarded once false
    alive: AtomicBool,
}

impl<T: OtpTransport> OtpVerificationSession<T> {
    /// Create a session for one email address and purpose.
    pub fn new(
        transport: Arc<T>,
        email: impl Into<String>,
        purpose: OtpPurpose,
        config: OtpSessionConfig,
    ) -> Self {
        Self {
            transport,
            config,
            challenge: Mutex::new(OtpChallenge::new(email, purpose)),
            cooldown: Mutex::new(Cooldown::idle()),
            alive: AtomicBool::new(true),
        }
    }

    /// Snapshot of the current challenge state.
    pub fn challenge(&self) -> OtpChallenge {
        self.challenge.lock().expect("challenge lock poisoned").clone()
    }

    /// Seconds until resend becomes available. Ticks down to exactly zero.
    pub fn cooldown_remaining(&self) -> u64 {
        self.cooldown.lock().expect("cooldown lock poisoned").remaining()
    }

    /// Request a code dispatch.
    ///
    /// Rejected while the cooldown is running, while another dispatch or
    /// verify is in flight, and after the session is closed. On success the
    /// challenge moves to `AwaitingCode` and the cooldown restarts.
    pub async fn request_code(&self) -> OtpResult<CodeDispatch> {
        if !self.alive.load(Ordering::SeqCst) {
            return Err(OtpError::SessionClosed);
        }

        let (email, purpose) = {
            let mut challenge = self.challenge.lock().expect("challenge lock poisoned");
            let remaining = self.cooldown_remaining();
            if remaining > 0 {
                tracing::warn!(
                    email = challenge.target_email(),
                    cooldown_remaining = remaining,
                    event = "otp_resend_blocked",
                    "Code requested while cooldown is still running"
                );
                return Err(OtpError::CooldownActive { remaining });
            }
            challenge.begin_send()?;
            (challenge.target_email().to_string(), challenge.purpose())
        };

        let result = self.transport.request_code(&email, purpose).await;

        if !self.alive.load(Ordering::SeqCst) {
            // The view went away while the request was out; drop the result.
            return Err(OtpError::SessionClosed);
        }

        let mut challenge = self.challenge.lock().expect("challenge lock poisoned");
        match result {
            Ok(()) => {
                let dispatched_at = Utc::now();
                challenge.mark_dispatched(dispatched_at);
                self.cooldown
                    .lock()
                    .expect("cooldown lock poisoned")
                    .start(self.config.cooldown_seconds);
                tracing::info!(
                    email = challenge.target_email(),
                    challenge_id = %challenge.id,
                    event = "otp_dispatched",
                    "Verification code dispatched"
                );
                Ok(CodeDispatch {
                    challenge_id: challenge.id,
                    dispatched_at,
                    next_resend_at: dispatched_at
                        + Duration::seconds(self.config.cooldown_seconds as i64),
                })
            }
            Err(failure) => {
                let message = failure.message();
                challenge.mark_send_failed(&message);
                tracing::warn!(
                    email = challenge.target_email(),
                    error = %message,
                    event = "otp_dispatch_failed",
                    "Verification code dispatch failed"
                );
                Err(OtpError::Api(failure))
            }
        }
    }

    /// Explicit resend once the cooldown has elapsed.
    ///
    /// Same preconditions as [`request_code`](Self::request_code); kept as a
    /// separate operation so call sites read as what the user did.
    pub async fn resend_code(&self) -> OtpResult<CodeDispatch> {
        {
            let challenge = self.challenge.lock().expect("challenge lock poisoned");
            if challenge.dispatched_at().is_none() {
                return Err(OtpError::NoOutstandingCode);
            }
        }
        self.request_code().await
    }

    /// Verify a user-supplied code.
    ///
    /// A code failing `^[0-9]{4,8}$` is rejected with `InvalidFormat`
    /// before any network call. At most one verify request is in flight at a
    /// time; a failed verify leaves the challenge retryable until attempts
    /// run out.
    pub async fn verify_code(&self, code: &str) -> OtpResult<()> {
        if !self.alive.load(Ordering::SeqCst) {
            return Err(OtpError::SessionClosed);
        }

        let code = code.trim();
        if !CODE_PATTERN.is_match(code) {
            return Err(OtpError::InvalidFormat);
        }

        let (email, purpose) = {
            let mut challenge = self.challenge.lock().expect("challenge lock poisoned");
            challenge.begin_verify()?;
            (challenge.target_email().to_string(), challenge.purpose())
        };

        let result = self.transport.verify_code(&email, code, purpose).await;

        if !self.alive.load(Ordering::SeqCst) {
            return Err(OtpError::SessionClosed);
        }

        let mut challenge = self.challenge.lock().expect("challenge lock poisoned");
        match result {
            Ok(()) => {
                challenge.mark_verified();
                tracing::info!(
                    email = challenge.target_email(),
                    challenge_id = %challenge.id,
                    event = "otp_verified",
                    "Verification code accepted"
                );
                Ok(())
            }
            Err(failure) => {
                let message = failure.message();
                challenge.mark_verify_failed(&message);
                tracing::warn!(
                    email = challenge.target_email(),
                    error = %message,
                    remaining_attempts = challenge.remaining_attempts(),
                    event = "otp_verify_failed",
                    "Verification code rejected"
                );
                Err(OtpError::Api(failure))
            }
        }
    }

    /// Tear the session down.
    ///
    /// Stops the cooldown task and makes every pending or future operation
    /// return `SessionClosed` instead of mutating state.
    pub fn close(&self) {
        self.alive.store(false, Ordering::SeqCst);
        self.cooldown.lock().expect("cooldown lock poisoned").cancel();
        tracing::debug!(event = "otp_session_closed", "OTP session closed");
    }

    /// Whether the session is still accepting operations.
    pub fn is_open(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Whether the challenge reached its verified terminal state.
    pub fn is_verified(&self) -> bool {
        self.challenge.lock().expect("challenge lock poisoned").state() == AttemptState::Verified
    }
}

impl<T: OtpTransport> Drop for OtpVerificationSession<T> {
    fn drop(&mut self) {
        self.close();
    }
}
