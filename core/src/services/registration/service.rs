//! Registration coordinator implementation.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use tokio::task::JoinHandle;

use jl_shared::types::envelope::GENERIC_FAILURE_MESSAGE;
use jl_shared::utils::validation::{validators, ValidationErrors};

use crate::domain::entities::{FrozenDraft, OtpChallenge, RegistrationDraft, RegistrationOutcome};
use crate::domain::value_objects::UserRole;
use crate::errors::{RegistrationError, RegistrationResult};
use crate::services::verification::{OtpTransport, OtpVerificationSession};

use super::config::RegistrationConfig;
use super::traits::{
    Destination, Navigator, RegisterRequest, RegisterResponse, RegistrationTransport,
};

/// Compatibility shim for the backend's inconsistent status codes: a message
/// matching this pattern counts as success even when the codes disagree.
static SUCCESS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)success|成功").expect("success pattern is valid"));

/// Coordinator driving the end-to-end sign-up sequence.
///
/// Owns the draft lifecycle (validate, freeze on dispatch), the single
/// account-creation attempt per verified code, and the delayed post-success
/// redirect. The redirect is a scheduled task owned here: it is cancelled
/// deterministically when the flow closes, never left running on its own.
pub struct RegistrationCoordinator<R: RegistrationTransport, N: Navigator + 'static> {
    /// Transport to the account-creation backend
    transport: Arc<R>,
    /// Navigation service receiving the post-registration redirect
    navigator: Arc<N>,
    /// Service configuration
    config: RegistrationConfig,
    /// Pending redirect task, if one is scheduled
    redirect_task: Mutex<Option<JoinHandle<()>>>,
    /// Cleared on teardown; late responses are discarded once false
    alive: Arc<AtomicBool>,
    /// Set after the first account-creation attempt, closing the code-entry
    /// step so the same OTP cannot be resubmitted
    attempted: AtomicBool,
}

impl<R: RegistrationTransport, N: Navigator + 'static> RegistrationCoordinator<R, N> {
    /// Create a new coordinator.
    pub fn new(transport: Arc<R>, navigator: Arc<N>, config: RegistrationConfig) -> Self {
        Self {
            transport,
            navigator,
            config,
            redirect_task: Mutex::new(None),
            alive: Arc::new(AtomicBool::new(true)),
            attempted: AtomicBool::new(false),
        }
    }

    /// Validate a draft. Pure and synchronous.
    ///
    /// Returns the full field -> messages map rather than the first failure,
    /// so the form can highlight every invalid field simultaneously.
    pub fn validate(
        &self,
        draft: &RegistrationDraft,
    ) -> Result<(), BTreeMap<String, Vec<String>>> {
        let mut errors = ValidationErrors::new();

        let email = draft.email.trim();
        if email.is_empty() {
            errors.add("email", "Email is required");
        } else if !validators::is_valid_email(email) {
            errors.add("email", "Please enter a valid email address");
        }

        if draft.password.is_empty() {
            errors.add("password", "Password is required");
        } else if draft.password.chars().count() < self.config.min_password_chars {
            errors.add(
                "password",
                format!(
                    "Password must be at least {} characters",
                    self.config.min_password_chars
                ),
            );
        }

        if draft.confirm_password.is_empty() {
            errors.add("confirmPassword", "Please confirm your password");
        } else if draft.confirm_password != draft.password {
            errors.add("confirmPassword", "Passwords do not match");
        }

        if !validators::not_empty(&draft.phone_number) {
            errors.add("phoneNumber", "Phone number is required");
        } else if !validators::min_length(&draft.phone_number, self.config.min_phone_chars) {
            errors.add(
                "phoneNumber",
                format!(
                    "Phone number must be at least {} characters",
                    self.config.min_phone_chars
                ),
            );
        }

        if !draft.agreed_to_terms {
            errors.add("agreedToTerms", "You must agree to the terms of service");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors.into_field_map())
        }
    }

    /// Submit a draft: validate it, then trigger OTP dispatch.
    ///
    /// `session` must target the draft's email address; a mismatch is
    /// rejected before any dispatch. On dispatch success the draft is frozen
    /// and returned; the caller presents the code-entry step. On failure the
    /// mutable draft is untouched and the user may fix it and retry.
    pub async fn submit<T: OtpTransport>(
        &self,
        draft: &RegistrationDraft,
        session: &OtpVerificationSession<T>,
    ) -> RegistrationResult<FrozenDraft> {
        if !self.alive.load(Ordering::SeqCst) {
            return Err(RegistrationError::FlowClosed);
        }

        self.validate(draft)
            .map_err(|fields| RegistrationError::Invalid { fields })?;

        if session.challenge().target_email() != draft.email.trim() {
            return Err(RegistrationError::SessionMismatch);
        }

        session.request_code().await?;

        tracing::info!(
            email = draft.email.trim(),
            role_id = draft.role.role_id(),
            event = "registration_submitted",
            "Draft validated and verification code dispatched"
        );
        Ok(draft.freeze())
    }

    /// Complete registration after a verified challenge.
    ///
    /// One attempt per verified code: whatever the result, the code-entry
    /// step is closed afterwards. A backend rejection is returned as a
    /// failed [`RegistrationOutcome`], keeping the user in a recoverable
    /// state; `Err` is reserved for precondition and lifecycle violations.
    pub async fn complete_registration(
        &self,
        draft: &FrozenDraft,
        challenge: &OtpChallenge,
    ) -> RegistrationResult<RegistrationOutcome> {
        if !self.alive.load(Ordering::SeqCst) {
            return Err(RegistrationError::FlowClosed);
        }
        if self.attempted.load(Ordering::SeqCst) {
            return Err(RegistrationError::AlreadyAttempted);
        }
        if !challenge.is_verified() {
            return Err(RegistrationError::ChallengeNotVerified);
        }

        let request = RegisterRequest {
            email: draft.email().to_string(),
            phone_number: draft.phone_number().to_string(),
            password: draft.password().to_string(),
            role: draft.role(),
        };

        let result = self.transport.register(&request).await;

        if !self.alive.load(Ordering::SeqCst) {
            return Err(RegistrationError::FlowClosed);
        }
        self.attempted.store(true, Ordering::SeqCst);

        match result {
            Ok(response) if Self::is_success_response(&response) => {
                Ok(self.accept_registration(draft, &response))
            }
            Ok(response) => {
                let message = response
                    .message
                    .as_deref()
                    .map(str::trim)
                    .filter(|m| !m.is_empty())
                    .unwrap_or(GENERIC_FAILURE_MESSAGE)
                    .to_string();
                tracing::warn!(
                    email = draft.email(),
                    status_code = response.status_code,
                    error = %message,
                    event = "registration_rejected",
                    "Account creation rejected by the backend"
                );
                Ok(RegistrationOutcome::failure(message))
            }
            Err(failure) => {
                // The shim applies here too: some rejections carry a success
                // message under an ambiguous status code.
                let message = failure.message();
                if SUCCESS_PATTERN.is_match(&message) {
                    let response = RegisterResponse {
                        message: Some(message),
                        ..RegisterResponse::default()
                    };
                    return Ok(self.accept_registration(draft, &response));
                }
                tracing::warn!(
                    email = draft.email(),
                    error = %message,
                    event = "registration_failed",
                    "Account creation request failed"
                );
                Ok(RegistrationOutcome::failure(message))
            }
        }
    }

    /// Tear the flow down, cancelling any scheduled redirect.
    pub fn close(&self) {
        self.alive.store(false, Ordering::SeqCst);
        if let Some(task) = self
            .redirect_task
            .lock()
            .expect("redirect lock poisoned")
            .take()
        {
            task.abort();
        }
        tracing::debug!(event = "registration_flow_closed", "Registration flow closed");
    }

    /// Whether an account-creation attempt has been made.
    pub fn attempt_made(&self) -> bool {
        self.attempted.load(Ordering::SeqCst)
    }

    /// Success per the backend's observed behavior: HTTP 200/201, envelope
    /// statusCode 200/201, or a success-pattern message under an ambiguous
    /// status.
    fn is_success_response(response: &RegisterResponse) -> bool {
        matches!(response.http_status, 200 | 201)
            || matches!(response.status_code, 200 | 201)
            || response
                .message
                .as_deref()
                .is_some_and(|m| SUCCESS_PATTERN.is_match(m))
    }

    fn accept_registration(
        &self,
        draft: &FrozenDraft,
        response: &RegisterResponse,
    ) -> RegistrationOutcome {
        let account = response.account.clone().unwrap_or_default();
        let created_role = account.role_id.and_then(UserRole::from_role_id);
        let outcome = RegistrationOutcome::success(account.user_id, created_role);

        tracing::info!(
            email = draft.email(),
            user_id = ?outcome.created_user_id,
            event = "registration_created",
            "Account created"
        );

        // Route on the role the backend recorded; fall back to the drafted
        // role when the response carried none.
        match account.role_id {
            Some(wire) => match UserRole::from_role_id(wire) {
                Some(role) => self.schedule_redirect(role),
                None => {
                    tracing::error!(
                        role_id = wire,
                        event = "unroutable_role",
                        "Backend returned a role with no destination; skipping redirect"
                    );
                }
            },
            None => self.schedule_redirect(draft.role()),
        }

        outcome
    }

    /// Schedule the delayed post-registration redirect.
    fn schedule_redirect(&self, role: UserRole) {
        let destination = match role {
            UserRole::Employer => Destination::EmployerProfileSetup,
            UserRole::Candidate => Destination::EmployeeProfileSetup,
        };
        let navigator = Arc::clone(&self.navigator);
        let alive = Arc::clone(&self.alive);
        // Anchor the delay at scheduling time, not at the task's first poll.
        let delay = tokio::time::sleep(Duration::from_millis(self.config.redirect_delay_ms));

        let mut slot = self.redirect_task.lock().expect("redirect lock poisoned");
        if let Some(previous) = slot.take() {
            previous.abort();
        }
        *slot = Some(tokio::spawn(async move {
            delay.await;
            if alive.load(Ordering::SeqCst) {
                tracing::info!(
                    destination = ?destination,
                    event = "post_registration_redirect",
                    "Redirecting to profile setup"
                );
                navigator.navigate(destination);
            }
        }));
    }
}

impl<R: RegistrationTransport, N: Navigator + 'static> Drop for RegistrationCoordinator<R, N> {
    fn drop(&mut self) {
        self.close();
    }
}
