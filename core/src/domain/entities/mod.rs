//! Domain entities owned by the registration flow.

pub mod otp_challenge;
pub mod registration_draft;
pub mod registration_outcome;

pub use otp_challenge::{AttemptState, OtpChallenge};
pub use registration_draft::{FrozenDraft, RegistrationDraft};
pub use registration_outcome::RegistrationOutcome;
