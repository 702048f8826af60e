//! Registration coordinator for the end-to-end sign-up sequence.
//!
//! The coordinator validates the drafted account fields, gates OTP dispatch
//! behind that validation, submits the account-creation request once the
//! challenge is verified, and hands off to navigation through a cancellable
//! delayed redirect.

mod config;
mod service;
mod traits;

#[cfg(test)]
mod tests;

pub use config::RegistrationConfig;
pub use service::RegistrationCoordinator;
pub use traits::{
    Destination, Navigator, RegisterRequest, RegisterResponse, RegisteredAccount,
    RegistrationTransport,
};
