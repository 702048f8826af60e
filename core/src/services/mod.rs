//! Flow services: OTP verification session and registration coordinator.

pub mod registration;
pub mod verification;

pub use registration::{
    Destination, Navigator, RegisterRequest, RegisterResponse, RegisteredAccount,
    RegistrationConfig, RegistrationCoordinator, RegistrationTransport,
};
pub use verification::{
    CodeDispatch, OtpSessionConfig, OtpTransport, OtpVerificationSession,
};
