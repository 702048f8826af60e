//! HTTP gateways implementing the core transport traits.

mod client;
mod otp;
mod registration;

pub use client::{ApiClient, RawResponse};
pub use otp::HttpOtpGateway;
pub use registration::HttpRegistrationGateway;
