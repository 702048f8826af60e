//! # JobLink Core
//!
//! Core domain and flow services for the JobLink registration front end.
//! This crate contains the domain entities, the OTP verification session and
//! registration coordinator services, the transport trait seams, and the
//! error types that form the foundation of the sign-up flow.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
