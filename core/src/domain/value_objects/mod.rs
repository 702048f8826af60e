//! Value objects shared across the flow.

pub mod purpose;
pub mod role;

pub use purpose::OtpPurpose;
pub use role::UserRole;
