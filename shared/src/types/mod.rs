//! Wire types shared between the flow core and the HTTP client.

pub mod envelope;

pub use envelope::{ApiEnvelope, BackendErrorEnvelope, ErrorData, GENERIC_FAILURE_MESSAGE};
