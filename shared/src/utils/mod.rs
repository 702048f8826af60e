//! Shared utilities.

pub mod validation;

pub use validation::{FieldError, ValidationErrors, validators};
