//! # JobLink Shared
//!
//! Shared wire types and utilities used across the JobLink flow crates.
//! This crate contains the REST response envelope, the typed backend error
//! envelope with its message-extraction rules, and field-level validation
//! utilities.

pub mod types;
pub mod utils;

pub use types::*;
pub use utils::*;
