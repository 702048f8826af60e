//! # JobLink Client
//!
//! HTTP transport layer for the JobLink flow services. Implements the
//! `jl_core` transport traits against the REST backend using `reqwest`,
//! decoding rejections into the shared backend error envelope exactly once
//! at this boundary.

pub mod config;
pub mod error;
pub mod http;

pub use config::ClientConfig;
pub use error::ClientError;
pub use http::{ApiClient, HttpOtpGateway, HttpRegistrationGateway};
