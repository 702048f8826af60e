//! REST response envelope and backend error envelope.
//!
//! Every backend endpoint answers with a `{statusCode, message, data}`
//! envelope. Failures come back in a handful of historical shapes (per-field
//! error maps, top-level `message`, top-level `title`, nested
//! `data.message`), so rejections are decoded exactly once into
//! [`BackendErrorEnvelope`] at the transport boundary and the human-readable
//! message is extracted through a single ordered rule set.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fallback shown when a failure carries no usable message at all.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Standard success envelope returned by the JobLink backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope<T> {
    /// Application-level status code (usually mirrors the HTTP status)
    pub status_code: u16,

    /// Human-readable message
    #[serde(default)]
    pub message: Option<String>,

    /// Response payload (present on success)
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Whether the envelope itself reports success.
    pub fn is_ok(&self) -> bool {
        self.status_code == 200
    }
}

/// Nested `data` object observed on some error responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorData {
    #[serde(default)]
    pub message: Option<String>,
}

/// Typed decode of every backend rejection shape.
///
/// The backend is inconsistent about where it puts the interesting text, so
/// all candidate locations are optional and [`BackendErrorEnvelope::message`]
/// resolves them in a fixed order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendErrorEnvelope {
    /// Application-level status code, when present
    #[serde(default)]
    pub status_code: Option<u16>,

    /// Top-level message
    #[serde(default)]
    pub message: Option<String>,

    /// Top-level title (ASP.NET-style problem responses)
    #[serde(default)]
    pub title: Option<String>,

    /// Per-field validation messages. A `BTreeMap` keeps "first field"
    /// deterministic.
    #[serde(default)]
    pub errors: Option<BTreeMap<String, Vec<String>>>,

    /// Nested data object that sometimes carries the message instead
    #[serde(default)]
    pub data: Option<ErrorData>,
}

impl BackendErrorEnvelope {
    /// Extract the most specific message this envelope carries.
    ///
    /// Rules, in order:
    /// 1. per-field error map, preferring the OTP-code field, else the first
    ///    field with a message;
    /// 2. top-level `message`;
    /// 3. top-level `title`;
    /// 4. nested `data.message`.
    ///
    /// Returns `None` when no rule matches; the caller falls back to the raw
    /// body text or [`GENERIC_FAILURE_MESSAGE`].
    pub fn message(&self) -> Option<String> {
        if let Some(errors) = &self.errors {
            if let Some(msg) = Self::field_message(errors) {
                return Some(msg);
            }
        }
        if let Some(message) = non_empty(&self.message) {
            return Some(message);
        }
        if let Some(title) = non_empty(&self.title) {
            return Some(title);
        }
        self.data.as_ref().and_then(|d| non_empty(&d.message))
    }

    fn field_message(errors: &BTreeMap<String, Vec<String>>) -> Option<String> {
        // Prefer the OTP-code field regardless of the backend's casing.
        let otp_field = errors
            .iter()
            .find(|(field, _)| field.eq_ignore_ascii_case("otpcode") || field.eq_ignore_ascii_case("otp_code"));

        let preferred = otp_field.or_else(|| errors.iter().next());
        preferred
            .and_then(|(_, messages)| messages.iter().find(|m| !m.trim().is_empty()))
            .cloned()
    }
}

/// Resolve a failure message from an optional decoded envelope and the raw
/// body text, ending with the generic fallback.
pub fn failure_message(envelope: Option<&BackendErrorEnvelope>, raw: Option<&str>) -> String {
    if let Some(msg) = envelope.and_then(BackendErrorEnvelope::message) {
        return msg;
    }
    if let Some(raw) = raw {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    GENERIC_FAILURE_MESSAGE.to_string()
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
