//! Types for OTP session results.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Result of a successful code dispatch
#[derive(Debug, Clone)]
pub struct CodeDispatch {
    /// Challenge the code belongs to
    pub challenge_id: Uuid,

    /// When the dispatch was accepted
    pub dispatched_at: DateTime<Utc>,

    /// When the user can request another code
    pub next_resend_at: DateTime<Utc>,
}
