//! Result of account creation following a verified OTP.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::UserRole;

/// Outcome of the account-creation call.
///
/// Created exactly once per attempt, right after a verified challenge
/// triggers account creation; consumed by the redirect step and never
/// mutated afterward. A backend rejection is an outcome too, not an error:
/// the user stays in a recoverable state with the message displayed inline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationOutcome {
    /// Id of the created user, when the backend returned one
    pub created_user_id: Option<i64>,

    /// Role the backend recorded for the new account
    pub created_role_id: Option<UserRole>,

    /// Whether the account was created
    pub succeeded: bool,

    /// Message to display when the attempt failed
    pub error_message: Option<String>,
}

impl RegistrationOutcome {
    /// Successful creation.
    pub fn success(created_user_id: Option<i64>, created_role_id: Option<UserRole>) -> Self {
        Self {
            created_user_id,
            created_role_id,
            succeeded: true,
            error_message: None,
        }
    }

    /// Failed creation with a display message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            created_user_id: None,
            created_role_id: None,
            succeeded: false,
            error_message: Some(message.into()),
        }
    }
}
