//! Account role, determining post-registration routing and permissions.

use serde::{Deserialize, Serialize};

/// Account type selected during sign-up.
///
/// Wire values are fixed by the backend: Candidate = 4, Employer = 3. Older
/// clients sent 1 for candidates and 2 for employers; those aliases are still
/// normalized on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Candidate,
    Employer,
}

impl UserRole {
    /// The role id sent to and received from the backend.
    pub fn role_id(&self) -> i32 {
        match self {
            UserRole::Candidate => 4,
            UserRole::Employer => 3,
        }
    }

    /// Parse a backend role id, normalizing the legacy aliases 1 -> 4 and
    /// 2 -> 3. Returns `None` for unknown ids.
    pub fn from_role_id(role_id: i32) -> Option<Self> {
        match role_id {
            4 | 1 => Some(UserRole::Candidate),
            3 | 2 => Some(UserRole::Employer),
            _ => None,
        }
    }
}
