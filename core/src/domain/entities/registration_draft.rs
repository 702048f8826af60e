//! In-progress sign-up record.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::UserRole;

/// The in-progress sign-up record, mutated field-by-field as the user types.
///
/// A draft is created empty when the registration form mounts and stays
/// mutable until OTP dispatch succeeds, at which point the coordinator
/// freezes it into a [`FrozenDraft`] so the payload submitted to account
/// creation is exactly the payload the code was sent for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationDraft {
    pub email: String,
    pub phone_number: String,
    pub password: String,
    pub confirm_password: String,
    pub role: UserRole,
    pub agreed_to_terms: bool,
}

impl RegistrationDraft {
    /// Creates an empty draft for the given account role.
    pub fn new(role: UserRole) -> Self {
        Self {
            email: String::new(),
            phone_number: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            role,
            agreed_to_terms: false,
        }
    }

    /// Freezes the draft into a read-only snapshot.
    pub fn freeze(&self) -> FrozenDraft {
        FrozenDraft {
            email: self.email.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
            password: self.password.clone(),
            role: self.role,
        }
    }
}

/// Read-only snapshot of a draft taken when OTP dispatch succeeds.
///
/// The confirm-password field is dropped here: it exists only for local
/// validation and is never sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrozenDraft {
    email: String,
    phone_number: String,
    password: String,
    role: UserRole,
}

impl FrozenDraft {
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn role(&self) -> UserRole {
        self.role
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_draft_is_empty() {
        let draft = RegistrationDraft::new(UserRole::Candidate);
        assert!(draft.email.is_empty());
        assert!(draft.phone_number.is_empty());
        assert!(!draft.agreed_to_terms);
        assert_eq!(draft.role, UserRole::Candidate);
    }

    #[test]
    fn test_freeze_trims_and_drops_confirm() {
        let mut draft = RegistrationDraft::new(UserRole::Employer);
        draft.email = "  boss@firm.com ".to_string();
        draft.phone_number = " 0123456789 ".to_string();
        draft.password = "abcdef".to_string();
        draft.confirm_password = "abcdef".to_string();

        let frozen = draft.freeze();
        assert_eq!(frozen.email(), "boss@firm.com");
        assert_eq!(frozen.phone_number(), "0123456789");
        assert_eq!(frozen.password(), "abcdef");
        assert_eq!(frozen.role(), UserRole::Employer);
    }
}
