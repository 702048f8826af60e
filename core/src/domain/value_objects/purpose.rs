//! Purpose of an OTP dispatch.

use serde::{Deserialize, Serialize};

/// Why a one-time code is being sent to an address.
///
/// The registration flow only uses `AccountVerification`; `PasswordReset` is
/// reserved for the recovery flow that shares the same OTP backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OtpPurpose {
    AccountVerification,
    PasswordReset,
}

impl OtpPurpose {
    /// The numeric purpose value the backend expects.
    pub fn wire_value(&self) -> i32 {
        match self {
            OtpPurpose::AccountVerification => 1,
            OtpPurpose::PasswordReset => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_values() {
        assert_eq!(OtpPurpose::AccountVerification.wire_value(), 1);
        assert_eq!(OtpPurpose::PasswordReset.wire_value(), 2);
    }
}
