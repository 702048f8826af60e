//! Transport and navigation seams for the registration coordinator.

use async_trait::async_trait;

use crate::domain::value_objects::UserRole;
use crate::errors::ApiFailure;

/// Account-creation request assembled from a frozen draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterRequest {
    pub email: String,
    pub phone_number: String,
    pub password: String,
    pub role: UserRole,
}

/// Payload of a created account, as reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisteredAccount {
    pub user_id: Option<i64>,
    pub role_id: Option<i32>,
}

/// A decoded `/register` response.
///
/// The backend is inconsistent about status codes on this endpoint, so the
/// transport reports everything it saw (HTTP status, envelope statusCode,
/// message, payload) and the coordinator decides what counts as success.
#[derive(Debug, Clone, Default)]
pub struct RegisterResponse {
    pub http_status: u16,
    pub status_code: u16,
    pub message: Option<String>,
    pub account: Option<RegisteredAccount>,
}

/// Trait for the account-creation backend integration.
#[async_trait]
pub trait RegistrationTransport: Send + Sync {
    /// Issue the account-creation request.
    ///
    /// `Ok` means a decodable response arrived, whatever its status codes
    /// say; `Err` means the request failed at the transport level or the
    /// body was not decodable.
    async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, ApiFailure>;
}

/// Post-registration destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// Candidate onboarding screen
    EmployeeProfileSetup,
    /// Employer onboarding screen
    EmployerProfileSetup,
}

/// Trait for the navigation service consuming redirects.
pub trait Navigator: Send + Sync {
    fn navigate(&self, destination: Destination);
}
