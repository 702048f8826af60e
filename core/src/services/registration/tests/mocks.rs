//! Mock collaborators for registration coordinator tests.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::errors::ApiFailure;
use crate::services::registration::traits::{
    Destination, Navigator, RegisterRequest, RegisterResponse, RegisteredAccount,
    RegistrationTransport,
};

/// Scripted account-creation transport recording every request.
pub struct MockRegistrationTransport {
    pub requests: Mutex<Vec<RegisterRequest>>,
    pub response: Mutex<Result<RegisterResponse, ApiFailure>>,
}

impl MockRegistrationTransport {
    /// Transport answering with a plain 200 envelope and no payload.
    pub fn new() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            response: Mutex::new(Ok(RegisterResponse {
                http_status: 200,
                status_code: 200,
                message: Some("Registered".to_string()),
                account: None,
            })),
        }
    }

    /// Transport answering with a created account.
    pub fn created(http_status: u16, user_id: i64, role_id: i32) -> Self {
        let transport = Self::new();
        transport.respond_with(RegisterResponse {
            http_status,
            status_code: http_status,
            message: Some("Registered".to_string()),
            account: Some(RegisteredAccount {
                user_id: Some(user_id),
                role_id: Some(role_id),
            }),
        });
        transport
    }

    pub fn respond_with(&self, response: RegisterResponse) {
        *self.response.lock().unwrap() = Ok(response);
    }

    pub fn fail_with(&self, failure: ApiFailure) {
        *self.response.lock().unwrap() = Err(failure);
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl RegistrationTransport for MockRegistrationTransport {
    async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, ApiFailure> {
        self.requests.lock().unwrap().push(request.clone());
        self.response.lock().unwrap().clone()
    }
}

/// Navigator recording every destination it is asked to open.
pub struct MockNavigator {
    pub destinations: Mutex<Vec<Destination>>,
}

impl MockNavigator {
    pub fn new() -> Self {
        Self {
            destinations: Mutex::new(Vec::new()),
        }
    }

    pub fn visited(&self) -> Vec<Destination> {
        self.destinations.lock().unwrap().clone()
    }
}

impl Navigator for MockNavigator {
    fn navigate(&self, destination: Destination) {
        self.destinations.lock().unwrap().push(destination);
    }
}
