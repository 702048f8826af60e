//! Account creation over REST.

use async_trait::async_trait;
use std::sync::Arc;

use jl_core::errors::ApiFailure;
use jl_core::services::registration::{
    RegisterRequest, RegisterResponse, RegisteredAccount, RegistrationTransport,
};
use jl_shared::types::ApiEnvelope;
use serde::{Deserialize, Serialize};

use super::client::ApiClient;

const REGISTER_PATH: &str = "/register";

/// New accounts start in the active state.
const DEFAULT_ACCOUNT_STATUS: i32 = 1;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterBody<'a> {
    email: &'a str,
    phone_number: &'a str,
    password: &'a str,
    role_id: i32,
    status: i32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterData {
    #[serde(default)]
    user_id: Option<i64>,
    #[serde(default)]
    role_id: Option<i32>,
}

/// REST implementation of the account-creation backend.
pub struct HttpRegistrationGateway {
    api: Arc<ApiClient>,
}

impl HttpRegistrationGateway {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl RegistrationTransport for HttpRegistrationGateway {
    async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, ApiFailure> {
        let body = RegisterBody {
            email: &request.email,
            phone_number: &request.phone_number,
            password: &request.password,
            role_id: request.role.role_id(),
            status: DEFAULT_ACCOUNT_STATUS,
        };

        let response = self.api.post_json(REGISTER_PATH, &body).await?;
        let http_status = response.status;
        let envelope: ApiEnvelope<RegisterData> = response.decode()?;

        Ok(RegisterResponse {
            http_status,
            status_code: envelope.status_code,
            message: envelope.message,
            account: envelope.data.map(|data| RegisteredAccount {
                user_id: data.user_id,
                role_id: data.role_id,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jl_core::domain::value_objects::UserRole;

    #[test]
    fn test_register_body_wire_shape() {
        let request = RegisterRequest {
            email: "a@b.com".to_string(),
            phone_number: "0123456789".to_string(),
            password: "secret".to_string(),
            role: UserRole::Employer,
        };
        let body = RegisterBody {
            email: &request.email,
            phone_number: &request.phone_number,
            password: &request.password,
            role_id: request.role.role_id(),
            status: DEFAULT_ACCOUNT_STATUS,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "email": "a@b.com",
                "phoneNumber": "0123456789",
                "password": "secret",
                "roleId": 3,
                "status": 1
            })
        );
    }

    #[test]
    fn test_register_data_decodes_camel_case() {
        let envelope: ApiEnvelope<RegisterData> = serde_json::from_str(
            r#"{"statusCode":201,"message":"Created","data":{"userId":42,"roleId":4}}"#,
        )
        .unwrap();
        let data = envelope.data.unwrap();
        assert_eq!(data.user_id, Some(42));
        assert_eq!(data.role_id, Some(4));
    }

    #[test]
    fn test_register_data_tolerates_missing_fields() {
        let envelope: ApiEnvelope<RegisterData> =
            serde_json::from_str(r#"{"statusCode":200,"message":"ok","data":{}}"#).unwrap();
        let data = envelope.data.unwrap();
        assert_eq!(data.user_id, None);
        assert_eq!(data.role_id, None);
    }
}
