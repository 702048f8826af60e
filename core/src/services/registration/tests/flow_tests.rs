//! End-to-end flow test: draft -> dispatch -> verify -> create -> redirect.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::RegistrationDraft;
use crate::domain::value_objects::{OtpPurpose, UserRole};
use crate::services::registration::config::RegistrationConfig;
use crate::services::registration::service::RegistrationCoordinator;
use crate::services::registration::traits::Destination;
use crate::services::verification::tests::mocks::MockOtpTransport;
use crate::services::verification::{OtpSessionConfig, OtpVerificationSession};

use super::mocks::{MockNavigator, MockRegistrationTransport};

#[tokio::test(start_paused = true)]
async fn test_candidate_happy_path_ends_at_employee_setup() {
    let otp_transport = Arc::new(MockOtpTransport::new());
    let register_transport = Arc::new(MockRegistrationTransport::created(200, 7, 4));
    let navigator = Arc::new(MockNavigator::new());

    let mut draft = RegistrationDraft::new(UserRole::Candidate);
    draft.email = "a@b.com".to_string();
    draft.phone_number = "0123456789".to_string();
    draft.password = "abcdef".to_string();
    draft.confirm_password = "abcdef".to_string();
    draft.agreed_to_terms = true;

    let session = OtpVerificationSession::new(
        Arc::clone(&otp_transport),
        draft.email.clone(),
        OtpPurpose::AccountVerification,
        OtpSessionConfig::default(),
    );
    let coordinator = RegistrationCoordinator::new(
        Arc::clone(&register_transport),
        Arc::clone(&navigator),
        RegistrationConfig::default(),
    );

    // Validate and dispatch the code
    assert!(coordinator.validate(&draft).is_ok());
    let frozen = coordinator.submit(&draft, &session).await.unwrap();
    assert_eq!(otp_transport.send_count(), 1);

    // The user types the code from their inbox
    session.verify_code("1234").await.unwrap();
    assert!(session.is_verified());

    // Account creation against the verified challenge
    let outcome = coordinator
        .complete_registration(&frozen, &session.challenge())
        .await
        .unwrap();
    assert!(outcome.succeeded);
    assert_eq!(outcome.created_user_id, Some(7));
    assert_eq!(outcome.created_role_id, Some(UserRole::Candidate));

    // Redirect fires after the fixed delay
    assert!(navigator.visited().is_empty());
    for _ in 0..3 {
        tokio::time::advance(Duration::from_millis(1000)).await;
        tokio::task::yield_now().await;
    }
    assert_eq!(navigator.visited(), vec![Destination::EmployeeProfileSetup]);

    // Posted payload matches the frozen draft
    let requests = register_transport.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].email, "a@b.com");
    assert_eq!(requests[0].role, UserRole::Candidate);
}
