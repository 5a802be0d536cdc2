//! Integration tests for sessions and role-scoped admin access.

mod helpers;

use woundcare_core::error::ErrorKind;
use woundcare_core::types::UserRole;
use woundcare_entity::professional::NewProfessional;

use helpers::{PASSWORD, TestApp};

fn profile(name: &str, email: &str, registration: &str) -> NewProfessional {
    NewProfessional {
        full_name: name.to_string(),
        registration_number: registration.to_string(),
        specialty: Some("Estomaterapia".to_string()),
        institution: None,
        email: email.to_string(),
        phone: None,
        photo_url: None,
        digital_signature: None,
    }
}

#[tokio::test]
async fn test_sign_up_then_create_profile() {
    let app = TestApp::anonymous();
    let ctx = app
        .services
        .sessions
        .sign_up("new@example.com", PASSWORD, PASSWORD)
        .await
        .unwrap();
    assert_eq!(ctx.role, UserRole::Professional);

    let created = app
        .services
        .professionals
        .create(profile("Ana Lima", "new@example.com", "COREN-SP 1"))
        .await
        .unwrap();
    assert_eq!(created.id, ctx.user_id);

    let fetched = app.services.professionals.refresh().await.unwrap();
    assert_eq!(fetched.map(|p| p.id), Some(ctx.user_id));
}

#[tokio::test]
async fn test_sign_up_rejects_mismatched_confirmation() {
    let app = TestApp::anonymous();
    let err = app
        .services
        .sessions
        .sign_up("new@example.com", PASSWORD, "different-1")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(err.message, "Passwords do not match");
}

#[tokio::test]
async fn test_sign_up_rejects_short_password() {
    let app = TestApp::anonymous();
    let err = app
        .services
        .sessions
        .sign_up("new@example.com", "12345", "12345")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_wrong_password_is_rejected() {
    let app = TestApp::anonymous();
    app.memory
        .register_user("nurse@example.com", PASSWORD, UserRole::Professional)
        .await;
    let err = app
        .services
        .sessions
        .sign_in("nurse@example.com", "not-the-password")
        .await
        .unwrap_err();
    assert!(err.is_authentication());
    assert!(app.services.sessions.current_user().await.unwrap().is_none());
}

#[tokio::test]
async fn test_sign_out_ends_the_session() {
    let app = TestApp::new().await;
    app.services.sessions.sign_out().await.unwrap();

    let err = app
        .services
        .patients
        .create(helpers::new_patient("Maria Santos"))
        .await
        .unwrap_err();
    assert_eq!(err.message, "User not authenticated");
}

#[tokio::test]
async fn test_professional_cannot_use_admin_panel() {
    let app = TestApp::new().await;
    let err = app
        .services
        .admin
        .list_professionals(None)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);
}

#[tokio::test]
async fn test_admin_lists_searches_and_removes_professionals() {
    let app = TestApp::anonymous();

    let ana = app.sign_in_as("ana@example.com", UserRole::Professional).await;
    app.services
        .professionals
        .create(profile("Ana Lima", "ana@example.com", "COREN-SP 1"))
        .await
        .unwrap();
    app.sign_in_as("bia@example.com", UserRole::Professional).await;
    app.services
        .professionals
        .create(profile("Beatriz Souza", "bia@example.com", "COREN-RJ 2"))
        .await
        .unwrap();

    let admin = app.sign_in_as("admin@example.com", UserRole::Admin).await;
    assert!(admin.is_admin());

    let all = app.services.admin.list_professionals(None).await.unwrap();
    assert_eq!(all.len(), 2);

    let found = app
        .services
        .admin
        .list_professionals(Some("coren-sp"))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, ana.user_id);

    app.services
        .admin
        .remove_professional(ana.user_id)
        .await
        .unwrap();
    let remaining = app.services.admin.list_professionals(None).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].full_name, "Beatriz Souza");

    let err = app
        .services
        .admin
        .remove_professional(ana.user_id)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}
