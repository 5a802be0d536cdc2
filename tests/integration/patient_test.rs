//! Integration tests for the patient list and its mutations.

mod helpers;

use uuid::Uuid;

use woundcare_core::AppError;
use woundcare_core::error::ErrorKind;
use woundcare_core::types::UserRole;
use woundcare_entity::patient::PatientUpdate;
use woundcare_service::LoadStatus;

use helpers::{TestApp, new_patient};

#[tokio::test]
async fn test_create_adds_exactly_one_entry() {
    let app = TestApp::new().await;
    app.create_patient("Maria Santos").await;
    let before = app.services.patients.list().await.len();

    let created = app.create_patient("João Pereira").await;
    let list = app.services.patients.list().await;

    assert_eq!(list.len(), before + 1);
    assert_eq!(list.iter().filter(|p| p.id == created.id).count(), 1);
    assert_eq!(list[0].id, created.id);
}

#[tokio::test]
async fn test_update_changes_only_patched_fields() {
    let app = TestApp::new().await;
    let created = app.create_patient("Maria Santos").await;

    let update = PatientUpdate {
        phone: Some("(11) 99999-0000".to_string()),
        ..PatientUpdate::default()
    };
    app.services.patients.update(created.id, update).await.unwrap();

    let list = app.services.patients.list().await;
    let updated = list.iter().find(|p| p.id == created.id).unwrap();
    assert_eq!(updated.phone.as_deref(), Some("(11) 99999-0000"));
    assert_eq!(updated.full_name, created.full_name);
    assert_eq!(updated.main_diagnosis, created.main_diagnosis);
    assert_eq!(updated.birth_date, created.birth_date);
}

#[tokio::test]
async fn test_empty_update_is_rejected() {
    let app = TestApp::new().await;
    let created = app.create_patient("Maria Santos").await;
    let err = app
        .services
        .patients
        .update(created.id, PatientUpdate::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_update_of_unknown_id_is_not_found() {
    let app = TestApp::new().await;
    let update = PatientUpdate {
        observations: Some("x".to_string()),
        ..PatientUpdate::default()
    };
    let err = app
        .services
        .patients
        .update(Uuid::new_v4(), update)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_delete_removes_from_list_and_table() {
    let app = TestApp::new().await;
    let keep = app.create_patient("Maria Santos").await;
    let gone = app.create_patient("João Pereira").await;

    app.services.patients.delete(gone.id).await.unwrap();

    let list = app.services.patients.list().await;
    assert!(list.iter().all(|p| p.id != gone.id));
    assert!(list.iter().any(|p| p.id == keep.id));
    assert_eq!(app.stored_rows("patients").await.len(), 1);

    // Already gone remotely: still succeeds.
    app.services.patients.delete(gone.id).await.unwrap();
}

#[tokio::test]
async fn test_create_without_session_leaves_list_unchanged() {
    let app = TestApp::new().await;
    app.create_patient("Maria Santos").await;
    app.services.sessions.sign_out().await.unwrap();

    let err = app
        .services
        .patients
        .create(new_patient("João Pereira"))
        .await
        .unwrap_err();

    assert!(err.is_authentication());
    assert_eq!(err.message, "User not authenticated");
    assert_eq!(app.services.patients.list().await.len(), 1);
    assert_eq!(app.stored_rows("patients").await.len(), 1);
}

#[tokio::test]
async fn test_refetch_is_idempotent() {
    let app = TestApp::new().await;
    for name in ["Maria Santos", "João Pereira", "Ana Costa"] {
        app.create_patient(name).await;
    }

    let first = app.services.patients.refresh().await.unwrap();
    let second = app.services.patients.refresh().await.unwrap();

    assert_eq!(first.len(), 3);
    assert_eq!(first, second);
    assert_eq!(app.services.patients.status().await, LoadStatus::Ready);
}

#[tokio::test]
async fn test_failed_fetch_keeps_last_known_rows() {
    let app = TestApp::new().await;
    app.create_patient("Maria Santos").await;
    app.services.patients.refresh().await.unwrap();

    app.memory
        .fail_table("patients", AppError::service_unavailable("connection refused"))
        .await;
    let err = app.services.patients.refresh().await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::ServiceUnavailable);
    assert_eq!(app.services.patients.status().await, LoadStatus::Failed);
    assert_eq!(
        app.services.patients.last_error().await.as_deref(),
        Some("connection refused")
    );
    assert_eq!(app.services.patients.list().await.len(), 1);

    app.memory.clear_failures().await;
    app.services.patients.refresh().await.unwrap();
    assert_eq!(app.services.patients.last_error().await, None);
}

#[tokio::test]
async fn test_list_is_scoped_to_the_signed_in_professional() {
    let app = TestApp::new().await;
    app.create_patient("Maria Santos").await;

    app.sign_in_as("other@example.com", UserRole::Professional)
        .await;
    app.create_patient("João Pereira").await;

    let visible = app.services.patients.refresh().await.unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].full_name, "João Pereira");
    assert_eq!(app.stored_rows("patients").await.len(), 2);
}

#[tokio::test]
async fn test_protected_patient_requires_access_password() {
    let app = TestApp::new().await;
    let protected = app
        .services
        .patients
        .create(new_patient("Maria Santos").protect_with("1234-abcd"))
        .await
        .unwrap();
    let open = app.create_patient("João Pereira").await;

    assert!(protected.password_protected);
    let stored = app.stored_rows("patients").await;
    assert!(!serde_json::to_string(&stored).unwrap().contains("1234-abcd"));

    let patients = &app.services.patients;
    assert!(patients.verify_access(protected.id, "1234-abcd").await.unwrap());
    assert!(!patients.verify_access(protected.id, "wrong").await.unwrap());
    assert!(patients.verify_access(open.id, "anything").await.unwrap());
}

#[tokio::test]
async fn test_invalid_payload_is_rejected_before_insert() {
    let app = TestApp::new().await;
    let mut payload = new_patient("Maria Santos");
    payload.email = Some("not-an-email".to_string());

    let err = app.services.patients.create(payload).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert!(app.stored_rows("patients").await.is_empty());
}
