//! Integration tests for photo upload and the photo list.

mod helpers;

use bytes::Bytes;

use woundcare_core::AppError;
use woundcare_core::error::ErrorKind;
use woundcare_entity::photo::{NewWoundPhoto, WoundPhotoUpdate};
use woundcare_service::PhotoDetails;

use helpers::{TestApp, date};

const BUCKET: &str = "photos";

fn jpeg_of(len: usize) -> Bytes {
    let mut data = vec![0u8; len];
    data[..3].copy_from_slice(&[0xFF, 0xD8, 0xFF]);
    Bytes::from(data)
}

#[tokio::test]
async fn test_upload_then_create_puts_newest_photo_first() {
    let app = TestApp::new().await;
    let patient = app.create_patient("Maria Santos").await;
    let photos = &app.services.photos;

    let older_url = photos
        .upload_binary("older.png", Bytes::from_static(b"\x89PNG"))
        .await
        .unwrap();
    photos
        .create(NewWoundPhoto::new(patient.id, older_url, date(2024, 5, 1)))
        .await
        .unwrap();

    let url = photos
        .upload_binary("ferida.jpeg", jpeg_of(2 * 1024 * 1024))
        .await
        .unwrap();
    assert!(url.ends_with(".jpeg"));
    assert!(url.starts_with("memory://storage/photos/wound-photos/"));

    let photo = photos
        .create(NewWoundPhoto::new(patient.id, url.clone(), date(2024, 5, 10)))
        .await
        .unwrap();

    let list = photos.refresh().await.unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].id, photo.id);
    assert_eq!(list[0].photo_url, url);

    let path = url
        .strip_prefix("memory://storage/photos/")
        .unwrap()
        .to_string();
    let object = app.memory.object(BUCKET, &path).await.unwrap();
    assert_eq!(object.content_type, "image/jpeg");
    assert_eq!(object.data.len(), 2 * 1024 * 1024);
}

#[tokio::test]
async fn test_oversized_upload_is_rejected() {
    let app = TestApp::new().await;
    let err = app
        .services
        .photos
        .upload_binary("huge.jpg", jpeg_of(10 * 1024 * 1024 + 1))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert!(app.memory.object_paths(BUCKET).await.is_empty());
}

#[tokio::test]
async fn test_file_name_without_extension_is_rejected() {
    let app = TestApp::new().await;
    let err = app
        .services
        .photos
        .upload_binary("ferida", jpeg_of(16))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_storage_failure_creates_no_record() {
    let app = TestApp::new().await;
    let patient = app.create_patient("Maria Santos").await;
    app.memory
        .fail_bucket(BUCKET, AppError::storage("Bucket not found"))
        .await;

    let err = app
        .services
        .photos
        .upload_and_create(
            "ferida.jpg",
            jpeg_of(64),
            PhotoDetails::new(patient.id, date(2024, 5, 10)),
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Storage);
    assert!(app.stored_rows("wound_photos").await.is_empty());
}

#[tokio::test]
async fn test_failed_metadata_insert_removes_the_upload() {
    let app = TestApp::new().await;
    let patient = app.create_patient("Maria Santos").await;
    app.memory
        .fail_table("wound_photos", AppError::service_unavailable("timeout"))
        .await;

    let err = app
        .services
        .photos
        .upload_and_create(
            "ferida.jpg",
            jpeg_of(64),
            PhotoDetails::new(patient.id, date(2024, 5, 10)),
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::ServiceUnavailable);
    assert!(app.memory.object_paths(BUCKET).await.is_empty());
}

#[tokio::test]
async fn test_upload_and_create_records_details() {
    let app = TestApp::new().await;
    let patient = app.create_patient("Maria Santos").await;

    let mut details = PhotoDetails::new(patient.id, date(2024, 5, 10));
    details.wound_type = Some("Lesão por pressão".to_string());
    details.wound_stage = Some("Estágio 2".to_string());

    let photo = app
        .services
        .photos
        .upload_and_create("sacral.webp", Bytes::from_static(b"RIFF"), details)
        .await
        .unwrap();

    assert_eq!(photo.wound_stage.as_deref(), Some("Estágio 2"));
    assert!(photo.photo_url.ends_with(".webp"));
    assert_eq!(app.services.photos.for_patient(patient.id).await.len(), 1);
}

#[tokio::test]
async fn test_update_changes_only_patched_fields() {
    let app = TestApp::new().await;
    let patient = app.create_patient("Maria Santos").await;
    let photos = &app.services.photos;

    let mut details = PhotoDetails::new(patient.id, date(2024, 5, 1));
    details.wound_type = Some("Lesão por pressão".to_string());
    details.comments = Some("Primeira avaliação".to_string());
    let older = photos
        .upload_and_create("sacral.jpg", jpeg_of(64), details)
        .await
        .unwrap();
    let newer = photos
        .upload_and_create(
            "calcaneo.jpg",
            jpeg_of(64),
            PhotoDetails::new(patient.id, date(2024, 5, 10)),
        )
        .await
        .unwrap();
    let before = photos.refresh().await.unwrap();
    assert_eq!(before[1].id, older.id);

    let update = WoundPhotoUpdate {
        wound_stage: Some("Estágio 3".to_string()),
        ..WoundPhotoUpdate::default()
    };
    let updated = photos.update(older.id, update).await.unwrap();

    assert_eq!(updated.id, older.id);
    assert_eq!(updated.wound_stage.as_deref(), Some("Estágio 3"));
    assert_eq!(updated.wound_type, older.wound_type);
    assert_eq!(updated.comments, older.comments);
    assert_eq!(updated.photo_url, older.photo_url);
    assert_eq!(updated.photo_date, older.photo_date);
    assert_eq!(updated.patient_id, patient.id);

    let list = photos.list().await;
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].id, newer.id);
    assert_eq!(list[1], updated);

    let stored = app.stored_rows("wound_photos").await;
    let row = stored
        .iter()
        .find(|r| r["id"] == older.id.to_string())
        .unwrap();
    assert_eq!(row["wound_stage"], "Estágio 3");
    assert_eq!(row["photo_url"], older.photo_url.as_str());
}

#[tokio::test]
async fn test_delete_keeps_the_stored_object() {
    let app = TestApp::new().await;
    let patient = app.create_patient("Maria Santos").await;
    let photo = app
        .services
        .photos
        .upload_and_create(
            "ferida.jpg",
            jpeg_of(64),
            PhotoDetails::new(patient.id, date(2024, 5, 10)),
        )
        .await
        .unwrap();

    app.services.photos.delete(photo.id).await.unwrap();

    assert!(app.services.photos.list().await.is_empty());
    assert_eq!(app.memory.object_paths(BUCKET).await.len(), 1);
}

#[tokio::test]
async fn test_create_without_session_is_rejected() {
    let app = TestApp::new().await;
    let patient = app.create_patient("Maria Santos").await;
    app.services.sessions.sign_out().await.unwrap();

    let err = app
        .services
        .photos
        .create(NewWoundPhoto::new(
            patient.id,
            "memory://storage/photos/x.jpg",
            date(2024, 5, 10),
        ))
        .await
        .unwrap_err();
    assert_eq!(err.message, "User not authenticated");
    assert!(app.services.photos.list().await.is_empty());
}
