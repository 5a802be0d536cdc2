//! Integration tests for evolutions, their materials and the dashboard.

mod helpers;

use woundcare_core::AppError;
use woundcare_core::error::ErrorKind;
use woundcare_entity::evolution::{EvolutionUpdate, NewMaterial, WoundAssessment};

use helpers::{TestApp, date, new_evolution};

#[tokio::test]
async fn test_blank_material_lines_are_not_persisted() {
    let app = TestApp::new().await;
    let patient = app.create_patient("Maria Santos").await;

    let payload = new_evolution(patient.id, date(2024, 5, 10))
        .with_material(NewMaterial::new("Gaze", "5", Some("L123".to_string())))
        .with_material(NewMaterial::new("", "", Some(String::new())));
    let evolution = app.services.evolutions.create(payload).await.unwrap();

    let rows = app.stored_rows("materials").await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["evolution_id"], evolution.id.to_string());

    let materials = app.services.evolutions.materials(evolution.id).await.unwrap();
    assert_eq!(materials.len(), 1);
    assert_eq!(materials[0].name, "Gaze");
    assert_eq!(materials[0].quantity, "5");
    assert_eq!(materials[0].batch.as_deref(), Some("L123"));
}

#[tokio::test]
async fn test_evolution_without_materials_skips_second_insert() {
    let app = TestApp::new().await;
    let patient = app.create_patient("Maria Santos").await;
    app.memory
        .fail_table("materials", AppError::external("should not be called"))
        .await;

    let evolution = app
        .services
        .evolutions
        .create(new_evolution(patient.id, date(2024, 5, 10)))
        .await
        .unwrap();

    assert_eq!(app.services.evolutions.list().await[0].id, evolution.id);
}

#[tokio::test]
async fn test_materials_failure_is_a_partial_write() {
    let app = TestApp::new().await;
    let patient = app.create_patient("Maria Santos").await;
    app.memory
        .fail_table(
            "materials",
            AppError::authorization("new row violates row-level security policy"),
        )
        .await;

    let payload = new_evolution(patient.id, date(2024, 5, 10))
        .with_material(NewMaterial::new("Gaze", "5", None));
    let err = app.services.evolutions.create(payload).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::PartialWrite);
    assert_eq!(err.message, "new row violates row-level security policy");
    assert_eq!(app.stored_rows("clinical_evolutions").await.len(), 1);
    assert!(app.services.evolutions.list().await.is_empty());

    // The stored evolution shows up on the next fetch.
    assert_eq!(app.services.evolutions.refresh().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_orders_by_visit_date_and_filters_by_patient() {
    let app = TestApp::new().await;
    let maria = app.create_patient("Maria Santos").await;
    let joao = app.create_patient("João Pereira").await;

    for (patient, day) in [(maria.id, 3), (joao.id, 9), (maria.id, 6)] {
        app.services
            .evolutions
            .create(new_evolution(patient, date(2024, 5, day)))
            .await
            .unwrap();
    }

    let all = app.services.evolutions.refresh().await.unwrap();
    let days: Vec<_> = all.iter().map(|e| e.evolution_date).collect();
    assert_eq!(days, vec![date(2024, 5, 9), date(2024, 5, 6), date(2024, 5, 3)]);

    let marias = app.services.evolutions.for_patient(maria.id).await;
    assert_eq!(marias.len(), 2);
    assert!(marias.iter().all(|e| e.patient_id == maria.id));
}

#[tokio::test]
async fn test_update_and_delete_evolution() {
    let app = TestApp::new().await;
    let patient = app.create_patient("Maria Santos").await;
    let evolution = app
        .services
        .evolutions
        .create(new_evolution(patient.id, date(2024, 5, 10)))
        .await
        .unwrap();

    let update = EvolutionUpdate {
        wound_assessment: Some(WoundAssessment {
            exudate: true,
            ..WoundAssessment::default()
        }),
        ..EvolutionUpdate::default()
    };
    let updated = app
        .services
        .evolutions
        .update(evolution.id, update)
        .await
        .unwrap();
    assert_eq!(updated.wound_assessment.findings(), vec!["exudate"]);
    assert_eq!(updated.clinical_description, evolution.clinical_description);

    app.services.evolutions.delete(evolution.id).await.unwrap();
    assert!(app.services.evolutions.list().await.is_empty());
}

#[tokio::test]
async fn test_dashboard_counts() {
    let app = TestApp::new().await;
    let today = date(2024, 5, 10);
    let seen = app.create_patient("Maria Santos").await;
    app.create_patient("João Pereira").await;

    app.services
        .evolutions
        .create(new_evolution(seen.id, today))
        .await
        .unwrap();

    let summary = app.services.dashboard(today).await.unwrap();
    assert_eq!(summary.patients, 2);
    assert_eq!(summary.evolutions_today, 1);
    assert_eq!(summary.photos, 0);
    assert_eq!(summary.pending_patients, 1);
}
