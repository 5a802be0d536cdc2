//! Patient list and CRUD for the signed-in professional.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use woundcare_auth::{PasswordHasher, SessionManager};
use woundcare_core::error::AppError;
use woundcare_core::result::AppResult;
use woundcare_core::traits::{Record, TableGateway};
use woundcare_core::types::{FilterField, Query};
use woundcare_entity::patient::{NewPatient, Patient, PatientUpdate};

use crate::store::{EntityCollection, LoadStatus, fetch_rows, owner_scope};
use crate::validation::check_payload;

/// The caller's patients, newest registration first.
#[derive(Debug, Clone)]
pub struct PatientService {
    sessions: SessionManager,
    patients: EntityCollection<Patient>,
    hasher: PasswordHasher,
}

impl PatientService {
    /// Creates the service without fetching.
    pub fn new(tables: Arc<dyn TableGateway>, sessions: SessionManager) -> Self {
        Self {
            sessions,
            patients: EntityCollection::new(tables),
            hasher: PasswordHasher::new(),
        }
    }

    /// Creates the service and performs the initial fetch.
    ///
    /// A failed fetch is recorded in [`Self::last_error`], not returned.
    pub async fn load(tables: Arc<dyn TableGateway>, sessions: SessionManager) -> Self {
        let service = Self::new(tables, sessions);
        let _ = service.refresh().await;
        service
    }

    /// Re-fetch the list.
    pub async fn refresh(&self) -> AppResult<Vec<Patient>> {
        let scope = owner_scope::<Patient>(&self.sessions).await;
        self.patients.fetch(&scope).await
    }

    /// The local list.
    pub async fn list(&self) -> Vec<Patient> {
        self.patients.items().await
    }

    /// Fetch status of the local list.
    pub async fn status(&self) -> LoadStatus {
        self.patients.status().await
    }

    /// Message of the last failed fetch.
    pub async fn last_error(&self) -> Option<String> {
        self.patients.last_error().await
    }

    /// Register a patient owned by the current user.
    ///
    /// A plaintext access password set with [`NewPatient::protect_with`] is
    /// replaced by its Argon2 hash before the insert.
    pub async fn create(&self, mut payload: NewPatient) -> AppResult<Patient> {
        let ctx = self.sessions.require_user().await?;
        check_payload(&payload)?;

        payload.seal_access(|password| self.hasher.hash_password(password))?;

        let patient = self.patients.create(ctx.user_id, &payload).await?;
        info!(user_id = %ctx.user_id, patient_id = %patient.id, "Patient registered");
        Ok(patient)
    }

    /// Apply a partial update.
    pub async fn update(&self, id: Uuid, update: PatientUpdate) -> AppResult<Patient> {
        check_payload(&update)?;
        self.patients.update(id, &update).await
    }

    /// Delete a patient.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.patients.delete(id).await
    }

    /// Check a patient's access password.
    ///
    /// Unprotected patients always pass; a protected record without a
    /// stored hash never does.
    pub async fn verify_access(&self, id: Uuid, password: &str) -> AppResult<bool> {
        let patient = match self.patients.find(id).await {
            Some(patient) => patient,
            None => {
                let query = Query::new().filter(FilterField::eq("id", id)).limit(1);
                fetch_rows::<Patient>(self.patients.tables().as_ref(), &query)
                    .await?
                    .into_iter()
                    .next()
                    .ok_or_else(|| {
                        AppError::not_found(format!("{} row {id} not found", Patient::TABLE))
                    })?
            }
        };

        if !patient.password_protected {
            return Ok(true);
        }
        match patient.password_hash.as_deref() {
            Some(hash) => self.hasher.verify_password(password, hash),
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use woundcare_core::error::ErrorKind;
    use woundcare_core::types::UserRole;
    use woundcare_entity::patient::Gender;
    use woundcare_gateway::MemoryGateway;

    use super::*;

    fn new_patient(name: &str) -> NewPatient {
        NewPatient::new(
            name,
            NaiveDate::from_ymd_opt(1948, 7, 2).unwrap(),
            Gender::Masculino,
            "Pé diabético",
        )
    }

    async fn signed_in(memory: &MemoryGateway) -> PatientService {
        memory
            .register_user("nurse@example.com", "secret1", UserRole::Professional)
            .await;
        let sessions = SessionManager::new(Arc::new(memory.clone()));
        sessions.sign_in("nurse@example.com", "secret1").await.unwrap();
        PatientService::load(Arc::new(memory.clone()), sessions).await
    }

    #[tokio::test]
    async fn test_create_without_session_fails_and_keeps_list() {
        let memory = MemoryGateway::new();
        let sessions = SessionManager::new(Arc::new(memory.clone()));
        let service = PatientService::load(Arc::new(memory.clone()), sessions).await;

        let err = service.create(new_patient("João Lima")).await.unwrap_err();
        assert_eq!(err.message, "User not authenticated");
        assert!(service.list().await.is_empty());
        assert!(memory.rows("patients").await.is_empty());
    }

    #[tokio::test]
    async fn test_list_is_scoped_to_owner() {
        let memory = MemoryGateway::new();
        memory
            .seed(
                "patients",
                vec![serde_json::json!({
                    "id": Uuid::new_v4(),
                    "professional_id": Uuid::new_v4(),
                    "full_name": "Someone Else",
                    "birth_date": "1970-01-01",
                    "gender": "outro",
                    "main_diagnosis": "-",
                    "password_protected": false,
                    "created_at": "2024-01-01T00:00:00Z",
                    "updated_at": "2024-01-01T00:00:00Z"
                })],
            )
            .await;
        let service = signed_in(&memory).await;
        assert!(service.list().await.is_empty());

        service.create(new_patient("João Lima")).await.unwrap();
        let fetched = service.refresh().await.unwrap();
        assert_eq!(fetched.len(), 1);
        assert_eq!(fetched[0].full_name, "João Lima");
    }

    #[tokio::test]
    async fn test_validation_runs_before_insert() {
        let memory = MemoryGateway::new();
        let service = signed_in(&memory).await;
        let mut payload = new_patient("João Lima");
        payload.email = Some("not-an-email".into());

        let err = service.create(payload).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.message, "Invalid email format");
        assert!(memory.rows("patients").await.is_empty());
    }

    #[tokio::test]
    async fn test_access_password_is_hashed_and_verified() {
        let memory = MemoryGateway::new();
        let service = signed_in(&memory).await;
        let patient = service
            .create(new_patient("João Lima").protect_with("2468"))
            .await
            .unwrap();

        assert!(patient.password_protected);
        let stored = memory.rows("patients").await;
        let hash = stored[0]["password_hash"].as_str().unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(!stored[0].to_string().contains("\"2468\""));

        assert!(service.verify_access(patient.id, "2468").await.unwrap());
        assert!(!service.verify_access(patient.id, "0000").await.unwrap());

        let open = service.create(new_patient("Ana Dias")).await.unwrap();
        assert!(service.verify_access(open.id, "anything").await.unwrap());
    }

    #[tokio::test]
    async fn test_raw_hash_in_input_does_not_protect_patient() {
        let memory = MemoryGateway::new();
        let service = signed_in(&memory).await;
        let mut value = serde_json::to_value(new_patient("João Lima")).unwrap();
        value["password_protected"] = serde_json::json!(true);
        value["password_hash"] = serde_json::json!("2468");
        let payload: NewPatient = serde_json::from_value(value).unwrap();

        let patient = service.create(payload).await.unwrap();
        assert!(!patient.password_protected);
        assert!(patient.password_hash.is_none());
        assert!(memory.rows("patients").await[0]["password_hash"].is_null());
        assert!(service.verify_access(patient.id, "anything").await.unwrap());
    }
}
