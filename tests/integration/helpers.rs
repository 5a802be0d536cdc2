//! Shared test helpers for integration tests.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use woundcare_auth::SessionContext;
use woundcare_core::config::StorageConfig;
use woundcare_core::types::UserRole;
use woundcare_entity::evolution::NewEvolution;
use woundcare_entity::patient::{Gender, NewPatient, Patient};
use woundcare_gateway::{Gateway, MemoryGateway};
use woundcare_service::AppServices;

/// Password used for every test account.
pub const PASSWORD: &str = "secret-123";
/// The default professional account.
pub const NURSE_EMAIL: &str = "nurse@example.com";

/// Test application context
pub struct TestApp {
    /// In-process stand-in for the hosted service
    pub memory: MemoryGateway,
    /// All services wired to `memory`
    pub services: AppServices,
}

impl TestApp {
    /// Services over an empty gateway, nobody signed in
    pub fn anonymous() -> Self {
        let memory = MemoryGateway::new();
        let services = AppServices::new(&Gateway::in_memory(&memory), StorageConfig::default());
        Self { memory, services }
    }

    /// Services with the default professional signed in
    pub async fn new() -> Self {
        let app = Self::anonymous();
        app.sign_in_as(NURSE_EMAIL, UserRole::Professional).await;
        app
    }

    /// Register an account with `role` and switch the session to it
    pub async fn sign_in_as(&self, email: &str, role: UserRole) -> SessionContext {
        self.memory.register_user(email, PASSWORD, role).await;
        self.services
            .sessions
            .sign_in(email, PASSWORD)
            .await
            .expect("Failed to sign in test user")
    }

    /// Register a patient with the required fields only
    pub async fn create_patient(&self, name: &str) -> Patient {
        self.services
            .patients
            .create(new_patient(name))
            .await
            .expect("Failed to create test patient")
    }

    /// Rows currently stored in `table`
    pub async fn stored_rows(&self, table: &str) -> Vec<serde_json::Value> {
        self.memory.rows(table).await
    }
}

/// A valid patient payload
pub fn new_patient(name: &str) -> NewPatient {
    NewPatient::new(name, date(1950, 3, 14), Gender::Feminino, "Úlcera venosa")
}

/// A valid evolution payload for `patient_id` on `on`
pub fn new_evolution(patient_id: Uuid, on: NaiveDate) -> NewEvolution {
    NewEvolution::new(
        patient_id,
        on,
        NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
        "Ferida em granulação, sem sinais de infecção",
    )
}

/// Shorthand for a calendar date
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
