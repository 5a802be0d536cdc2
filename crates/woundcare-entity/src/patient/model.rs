//! Patient entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use woundcare_core::traits::Record;

use super::gender::Gender;

/// A registered patient, owned by the professional who created it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    /// Unique patient identifier.
    pub id: Uuid,
    /// Owning professional.
    pub professional_id: Uuid,
    /// Full name.
    pub full_name: String,
    /// Date of birth.
    pub birth_date: NaiveDate,
    /// Gender.
    pub gender: Gender,
    /// Contact phone.
    pub phone: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Main diagnosis.
    pub main_diagnosis: String,
    /// Free-text observations.
    pub observations: Option<String>,
    /// Name of the person responsible for the patient.
    pub responsible_name: Option<String>,
    /// Phone of the person responsible for the patient.
    pub responsible_phone: Option<String>,
    /// Whether viewing the record requires the access password.
    #[serde(default)]
    pub password_protected: bool,
    /// Argon2 hash of the access password (never serialized back out).
    #[serde(default, skip_serializing)]
    pub password_hash: Option<String>,
    /// Patient photo URL.
    pub photo_url: Option<String>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Patient {
    /// Age in whole years on the given day.
    pub fn age_on(&self, today: NaiveDate) -> u32 {
        today.years_since(self.birth_date).unwrap_or(0)
    }
}

impl Record for Patient {
    const TABLE: &'static str = "patients";
    const ORDER_COLUMN: &'static str = "created_at";
    const OWNER_COLUMN: Option<&'static str> = Some("professional_id");

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Data required to register a patient. The owner is stamped from the session.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewPatient {
    /// Full name.
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    /// Date of birth.
    pub birth_date: NaiveDate,
    /// Gender.
    pub gender: Gender,
    /// Contact phone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    /// Main diagnosis.
    #[validate(length(min = 1, message = "Main diagnosis is required"))]
    pub main_diagnosis: String,
    /// Free-text observations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
    /// Responsible person's name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsible_name: Option<String>,
    /// Responsible person's phone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsible_phone: Option<String>,
    /// Patient photo URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    /// Whether the record is password protected. Set only by [`Self::protect_with`].
    #[serde(skip_deserializing)]
    password_protected: bool,
    /// Argon2 hash of the access password, filled in by [`Self::seal_access`].
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    password_hash: Option<String>,
    /// Plaintext access password, hashed before the payload leaves the process.
    #[serde(skip)]
    access_password: Option<String>,
}

impl NewPatient {
    /// Minimal payload with the required fields.
    pub fn new(
        full_name: impl Into<String>,
        birth_date: NaiveDate,
        gender: Gender,
        main_diagnosis: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            birth_date,
            gender,
            phone: None,
            email: None,
            main_diagnosis: main_diagnosis.into(),
            observations: None,
            responsible_name: None,
            responsible_phone: None,
            photo_url: None,
            password_protected: false,
            password_hash: None,
            access_password: None,
        }
    }

    /// Require an access password to view this patient.
    pub fn protect_with(mut self, password: impl Into<String>) -> Self {
        self.password_protected = true;
        self.access_password = Some(password.into());
        self
    }

    /// Whether an access password was requested.
    pub fn is_protected(&self) -> bool {
        self.password_protected
    }

    /// Replace the plaintext access password with the output of `hash`.
    ///
    /// Does nothing for unprotected payloads.
    pub fn seal_access<F, E>(&mut self, hash: F) -> Result<(), E>
    where
        F: FnOnce(&str) -> Result<String, E>,
    {
        if let Some(password) = self.access_password.take() {
            self.password_hash = Some(hash(&password)?);
        }
        Ok(())
    }
}

/// Partial update of a patient. Unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PatientUpdate {
    /// New full name.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Full name cannot be empty"))]
    pub full_name: Option<String>,
    /// New date of birth.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    /// New gender.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    /// New phone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// New email.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    /// New main diagnosis.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_diagnosis: Option<String>,
    /// New observations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
    /// New responsible name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsible_name: Option<String>,
    /// New responsible phone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsible_phone: Option<String>,
    /// New photo URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewPatient {
        NewPatient::new(
            "Maria Santos",
            NaiveDate::from_ymd_opt(1950, 3, 14).unwrap(),
            Gender::Feminino,
            "Úlcera venosa",
        )
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let value = serde_json::to_value(sample()).unwrap();
        assert!(value.get("phone").is_none());
        assert!(value.get("access_password").is_none());
        assert_eq!(value["gender"], "feminino");
        assert_eq!(value["birth_date"], "1950-03-14");
    }

    #[test]
    fn test_protect_with_keeps_plaintext_off_the_wire() {
        let payload = sample().protect_with("1234");
        assert!(payload.is_protected());
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["password_protected"], true);
        assert!(!value.to_string().contains("1234"));
    }

    #[test]
    fn test_protection_fields_are_not_accepted_from_input() {
        let payload: NewPatient = serde_json::from_value(serde_json::json!({
            "full_name": "Maria Santos",
            "birth_date": "1950-03-14",
            "gender": "feminino",
            "main_diagnosis": "Úlcera venosa",
            "password_protected": true,
            "password_hash": "plaintext-secret"
        }))
        .unwrap();
        assert!(!payload.is_protected());
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["password_protected"], false);
        assert!(value.get("password_hash").is_none());
    }

    #[test]
    fn test_seal_access_replaces_plaintext_with_hash() {
        let mut payload = sample().protect_with("1234");
        payload
            .seal_access(|pw| Ok::<_, ()>(format!("hashed:{}", pw.len())))
            .unwrap();
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["password_hash"], "hashed:4");

        let mut open = sample();
        open.seal_access(|_| Err("hasher must not run")).unwrap();
        assert!(serde_json::to_value(&open).unwrap().get("password_hash").is_none());
    }

    #[test]
    fn test_validation_rejects_blank_name() {
        let mut payload = sample();
        payload.full_name = String::new();
        assert!(payload.validate().is_err());
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_update_serializes_only_set_fields() {
        let update = PatientUpdate {
            phone: Some("11 99999-0000".into()),
            ..Default::default()
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value.as_object().unwrap().len(), 1);
    }

    #[test]
    fn test_age_on() {
        let patient: Patient = serde_json::from_value(serde_json::json!({
            "id": Uuid::new_v4(),
            "professional_id": Uuid::new_v4(),
            "full_name": "Maria Santos",
            "birth_date": "1950-03-14",
            "gender": "feminino",
            "phone": null,
            "email": null,
            "main_diagnosis": "Úlcera venosa",
            "observations": null,
            "responsible_name": null,
            "responsible_phone": null,
            "password_protected": true,
            "password_hash": "$argon2id$...",
            "photo_url": null,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(patient.password_hash.as_deref(), Some("$argon2id$..."));
        assert_eq!(patient.age_on(NaiveDate::from_ymd_opt(2024, 3, 13).unwrap()), 73);
        assert_eq!(patient.age_on(NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()), 74);
    }
}
