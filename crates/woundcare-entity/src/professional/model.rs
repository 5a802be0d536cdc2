//! Professional entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use woundcare_core::traits::Record;

/// The clinician profile of an authenticated user.
///
/// The row id is the auth user id, so there is exactly one profile per
/// account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Professional {
    /// Equal to the auth user id.
    pub id: Uuid,
    /// Full name.
    pub full_name: String,
    /// Professional council registration (e.g. `COREN-SP 123456`).
    pub registration_number: String,
    /// Clinical specialty.
    pub specialty: Option<String>,
    /// Hospital or clinic.
    pub institution: Option<String>,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    pub phone: Option<String>,
    /// Profile photo URL.
    pub photo_url: Option<String>,
    /// Stored signature image or text.
    pub digital_signature: Option<String>,
    /// When the profile was created.
    pub created_at: DateTime<Utc>,
    /// When the profile was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Record for Professional {
    const TABLE: &'static str = "professionals";
    const ORDER_COLUMN: &'static str = "created_at";
    const OWNER_COLUMN: Option<&'static str> = Some("id");

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Data required to create a profile. The id is taken from the session.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewProfessional {
    /// Full name.
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    /// Professional council registration.
    #[validate(length(min = 1, message = "Registration number is required"))]
    pub registration_number: String,
    /// Clinical specialty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    /// Hospital or clinic.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    /// Contact email; usually the login email.
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    /// Contact phone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Profile photo URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    /// Stored signature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digital_signature: Option<String>,
}

/// Partial update of a profile. Unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProfessionalUpdate {
    /// New full name.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Full name cannot be empty"))]
    pub full_name: Option<String>,
    /// New registration number.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Registration number cannot be empty"))]
    pub registration_number: Option<String>,
    /// New specialty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    /// New institution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    /// New contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    /// New phone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// New photo URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    /// New signature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digital_signature: Option<String>,
}
