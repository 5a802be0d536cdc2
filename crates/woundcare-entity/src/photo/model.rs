//! Wound photo entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use woundcare_core::traits::Record;

/// Metadata for an uploaded wound image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WoundPhoto {
    /// Unique photo id.
    pub id: Uuid,
    /// Patient pictured.
    pub patient_id: Uuid,
    /// Professional who took the photo.
    pub professional_id: Uuid,
    /// Public URL of the stored image.
    pub photo_url: String,
    /// Date the photo was taken.
    pub photo_date: NaiveDate,
    /// Wound type (e.g. "Úlcera por pressão").
    pub wound_type: Option<String>,
    /// Wound stage.
    pub wound_stage: Option<String>,
    /// Free-text comments.
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for WoundPhoto {
    const TABLE: &'static str = "wound_photos";
    const ORDER_COLUMN: &'static str = "photo_date";
    const OWNER_COLUMN: Option<&'static str> = Some("professional_id");

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Metadata row for an image that has already been uploaded.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewWoundPhoto {
    pub patient_id: Uuid,
    /// URL returned by the upload step.
    #[validate(length(min = 1, message = "Photo URL is required"))]
    pub photo_url: String,
    pub photo_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wound_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wound_stage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

impl NewWoundPhoto {
    /// Minimal payload with the required fields.
    pub fn new(patient_id: Uuid, photo_url: impl Into<String>, photo_date: NaiveDate) -> Self {
        Self {
            patient_id,
            photo_url: photo_url.into(),
            photo_date,
            wound_type: None,
            wound_stage: None,
            comments: None,
        }
    }
}

/// Partial update of a photo's metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct WoundPhotoUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wound_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wound_stage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}
