//! Quick consultation records.
//!
//! Declared for the `quick_consultations` table; no service manages them yet.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use woundcare_core::traits::Record;

/// A short visit logged without a full patient registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickConsultation {
    pub id: Uuid,
    pub professional_id: Uuid,
    pub patient_name: String,
    pub procedure: String,
    pub observation: Option<String>,
    pub consultation_datetime: DateTime<Utc>,
    pub location_coordinates: Option<String>,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Record for QuickConsultation {
    const TABLE: &'static str = "quick_consultations";
    const ORDER_COLUMN: &'static str = "consultation_datetime";
    const OWNER_COLUMN: Option<&'static str> = Some("professional_id");

    fn id(&self) -> Uuid {
        self.id
    }
}
