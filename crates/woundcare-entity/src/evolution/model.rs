//! Clinical evolution entity model.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use woundcare_core::traits::Record;

use super::assessment::WoundAssessment;
use super::material::NewMaterial;

/// A dated progress note for one patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicalEvolution {
    /// Unique evolution id.
    pub id: Uuid,
    /// Patient the note is about.
    pub patient_id: Uuid,
    /// Author.
    pub professional_id: Uuid,
    /// Date of the visit.
    pub evolution_date: NaiveDate,
    /// Time of the visit.
    pub evolution_time: NaiveTime,
    /// Clinical description.
    pub clinical_description: String,
    /// Procedures performed.
    pub procedures: Option<String>,
    /// Observations.
    pub observations: Option<String>,
    /// Wound checklist.
    #[serde(default)]
    pub wound_assessment: WoundAssessment,
    /// Signature captured with the note.
    pub digital_signature: Option<String>,
    /// `lat,lng` where the note was taken.
    pub location_coordinates: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for ClinicalEvolution {
    const TABLE: &'static str = "clinical_evolutions";
    const ORDER_COLUMN: &'static str = "evolution_date";
    const OWNER_COLUMN: Option<&'static str> = Some("professional_id");

    fn id(&self) -> Uuid {
        self.id
    }
}

/// A new evolution plus the materials used during the visit.
///
/// `materials` is not part of the evolution row; it is inserted into the
/// materials table after the evolution exists.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewEvolution {
    /// Patient the note is about.
    pub patient_id: Uuid,
    /// Date of the visit.
    pub evolution_date: NaiveDate,
    /// Time of the visit.
    pub evolution_time: NaiveTime,
    /// Clinical description.
    #[validate(length(min = 1, message = "Clinical description is required"))]
    pub clinical_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub procedures: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
    #[serde(default)]
    pub wound_assessment: WoundAssessment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digital_signature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_coordinates: Option<String>,
    /// Material lines; blank ones are discarded on create.
    #[serde(default, skip_serializing)]
    pub materials: Vec<NewMaterial>,
}

impl NewEvolution {
    /// Minimal payload with the required fields.
    pub fn new(
        patient_id: Uuid,
        evolution_date: NaiveDate,
        evolution_time: NaiveTime,
        clinical_description: impl Into<String>,
    ) -> Self {
        Self {
            patient_id,
            evolution_date,
            evolution_time,
            clinical_description: clinical_description.into(),
            procedures: None,
            observations: None,
            wound_assessment: WoundAssessment::default(),
            digital_signature: None,
            location_coordinates: None,
            materials: Vec::new(),
        }
    }

    /// Append a material line.
    pub fn with_material(mut self, material: NewMaterial) -> Self {
        self.materials.push(material);
        self
    }

    /// Split the material lines off the payload, dropping blank ones.
    pub fn take_materials(&mut self) -> Vec<NewMaterial> {
        std::mem::take(&mut self.materials)
            .into_iter()
            .filter(|m| !m.is_blank())
            .collect()
    }
}

/// Partial update of an evolution. Unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct EvolutionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evolution_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evolution_time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Clinical description cannot be empty"))]
    pub clinical_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub procedures: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wound_assessment: Option<WoundAssessment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digital_signature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_coordinates: Option<String>,
}
