//! Evolution text templates.
//!
//! Declared for the `evolution_templates` table; no service manages them yet.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use woundcare_core::traits::Record;

/// Reusable boilerplate for clinical descriptions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionTemplate {
    pub id: Uuid,
    pub professional_id: Uuid,
    pub name: String,
    pub content: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for EvolutionTemplate {
    const TABLE: &'static str = "evolution_templates";
    const ORDER_COLUMN: &'static str = "created_at";
    const OWNER_COLUMN: Option<&'static str> = Some("professional_id");

    fn id(&self) -> Uuid {
        self.id
    }
}
