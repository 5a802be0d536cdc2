//! Material entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use woundcare_core::traits::Record;

/// A consumable logged against one evolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Unique material row id.
    pub id: Uuid,
    /// Owning evolution.
    pub evolution_id: Uuid,
    /// Item name.
    pub name: String,
    /// Free-text quantity ("5", "2 rolos").
    pub quantity: String,
    /// Lot number.
    pub batch: Option<String>,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
}

impl Record for Material {
    const TABLE: &'static str = "materials";
    const ORDER_COLUMN: &'static str = "created_at";
    const OWNER_COLUMN: Option<&'static str> = None;

    fn id(&self) -> Uuid {
        self.id
    }
}

/// A material line as entered alongside a new evolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewMaterial {
    /// Item name; blank lines are dropped.
    pub name: String,
    /// Free-text quantity.
    #[serde(default)]
    pub quantity: String,
    /// Lot number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch: Option<String>,
}

impl NewMaterial {
    /// Build a material line.
    pub fn new(name: impl Into<String>, quantity: impl Into<String>, batch: Option<String>) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
            batch,
        }
    }

    /// Whether the line has no name and should not be persisted.
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty()
    }

    /// Insert row linking this material to an evolution.
    ///
    /// An empty batch is sent as absent.
    pub fn into_row(self, evolution_id: Uuid) -> serde_json::Value {
        let mut row = serde_json::json!({
            "evolution_id": evolution_id,
            "name": self.name,
            "quantity": self.quantity,
        });
        if let Some(batch) = self.batch.filter(|b| !b.trim().is_empty()) {
            row["batch"] = serde_json::Value::String(batch);
        }
        row
    }
}
