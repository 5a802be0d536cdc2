//! Admin panel: browse and remove professional accounts.
//!
//! Access is decided by the role claim on the caller's session.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use woundcare_auth::SessionManager;
use woundcare_core::error::AppError;
use woundcare_core::result::AppResult;
use woundcare_core::traits::{Record, TableGateway};
use woundcare_core::types::{FilterField, Query, SortField};
use woundcare_entity::professional::Professional;

use crate::store::fetch_rows;

/// Professional management for admin sessions.
#[derive(Debug, Clone)]
pub struct AdminService {
    tables: Arc<dyn TableGateway>,
    sessions: SessionManager,
}

impl AdminService {
    /// Creates a new admin service.
    pub fn new(tables: Arc<dyn TableGateway>, sessions: SessionManager) -> Self {
        Self { tables, sessions }
    }

    /// All professionals, newest first, optionally narrowed by a
    /// case-insensitive search over name, email and registration number.
    pub async fn list_professionals(&self, search: Option<&str>) -> AppResult<Vec<Professional>> {
        self.sessions.require_admin().await?;
        let query = Query::new().order(SortField::desc(Professional::ORDER_COLUMN));
        let professionals = fetch_rows::<Professional>(self.tables.as_ref(), &query).await?;

        let needle = search.map(str::trim).unwrap_or_default().to_lowercase();
        if needle.is_empty() {
            return Ok(professionals);
        }
        Ok(professionals
            .into_iter()
            .filter(|p| matches_search(p, &needle))
            .collect())
    }

    /// Delete a professional's profile row.
    pub async fn remove_professional(&self, id: Uuid) -> AppResult<()> {
        let admin = self.sessions.require_admin().await?;
        let removed = self
            .tables
            .delete(Professional::TABLE, &[FilterField::eq("id", id)])
            .await?;
        if removed.is_empty() {
            return Err(AppError::not_found(format!("Professional {id} not found")));
        }
        info!(admin_id = %admin.user_id, professional_id = %id, "Professional removed");
        Ok(())
    }
}

fn matches_search(professional: &Professional, needle: &str) -> bool {
    [
        &professional.full_name,
        &professional.email,
        &professional.registration_number,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}
