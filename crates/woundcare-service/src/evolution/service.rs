//! Evolution list and CRUD, including the two-step evolution + materials insert.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use woundcare_auth::SessionManager;
use woundcare_core::error::AppError;
use woundcare_core::result::AppResult;
use woundcare_core::traits::{Record, TableGateway};
use woundcare_core::types::{FilterField, Query, SortField};
use woundcare_entity::evolution::{
    ClinicalEvolution, EvolutionUpdate, Material, NewEvolution,
};

use crate::store::{EntityCollection, LoadStatus, fetch_rows, owner_scope};
use crate::validation::check_payload;

/// The caller's evolutions, most recent visit date first.
#[derive(Debug, Clone)]
pub struct EvolutionService {
    sessions: SessionManager,
    evolutions: EntityCollection<ClinicalEvolution>,
}

impl EvolutionService {
    /// Creates the service without fetching.
    pub fn new(tables: Arc<dyn TableGateway>, sessions: SessionManager) -> Self {
        Self {
            sessions,
            evolutions: EntityCollection::new(tables),
        }
    }

    /// Creates the service and performs the initial fetch.
    pub async fn load(tables: Arc<dyn TableGateway>, sessions: SessionManager) -> Self {
        let service = Self::new(tables, sessions);
        let _ = service.refresh().await;
        service
    }

    /// Re-fetch the list.
    pub async fn refresh(&self) -> AppResult<Vec<ClinicalEvolution>> {
        let scope = owner_scope::<ClinicalEvolution>(&self.sessions).await;
        self.evolutions.fetch(&scope).await
    }

    /// The local list.
    pub async fn list(&self) -> Vec<ClinicalEvolution> {
        self.evolutions.items().await
    }

    /// Locally held evolutions of one patient, in list order.
    pub async fn for_patient(&self, patient_id: Uuid) -> Vec<ClinicalEvolution> {
        self.evolutions
            .filtered(|e| e.patient_id == patient_id)
            .await
    }

    /// Fetch status of the local list.
    pub async fn status(&self) -> LoadStatus {
        self.evolutions.status().await
    }

    /// Message of the last failed fetch.
    pub async fn last_error(&self) -> Option<String> {
        self.evolutions.last_error().await
    }

    /// Record an evolution and its non-blank materials.
    ///
    /// The evolution row is inserted first, then the materials in one
    /// batch. If the materials insert fails the evolution stays stored
    /// remotely, the local list is left as it was, and a
    /// [`AppError::partial_write`] error carrying the materials failure
    /// message is returned.
    pub async fn create(&self, mut payload: NewEvolution) -> AppResult<ClinicalEvolution> {
        let ctx = self.sessions.require_user().await?;
        check_payload(&payload)?;
        let materials = payload.take_materials();

        let row = self.evolutions.owned_row(ctx.user_id, &payload)?;
        let evolution = self.evolutions.insert(row).await?;

        if !materials.is_empty() {
            let rows = materials
                .into_iter()
                .map(|m| m.into_row(evolution.id))
                .collect();
            if let Err(e) = self.evolutions.tables().insert(Material::TABLE, rows).await {
                warn!(
                    evolution_id = %evolution.id,
                    error = %e.message,
                    "Evolution stored but materials insert failed"
                );
                return Err(AppError::partial_write(e.message));
            }
        }

        self.evolutions.prepend(evolution.clone()).await;
        info!(
            user_id = %ctx.user_id,
            evolution_id = %evolution.id,
            patient_id = %evolution.patient_id,
            "Evolution recorded"
        );
        Ok(evolution)
    }

    /// Apply a partial update.
    pub async fn update(&self, id: Uuid, update: EvolutionUpdate) -> AppResult<ClinicalEvolution> {
        check_payload(&update)?;
        self.evolutions.update(id, &update).await
    }

    /// Delete an evolution.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.evolutions.delete(id).await
    }

    /// Materials logged against an evolution, in the order they were added.
    pub async fn materials(&self, evolution_id: Uuid) -> AppResult<Vec<Material>> {
        let query = Query::new()
            .filter(FilterField::eq("evolution_id", evolution_id))
            .order(SortField::asc(Material::ORDER_COLUMN));
        fetch_rows::<Material>(self.evolutions.tables().as_ref(), &query).await
    }
}
