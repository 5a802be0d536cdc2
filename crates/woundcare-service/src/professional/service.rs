//! Profile of the signed-in professional.
//!
//! The profile row's id is the auth user id, so the list held here has at
//! most one entry.

use std::sync::Arc;

use tracing::info;

use woundcare_auth::SessionManager;
use woundcare_core::result::AppResult;
use woundcare_core::traits::TableGateway;
use woundcare_entity::professional::{NewProfessional, Professional, ProfessionalUpdate};

use crate::store::{EntityCollection, LoadStatus, owner_scope};
use crate::validation::check_payload;

/// Loads, creates and edits the caller's own profile.
#[derive(Debug, Clone)]
pub struct ProfessionalService {
    sessions: SessionManager,
    profile: EntityCollection<Professional>,
}

impl ProfessionalService {
    /// Creates the service without fetching.
    pub fn new(tables: Arc<dyn TableGateway>, sessions: SessionManager) -> Self {
        Self {
            sessions,
            profile: EntityCollection::new(tables),
        }
    }

    /// Creates the service and performs the initial fetch.
    pub async fn load(tables: Arc<dyn TableGateway>, sessions: SessionManager) -> Self {
        let service = Self::new(tables, sessions);
        let _ = service.refresh().await;
        service
    }

    /// Re-fetch the profile. Without a session the held profile is dropped.
    pub async fn refresh(&self) -> AppResult<Option<Professional>> {
        let scope = owner_scope::<Professional>(&self.sessions).await;
        if scope.is_empty() {
            self.profile.clear().await;
            return Ok(None);
        }
        Ok(self.profile.fetch(&scope).await?.into_iter().next())
    }

    /// The locally held profile, if one exists.
    pub async fn profile(&self) -> Option<Professional> {
        self.profile.items().await.into_iter().next()
    }

    /// The local list (zero or one profile).
    pub async fn list(&self) -> Vec<Professional> {
        self.profile.items().await
    }

    /// Fetch status.
    pub async fn status(&self) -> LoadStatus {
        self.profile.status().await
    }

    /// Message of the last failed fetch.
    pub async fn last_error(&self) -> Option<String> {
        self.profile.last_error().await
    }

    /// Create the caller's profile, keyed by their user id.
    ///
    /// A second create for the same user fails with a conflict.
    pub async fn create(&self, payload: NewProfessional) -> AppResult<Professional> {
        let ctx = self.sessions.require_user().await?;
        check_payload(&payload)?;
        let professional = self.profile.create(ctx.user_id, &payload).await?;
        info!(user_id = %ctx.user_id, "Profile created");
        Ok(professional)
    }

    /// Update the caller's profile.
    pub async fn update(&self, update: ProfessionalUpdate) -> AppResult<Professional> {
        let ctx = self.sessions.require_user().await?;
        check_payload(&update)?;
        let professional = self.profile.update(ctx.user_id, &update).await?;
        info!(user_id = %ctx.user_id, "Profile updated");
        Ok(professional)
    }
}
