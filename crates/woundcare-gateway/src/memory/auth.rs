//! Auth operations for [`MemoryGateway`].

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tracing::info;
use uuid::Uuid;

use woundcare_core::AppError;
use woundcare_core::result::AppResult;
use woundcare_core::traits::{AuthProvider, AuthSession, AuthUser};
use woundcare_core::types::UserRole;

use super::{MemoryGateway, MemoryUser};

/// Lifetime of issued access tokens.
const SESSION_TTL_SECONDS: i64 = 3600;

fn issue(user: AuthUser) -> AuthSession {
    AuthSession {
        access_token: format!("mem-access-{}", Uuid::new_v4()),
        refresh_token: format!("mem-refresh-{}", Uuid::new_v4()),
        expires_at: Some(Utc::now() + Duration::seconds(SESSION_TTL_SECONDS)),
        user,
    }
}

#[async_trait]
impl AuthProvider for MemoryGateway {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let mut state = self.state.write().await;
        let user = state
            .users
            .get(&email.to_lowercase())
            .filter(|u| u.password == password)
            .map(|u| u.user.clone())
            .ok_or_else(|| AppError::authentication("Invalid login credentials"))?;

        let session = issue(user);
        state.session = Some(session.clone());
        info!(user_id = %session.user.id, "Signed in");
        Ok(session)
    }

    async fn sign_up(&self, email: &str, password: &str) -> AppResult<AuthUser> {
        let mut state = self.state.write().await;
        let key = email.to_lowercase();
        if state.users.contains_key(&key) {
            return Err(AppError::conflict("User already registered"));
        }
        let user = AuthUser {
            id: Uuid::new_v4(),
            email: Some(email.to_string()),
            role: UserRole::Professional,
        };
        state.users.insert(
            key,
            MemoryUser {
                password: password.to_string(),
                user: user.clone(),
            },
        );
        state.session = Some(issue(user.clone()));
        info!(user_id = %user.id, "Account registered");
        Ok(user)
    }

    async fn sign_out(&self) -> AppResult<()> {
        if let Some(session) = self.state.write().await.session.take() {
            info!(user_id = %session.user.id, "Signed out");
        }
        Ok(())
    }

    async fn refresh_session(&self) -> AppResult<AuthSession> {
        let mut state = self.state.write().await;
        let user = state
            .session
            .as_ref()
            .map(|s| s.user.clone())
            .ok_or_else(AppError::not_authenticated)?;
        let session = issue(user);
        state.session = Some(session.clone());
        Ok(session)
    }

    async fn current_user(&self) -> AppResult<Option<AuthUser>> {
        let state = self.state.read().await;
        Ok(state
            .session
            .as_ref()
            .filter(|s| !s.is_expired())
            .map(|s| s.user.clone()))
    }
}
