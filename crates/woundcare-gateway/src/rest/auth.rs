//! Password authentication over `/auth/v1`.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::Method;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info, warn};
use uuid::Uuid;

use woundcare_core::result::AppResult;
use woundcare_core::traits::{AuthProvider, AuthSession, AuthUser};
use woundcare_core::types::UserRole;
use woundcare_core::AppError;

use super::RestGateway;

/// Successful token grant.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_in: Option<i64>,
    expires_at: Option<i64>,
    user: RemoteUser,
}

impl TokenResponse {
    fn into_session(self) -> AuthSession {
        let expires_at = self
            .expires_at
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
            .or_else(|| self.expires_in.map(|secs| Utc::now() + Duration::seconds(secs)));
        AuthSession {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user.into(),
        }
    }
}

/// User object as returned by the auth API.
#[derive(Debug, Deserialize)]
struct RemoteUser {
    id: Uuid,
    email: Option<String>,
    #[serde(default)]
    app_metadata: AppMetadata,
}

/// Server-controlled metadata; only the service role can write it.
#[derive(Debug, Default, Deserialize)]
struct AppMetadata {
    role: Option<String>,
}

impl From<RemoteUser> for AuthUser {
    fn from(user: RemoteUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: UserRole::from_claim(user.app_metadata.role.as_deref()),
        }
    }
}

impl RestGateway {
    async fn grant(&self, grant_type: &str, body: Value) -> AppResult<AuthSession> {
        let url = self.endpoint(
            "/auth/v1/token",
            &[("grant_type".to_string(), grant_type.to_string())],
        )?;
        let builder = self.request(Method::POST, url).await.json(&body);
        let token: TokenResponse = self.send_json(builder).await?;
        let session = token.into_session();
        self.set_session(Some(session.clone())).await;
        Ok(session)
    }
}

#[async_trait]
impl AuthProvider for RestGateway {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        debug!(email, "Signing in");
        let session = self
            .grant("password", json!({ "email": email, "password": password }))
            .await?;
        info!(user_id = %session.user.id, "Signed in");
        Ok(session)
    }

    async fn sign_up(&self, email: &str, password: &str) -> AppResult<AuthUser> {
        let url = self.endpoint("/auth/v1/signup", &[])?;
        let builder = self
            .request(Method::POST, url)
            .await
            .json(&json!({ "email": email, "password": password }));
        let body: Value = self.send_json(builder).await?;

        // With email confirmation disabled the service answers with a full
        // session; otherwise with the bare (unconfirmed) user.
        let user = if body.get("access_token").is_some() {
            let session = serde_json::from_value::<TokenResponse>(body)?.into_session();
            let user = session.user.clone();
            self.set_session(Some(session)).await;
            user
        } else {
            let raw = match body.get("user") {
                Some(user) if user.is_object() => user.clone(),
                _ => body,
            };
            serde_json::from_value::<RemoteUser>(raw)?.into()
        };

        info!(user_id = %user.id, "Account registered");
        Ok(user)
    }

    async fn sign_out(&self) -> AppResult<()> {
        let Some(session) = self.session.write().await.take() else {
            return Ok(());
        };
        let url = self.endpoint("/auth/v1/logout", &[])?;
        let builder = self
            .http
            .post(url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&session.access_token);
        if let Err(e) = self.send(builder).await {
            warn!(user_id = %session.user.id, error = %e, "Remote sign-out failed; local session dropped");
        }
        info!(user_id = %session.user.id, "Signed out");
        Ok(())
    }

    async fn refresh_session(&self) -> AppResult<AuthSession> {
        let refresh_token = self
            .session()
            .await
            .map(|s| s.refresh_token)
            .ok_or_else(AppError::not_authenticated)?;
        let session = self
            .grant("refresh_token", json!({ "refresh_token": refresh_token }))
            .await?;
        debug!(user_id = %session.user.id, "Session refreshed");
        Ok(session)
    }

    async fn current_user(&self) -> AppResult<Option<AuthUser>> {
        if self.session().await.is_none() {
            return Ok(None);
        }
        let url = self.endpoint("/auth/v1/user", &[])?;
        let builder = self.request(Method::GET, url).await;
        let user: AuthUser = match self.send_json::<RemoteUser>(builder).await {
            Ok(remote) => remote.into(),
            Err(e) if e.is_authentication() => {
                debug!("Held session rejected; dropping it");
                self.set_session(None).await;
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        if let Some(session) = self.session.write().await.as_mut() {
            session.user = user.clone();
        }
        Ok(Some(user))
    }
}
