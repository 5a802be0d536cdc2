//! Authentication exposed by the hosted service.

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::result::AppResult;
use crate::types::role::UserRole;

/// The user record the auth service reports for the current token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Auth user id; equals the professional row id.
    pub id: Uuid,
    /// Login email, if the service returned one.
    pub email: Option<String>,
    /// Role claim resolved server-side.
    pub role: UserRole,
}

/// A live session: bearer token, refresh token, and the user it belongs to.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthSession {
    /// Bearer token attached to every request.
    pub access_token: String,
    /// Token exchanged for a new session when the access token expires.
    pub refresh_token: String,
    /// When the access token stops being accepted.
    pub expires_at: Option<DateTime<Utc>>,
    /// The authenticated user.
    pub user: AuthUser,
}

impl AuthSession {
    /// Whether the access token has expired (sessions without an expiry never do).
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Utc::now() >= at)
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .field("user", &self.user)
            .finish()
    }
}

/// Password-based authentication with a single held session.
#[async_trait]
pub trait AuthProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Exchange credentials for a session and hold it.
    async fn sign_in_with_password(&self, email: &str, password: &str) -> AppResult<AuthSession>;

    /// Register a new account. A session is held if the service issues one.
    async fn sign_up(&self, email: &str, password: &str) -> AppResult<AuthUser>;

    /// Drop the held session (and revoke it remotely when possible).
    async fn sign_out(&self) -> AppResult<()>;

    /// Trade the held refresh token for a new session.
    async fn refresh_session(&self) -> AppResult<AuthSession>;

    /// Ask the service who the held token belongs to.
    ///
    /// Returns `Ok(None)` when no session is held or the service no longer
    /// accepts it.
    async fn current_user(&self) -> AppResult<Option<AuthUser>>;
}
