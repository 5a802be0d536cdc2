//! Session lifecycle manager: sign-in, sign-up, sign-out and refresh flows.

use std::sync::Arc;

use tracing::{debug, info};

use woundcare_core::error::AppError;
use woundcare_core::result::AppResult;
use woundcare_core::traits::AuthProvider;

use crate::password::PasswordValidator;

use super::context::SessionContext;

/// Drives the auth provider and resolves the caller's [`SessionContext`].
#[derive(Debug, Clone)]
pub struct SessionManager {
    /// The hosted auth API (or an in-memory stand-in).
    provider: Arc<dyn AuthProvider>,
    /// Sign-up password policy.
    validator: PasswordValidator,
}

impl SessionManager {
    /// Creates a manager over an auth provider with the default password policy.
    pub fn new(provider: Arc<dyn AuthProvider>) -> Self {
        Self {
            provider,
            validator: PasswordValidator::default(),
        }
    }

    /// Replaces the sign-up password policy.
    pub fn with_validator(mut self, validator: PasswordValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Signs in with email and password and returns the resulting context.
    pub async fn sign_in(&self, email: &str, password: &str) -> AppResult<SessionContext> {
        let email = normalize_email(email)?;
        let session = self.provider.sign_in_with_password(&email, password).await?;
        let context = SessionContext::from(session.user);
        info!(user_id = %context.user_id, role = %context.role, "Session started");
        Ok(context)
    }

    /// Registers a new account.
    ///
    /// Rejects mismatched confirmations and short passwords before any
    /// remote call.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        confirmation: &str,
    ) -> AppResult<SessionContext> {
        let email = normalize_email(email)?;
        self.validator.validate(password, confirmation)?;
        let user = self.provider.sign_up(&email, password).await?;
        info!(user_id = %user.id, "Account created");
        Ok(SessionContext::from(user))
    }

    /// Ends the current session. Succeeds when no session is held.
    pub async fn sign_out(&self) -> AppResult<()> {
        self.provider.sign_out().await
    }

    /// Exchanges the refresh token for a new session.
    pub async fn refresh(&self) -> AppResult<SessionContext> {
        let session = self.provider.refresh_session().await?;
        debug!(user_id = %session.user.id, "Session refreshed");
        Ok(SessionContext::from(session.user))
    }

    /// The current caller, if a session is active.
    pub async fn current_user(&self) -> AppResult<Option<SessionContext>> {
        Ok(self
            .provider
            .current_user()
            .await?
            .map(SessionContext::from))
    }

    /// The current caller, or "User not authenticated".
    pub async fn require_user(&self) -> AppResult<SessionContext> {
        self.current_user()
            .await?
            .ok_or_else(AppError::not_authenticated)
    }

    /// The current caller if they hold the admin role.
    pub async fn require_admin(&self) -> AppResult<SessionContext> {
        let context = self.require_user().await?;
        context.require_admin()?;
        Ok(context)
    }
}

fn normalize_email(email: &str) -> AppResult<String> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::validation("A valid email address is required"));
    }
    Ok(email.to_string())
}
