//! Context carrying the authenticated user and their role.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use woundcare_core::result::AppResult;
use woundcare_core::traits::AuthUser;
use woundcare_core::types::UserRole;

use crate::rbac::RbacEnforcer;

/// Who is acting.
///
/// Built from the user record the auth service returns for the current
/// token, so the role is a server-side claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    /// The authenticated user's ID; owner key for every record they create.
    pub user_id: Uuid,
    /// Login email.
    pub email: Option<String>,
    /// Role claim.
    pub role: UserRole,
}

impl SessionContext {
    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Fails with an authorization error unless the user is an admin.
    pub fn require_admin(&self) -> AppResult<()> {
        RbacEnforcer::new().require_minimum_role(&self.role, &UserRole::Admin)
    }
}

impl From<AuthUser> for SessionContext {
    fn from(user: AuthUser) -> Self {
        Self {
            user_id: user.id,
            email: user.email,
            role: user.role,
        }
    }
}
