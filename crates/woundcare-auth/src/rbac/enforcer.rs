//! RBAC enforcement: checks a session role against a required minimum.

use woundcare_core::error::AppError;
use woundcare_core::types::UserRole;

/// Enforces the role hierarchy `Admin > Professional`.
#[derive(Debug, Clone, Default)]
pub struct RbacEnforcer;

impl RbacEnforcer {
    /// Creates a new enforcer.
    pub fn new() -> Self {
        Self
    }

    /// Fails with an authorization error when `actual` ranks below `minimum`.
    pub fn require_minimum_role(
        &self,
        actual: &UserRole,
        minimum: &UserRole,
    ) -> Result<(), AppError> {
        if role_level(actual) >= role_level(minimum) {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "Role '{actual}' is insufficient; minimum required: '{minimum}'"
            )))
        }
    }

    /// Returns whether the role is an admin.
    pub fn is_admin(&self, role: &UserRole) -> bool {
        role.is_admin()
    }
}

fn role_level(role: &UserRole) -> u8 {
    match role {
        UserRole::Professional => 0,
        UserRole::Admin => 1,
    }
}
