//! Account password policy for sign-up.

use woundcare_core::error::AppError;

/// Shortest password the hosted auth service accepts by default.
const DEFAULT_MIN_LENGTH: usize = 6;

/// Validates new account passwords before they are sent to the auth service.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length in characters.
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a validator with the given minimum length.
    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }

    /// Checks length and that the confirmation matches.
    pub fn validate(&self, password: &str, confirmation: &str) -> Result<(), AppError> {
        if password != confirmation {
            return Err(AppError::validation("Passwords do not match"));
        }
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }
        Ok(())
    }
}

impl Default for PasswordValidator {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_LENGTH)
    }
}
