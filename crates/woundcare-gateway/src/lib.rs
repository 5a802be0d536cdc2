//! # woundcare-gateway
//!
//! Implementations of the gateway traits from `woundcare-core`:
//!
//! - [`rest::RestGateway`] talks to the hosted service over HTTP
//!   (`/rest/v1`, `/auth/v1`, `/storage/v1`).
//! - [`memory::MemoryGateway`] keeps everything in process, with failure
//!   injection for exercising error paths.
//!
//! [`Gateway`] bundles the three trait objects the services consume.

pub mod bundle;
pub mod memory;
pub mod rest;

pub use bundle::Gateway;
pub use memory::MemoryGateway;
pub use rest::RestGateway;

use woundcare_core::error::AppError;
use woundcare_core::result::AppResult;
use woundcare_core::types::FilterField;

/// Unfiltered updates and deletes would touch every row.
pub(crate) fn require_filters(filters: &[FilterField], action: &str) -> AppResult<()> {
    if filters.is_empty() {
        return Err(AppError::validation(format!(
            "Refusing to {action} without a row filter"
        )));
    }
    Ok(())
}
