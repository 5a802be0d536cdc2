//! Core type definitions used across the WoundCare workspace.

pub mod filter;
pub mod query;
pub mod role;
pub mod sorting;

pub use filter::{FilterField, FilterOp, FilterValue};
pub use query::Query;
pub use role::UserRole;
pub use sorting::{SortDirection, SortField};
