//! Core traits defined in `woundcare-core` and implemented by other crates.

pub mod auth;
pub mod record;
pub mod storage;
pub mod table;

pub use auth::{AuthProvider, AuthSession, AuthUser};
pub use record::Record;
pub use storage::ObjectStorage;
pub use table::TableGateway;
