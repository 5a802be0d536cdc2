//! Session lifecycle and the authenticated caller's context.

pub mod context;
pub mod manager;

pub use context::SessionContext;
pub use manager::SessionManager;
