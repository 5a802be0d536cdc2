//! Local, read-through list caches over remote tables.

pub mod collection;
pub mod scope;
pub mod status;

pub use collection::{EntityCollection, fetch_rows};
pub use scope::owner_scope;
pub use status::LoadStatus;
