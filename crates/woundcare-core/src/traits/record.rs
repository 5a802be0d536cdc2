//! Typed rows stored in a remote table.

use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

/// A row type bound to one remote table.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Table holding rows of this type.
    const TABLE: &'static str;

    /// Column the local list is ordered by, newest first.
    const ORDER_COLUMN: &'static str;

    /// Column stamped with the session user id on insert, if any.
    const OWNER_COLUMN: Option<&'static str>;

    /// Primary key.
    fn id(&self) -> Uuid;
}
