//! Generic list store for one remote table.
//!
//! The remote table is the system of record. Every mutation is applied
//! remotely first; only after it succeeds is the local list patched.
//! Concurrent fetches are not fenced: whichever response arrives last
//! overwrites the list.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use woundcare_core::error::{AppError, ErrorKind};
use woundcare_core::result::AppResult;
use woundcare_core::traits::{Record, TableGateway};
use woundcare_core::types::{FilterField, Query, SortField};

use super::status::LoadStatus;

struct ListState<E> {
    items: Vec<E>,
    status: LoadStatus,
    last_error: Option<String>,
}

impl<E> Default for ListState<E> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            status: LoadStatus::Idle,
            last_error: None,
        }
    }
}

/// Newest-first local mirror of one table plus CRUD that keeps it patched.
///
/// Clones share the same list.
pub struct EntityCollection<E: Record> {
    tables: Arc<dyn TableGateway>,
    state: Arc<RwLock<ListState<E>>>,
}

impl<E: Record> Clone for EntityCollection<E> {
    fn clone(&self) -> Self {
        Self {
            tables: Arc::clone(&self.tables),
            state: Arc::clone(&self.state),
        }
    }
}

impl<E: Record> fmt::Debug for EntityCollection<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityCollection")
            .field("table", &E::TABLE)
            .field("gateway", &self.tables.gateway_type())
            .finish()
    }
}

impl<E: Record> EntityCollection<E> {
    /// An empty, never-fetched collection.
    pub fn new(tables: Arc<dyn TableGateway>) -> Self {
        Self {
            tables,
            state: Arc::new(RwLock::new(ListState::default())),
        }
    }

    /// The gateway this collection reads through.
    pub fn tables(&self) -> &Arc<dyn TableGateway> {
        &self.tables
    }

    /// Snapshot of the local list.
    pub async fn items(&self) -> Vec<E> {
        self.state.read().await.items.clone()
    }

    /// Number of locally held records.
    pub async fn len(&self) -> usize {
        self.state.read().await.items.len()
    }

    /// Whether the local list is empty.
    pub async fn is_empty(&self) -> bool {
        self.state.read().await.items.is_empty()
    }

    /// Current fetch status.
    pub async fn status(&self) -> LoadStatus {
        self.state.read().await.status
    }

    /// Message of the last failed fetch, cleared by the next success.
    pub async fn last_error(&self) -> Option<String> {
        self.state.read().await.last_error.clone()
    }

    /// A locally held record by id.
    pub async fn find(&self, id: Uuid) -> Option<E> {
        self.state
            .read()
            .await
            .items
            .iter()
            .find(|item| item.id() == id)
            .cloned()
    }

    /// Locally held records matching a predicate, in list order.
    pub async fn filtered(&self, predicate: impl Fn(&E) -> bool) -> Vec<E> {
        self.state
            .read()
            .await
            .items
            .iter()
            .filter(|item| predicate(item))
            .cloned()
            .collect()
    }

    /// Replace the list with a fresh fetch, newest first.
    ///
    /// On failure the previous items are kept and the error message is
    /// recorded as [`Self::last_error`].
    pub async fn fetch(&self, scope: &[FilterField]) -> AppResult<Vec<E>> {
        self.state.write().await.status = LoadStatus::Loading;

        let query = scope
            .iter()
            .cloned()
            .fold(Query::new(), Query::filter)
            .order(SortField::desc(E::ORDER_COLUMN));
        let result = fetch_rows::<E>(self.tables.as_ref(), &query).await;

        let mut state = self.state.write().await;
        match result {
            Ok(items) => {
                debug!(table = E::TABLE, count = items.len(), "List refreshed");
                state.items = items.clone();
                state.status = LoadStatus::Ready;
                state.last_error = None;
                Ok(items)
            }
            Err(e) => {
                warn!(
                    table = E::TABLE,
                    error = %e.message,
                    kept = state.items.len(),
                    "List fetch failed; keeping last known rows"
                );
                state.status = LoadStatus::Failed;
                state.last_error = Some(e.message.clone());
                Err(e)
            }
        }
    }

    /// Drop every local record and mark the list as loaded.
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        state.items.clear();
        state.status = LoadStatus::Ready;
        state.last_error = None;
    }

    /// Insert one row remotely without touching the local list.
    pub async fn insert(&self, row: Value) -> AppResult<E> {
        debug!(table = E::TABLE, "Inserting row");
        let stored = self
            .tables
            .insert(E::TABLE, vec![row])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                AppError::internal(format!("Insert into {} returned no rows", E::TABLE))
            })?;
        decode_row(stored)
    }

    /// Put a record at the head of the local list.
    pub async fn prepend(&self, item: E) {
        self.state.write().await.items.insert(0, item);
    }

    /// Serialize a payload and stamp the record's owner column with `owner`.
    pub fn owned_row<P: Serialize>(&self, owner: Uuid, payload: &P) -> AppResult<Value> {
        let mut row = serde_json::to_value(payload)?;
        let Some(fields) = row.as_object_mut() else {
            return Err(AppError::internal(format!(
                "Payload for {} must serialize to an object",
                E::TABLE
            )));
        };
        if let Some(column) = E::OWNER_COLUMN {
            fields.insert(column.to_string(), Value::String(owner.to_string()));
        }
        Ok(row)
    }

    /// Insert a payload stamped with `owner` and prepend the stored record.
    pub async fn create<P: Serialize>(&self, owner: Uuid, payload: &P) -> AppResult<E> {
        let row = self.owned_row(owner, payload)?;
        let item = self.insert(row).await?;
        self.prepend(item.clone()).await;
        info!(table = E::TABLE, id = %item.id(), "Record created");
        Ok(item)
    }

    /// Apply a partial update to one row and replace it in place locally.
    pub async fn update<P: Serialize>(&self, id: Uuid, patch: &P) -> AppResult<E> {
        let patch = serde_json::to_value(patch)?;
        if patch.as_object().is_some_and(|fields| fields.is_empty()) {
            return Err(AppError::validation("No fields to update"));
        }
        debug!(table = E::TABLE, %id, "Updating row");

        let stored = self
            .tables
            .update(E::TABLE, &[FilterField::eq("id", id)], patch)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::not_found(format!("{} row {id} not found", E::TABLE)))?;
        let item: E = decode_row(stored)?;

        let mut state = self.state.write().await;
        if let Some(slot) = state.items.iter_mut().find(|existing| existing.id() == id) {
            *slot = item.clone();
        }
        info!(table = E::TABLE, %id, "Record updated");
        Ok(item)
    }

    /// Delete one row and drop it from the local list.
    ///
    /// Deleting an id that no longer exists remotely is not an error.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        debug!(table = E::TABLE, %id, "Deleting row");
        let removed = self
            .tables
            .delete(E::TABLE, &[FilterField::eq("id", id)])
            .await?;
        self.state
            .write()
            .await
            .items
            .retain(|existing| existing.id() != id);
        info!(table = E::TABLE, %id, removed = removed.len(), "Record deleted");
        Ok(())
    }
}

/// Run a query and decode every row, without caching.
pub async fn fetch_rows<E: Record>(tables: &dyn TableGateway, query: &Query) -> AppResult<Vec<E>> {
    tables
        .select(E::TABLE, query)
        .await?
        .into_iter()
        .map(decode_row::<E>)
        .collect()
}

fn decode_row<E: Record>(row: Value) -> AppResult<E> {
    serde_json::from_value(row).map_err(|e| {
        AppError::with_source(
            ErrorKind::Serialization,
            format!("Failed to decode {} row: {e}", E::TABLE),
            e,
        )
    })
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;
    use woundcare_gateway::MemoryGateway;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: Uuid,
        owner_id: Uuid,
        body: String,
        created_at: String,
    }

    impl Record for Note {
        const TABLE: &'static str = "notes";
        const ORDER_COLUMN: &'static str = "created_at";
        const OWNER_COLUMN: Option<&'static str> = Some("owner_id");

        fn id(&self) -> Uuid {
            self.id
        }
    }

    fn collection(memory: &MemoryGateway) -> EntityCollection<Note> {
        EntityCollection::new(Arc::new(memory.clone()))
    }

    #[tokio::test]
    async fn test_create_stamps_owner_and_prepends() {
        let memory = MemoryGateway::new();
        let notes = collection(&memory);
        let owner = Uuid::new_v4();

        let first = notes.create(owner, &json!({ "body": "a" })).await.unwrap();
        let second = notes.create(owner, &json!({ "body": "b" })).await.unwrap();

        assert_eq!(first.owner_id, owner);
        let items = notes.items().await;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, second.id);
        assert_eq!(items[1].id, first.id);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_items_and_records_error() {
        let memory = MemoryGateway::new();
        let notes = collection(&memory);
        notes
            .create(Uuid::new_v4(), &json!({ "body": "kept" }))
            .await
            .unwrap();
        notes.fetch(&[]).await.unwrap();
        assert_eq!(notes.status().await, LoadStatus::Ready);

        memory
            .fail_table("notes", AppError::service_unavailable("Failed to fetch"))
            .await;
        assert!(notes.fetch(&[]).await.is_err());
        assert_eq!(notes.status().await, LoadStatus::Failed);
        assert_eq!(notes.last_error().await.as_deref(), Some("Failed to fetch"));
        assert_eq!(notes.len().await, 1);

        memory.clear_failures().await;
        notes.fetch(&[]).await.unwrap();
        assert!(notes.last_error().await.is_none());
    }

    #[tokio::test]
    async fn test_update_replaces_in_place() {
        let memory = MemoryGateway::new();
        let notes = collection(&memory);
        let owner = Uuid::new_v4();
        let a = notes.create(owner, &json!({ "body": "a" })).await.unwrap();
        let b = notes.create(owner, &json!({ "body": "b" })).await.unwrap();

        let updated = notes.update(a.id, &json!({ "body": "a2" })).await.unwrap();
        assert_eq!(updated.body, "a2");
        assert_eq!(updated.owner_id, owner);

        let items = notes.items().await;
        assert_eq!(items[0].id, b.id);
        assert_eq!(items[1].body, "a2");

        let err = notes.update(a.id, &json!({})).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = notes
            .update(Uuid::new_v4(), &json!({ "body": "x" }))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_failed_mutations_leave_list_untouched() {
        let memory = MemoryGateway::new();
        let notes = collection(&memory);
        let a = notes
            .create(Uuid::new_v4(), &json!({ "body": "a" }))
            .await
            .unwrap();

        memory
            .fail_table("notes", AppError::external("permission denied"))
            .await;
        assert!(notes.create(Uuid::new_v4(), &json!({ "body": "b" })).await.is_err());
        assert!(notes.update(a.id, &json!({ "body": "z" })).await.is_err());
        assert!(notes.delete(a.id).await.is_err());

        let items = notes.items().await;
        assert_eq!(items, vec![a]);
    }

    #[tokio::test]
    async fn test_delete_missing_id_is_ok() {
        let memory = MemoryGateway::new();
        let notes = collection(&memory);
        notes.delete(Uuid::new_v4()).await.unwrap();
        assert!(notes.is_empty().await);
    }
}
