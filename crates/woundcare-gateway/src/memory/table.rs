//! Table operations for [`MemoryGateway`].

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use woundcare_core::AppError;
use woundcare_core::result::AppResult;
use woundcare_core::traits::TableGateway;
use woundcare_core::types::{FilterField, Query};

use super::MemoryGateway;
use crate::require_filters;

fn timestamp() -> Value {
    Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true))
}

fn matches_all(filters: &[FilterField], row: &Value) -> bool {
    filters.iter().all(|f| f.matches(row))
}

#[async_trait]
impl TableGateway for MemoryGateway {
    fn gateway_type(&self) -> &str {
        "memory"
    }

    async fn select(&self, table: &str, query: &Query) -> AppResult<Vec<Value>> {
        let state = self.state.read().await;
        if let Some(err) = state.table_failures.get(table) {
            return Err(err.clone());
        }
        let mut rows = state.tables.get(table).cloned().unwrap_or_default();
        query.apply(&mut rows);
        debug!(table, count = rows.len(), "Rows fetched");
        Ok(rows)
    }

    async fn insert(&self, table: &str, rows: Vec<Value>) -> AppResult<Vec<Value>> {
        let mut state = self.state.write().await;
        if let Some(err) = state.table_failures.get(table) {
            return Err(err.clone());
        }
        let existing = state.tables.entry(table.to_string()).or_default();

        let mut stored = Vec::with_capacity(rows.len());
        for row in rows {
            let Value::Object(mut object) = row else {
                return Err(AppError::validation(format!(
                    "Rows inserted into {table} must be JSON objects"
                )));
            };
            let id = object
                .entry("id")
                .or_insert_with(|| Value::String(Uuid::new_v4().to_string()))
                .clone();
            let duplicate = existing
                .iter()
                .chain(stored.iter())
                .any(|r: &Value| r.get("id") == Some(&id));
            if duplicate {
                return Err(AppError::conflict(format!(
                    "duplicate key value violates unique constraint \"{table}_pkey\""
                )));
            }
            let now = timestamp();
            object.entry("created_at").or_insert_with(|| now.clone());
            object.entry("updated_at").or_insert(now);
            stored.push(Value::Object(object));
        }

        existing.extend(stored.iter().cloned());
        debug!(table, count = stored.len(), "Rows inserted");
        Ok(stored)
    }

    async fn update(
        &self,
        table: &str,
        filters: &[FilterField],
        patch: Value,
    ) -> AppResult<Vec<Value>> {
        require_filters(filters, "update")?;
        let mut state = self.state.write().await;
        if let Some(err) = state.table_failures.get(table) {
            return Err(err.clone());
        }
        let Value::Object(patch) = patch else {
            return Err(AppError::validation("Update patch must be a JSON object"));
        };

        let mut updated = Vec::new();
        if let Some(rows) = state.tables.get_mut(table) {
            for row in rows.iter_mut().filter(|r| matches_all(filters, r)) {
                if let Value::Object(object) = row {
                    for (key, value) in &patch {
                        object.insert(key.clone(), value.clone());
                    }
                    object.insert("updated_at".to_string(), timestamp());
                }
                updated.push(row.clone());
            }
        }
        debug!(table, count = updated.len(), "Rows updated");
        Ok(updated)
    }

    async fn delete(&self, table: &str, filters: &[FilterField]) -> AppResult<Vec<Value>> {
        require_filters(filters, "delete")?;
        let mut state = self.state.write().await;
        if let Some(err) = state.table_failures.get(table) {
            return Err(err.clone());
        }
        let mut removed = Vec::new();
        if let Some(rows) = state.tables.get_mut(table) {
            let (gone, kept): (Vec<Value>, Vec<Value>) =
                rows.drain(..).partition(|r| matches_all(filters, r));
            *rows = kept;
            removed = gone;
        }
        debug!(table, count = removed.len(), "Rows deleted");
        Ok(removed)
    }
}
