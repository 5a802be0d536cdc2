//! Relational table access exposed by the hosted service.

use async_trait::async_trait;
use serde_json::Value;

use crate::result::AppResult;
use crate::types::filter::FilterField;
use crate::types::query::Query;

/// Row-level CRUD against named tables.
///
/// Rows travel as JSON objects so the trait stays object-safe; typed
/// access is layered on top by the service crate. Every mutating call
/// returns the affected rows as stored, including server-assigned
/// columns such as `id` and `created_at`.
#[async_trait]
pub trait TableGateway: Send + Sync + std::fmt::Debug + 'static {
    /// Return the gateway type name (e.g. "rest", "memory").
    fn gateway_type(&self) -> &str;

    /// Fetch all rows of `table` matching `query`.
    async fn select(&self, table: &str, query: &Query) -> AppResult<Vec<Value>>;

    /// Insert one or more rows and return them as stored.
    async fn insert(&self, table: &str, rows: Vec<Value>) -> AppResult<Vec<Value>>;

    /// Merge `patch` into every row matching `filters`; return the updated rows.
    async fn update(
        &self,
        table: &str,
        filters: &[FilterField],
        patch: Value,
    ) -> AppResult<Vec<Value>>;

    /// Delete every row matching `filters`; return the deleted rows.
    async fn delete(&self, table: &str, filters: &[FilterField]) -> AppResult<Vec<Value>>;
}
