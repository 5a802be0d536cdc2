//! Row access over `/rest/v1/{table}`.

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use woundcare_core::result::AppResult;
use woundcare_core::traits::TableGateway;
use woundcare_core::types::{FilterField, Query};

use super::RestGateway;
use crate::require_filters;
use super::query::{filter_pairs, select_pairs};

const RETURN_REPRESENTATION: &str = "return=representation";

fn table_path(table: &str) -> String {
    format!("/rest/v1/{table}")
}

#[async_trait]
impl TableGateway for RestGateway {
    fn gateway_type(&self) -> &str {
        "rest"
    }

    async fn select(&self, table: &str, query: &Query) -> AppResult<Vec<Value>> {
        let url = self.endpoint(&table_path(table), &select_pairs(query))?;
        debug!(table, query = url.query().unwrap_or_default(), "Selecting rows");

        let rows: Vec<Value> = self.send_json(self.request(Method::GET, url).await).await?;
        debug!(table, count = rows.len(), "Rows fetched");
        Ok(rows)
    }

    async fn insert(&self, table: &str, rows: Vec<Value>) -> AppResult<Vec<Value>> {
        let url = self.endpoint(&table_path(table), &[])?;
        debug!(table, count = rows.len(), "Inserting rows");

        let builder = self
            .request(Method::POST, url)
            .await
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&rows);
        self.send_json(builder).await
    }

    async fn update(
        &self,
        table: &str,
        filters: &[FilterField],
        patch: Value,
    ) -> AppResult<Vec<Value>> {
        require_filters(filters, "update")?;
        let url = self.endpoint(&table_path(table), &filter_pairs(filters))?;
        debug!(table, query = url.query().unwrap_or_default(), "Updating rows");

        let builder = self
            .request(Method::PATCH, url)
            .await
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&patch);
        self.send_json(builder).await
    }

    async fn delete(&self, table: &str, filters: &[FilterField]) -> AppResult<Vec<Value>> {
        require_filters(filters, "delete")?;
        let url = self.endpoint(&table_path(table), &filter_pairs(filters))?;
        debug!(table, query = url.query().unwrap_or_default(), "Deleting rows");

        let builder = self
            .request(Method::DELETE, url)
            .await
            .header("Prefer", RETURN_REPRESENTATION);
        self.send_json(builder).await
    }
}
