//! Object storage over `/storage/v1/object`.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Method;
use serde_json::json;
use tracing::debug;

use woundcare_core::result::AppResult;
use woundcare_core::traits::ObjectStorage;

use super::RestGateway;

#[async_trait]
impl ObjectStorage for RestGateway {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        data: Bytes,
        content_type: &str,
    ) -> AppResult<()> {
        let url = self.endpoint(&format!("/storage/v1/object/{bucket}/{path}"), &[])?;
        debug!(bucket, path, bytes = data.len(), content_type, "Uploading object");

        let builder = self
            .request(Method::POST, url)
            .await
            .header("Content-Type", content_type)
            .header("x-upsert", "false")
            .body(data);
        self.send(builder).await?;
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{bucket}/{path}",
            self.base_url()
        )
    }

    async fn remove(&self, bucket: &str, paths: &[String]) -> AppResult<()> {
        if paths.is_empty() {
            return Ok(());
        }
        let url = self.endpoint(&format!("/storage/v1/object/{bucket}"), &[])?;
        debug!(bucket, count = paths.len(), "Removing objects");

        let builder = self
            .request(Method::DELETE, url)
            .await
            .json(&json!({ "prefixes": paths }));
        self.send(builder).await?;
        Ok(())
    }
}
