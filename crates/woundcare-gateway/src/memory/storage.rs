//! Object storage for [`MemoryGateway`].

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use woundcare_core::AppError;
use woundcare_core::result::AppResult;
use woundcare_core::traits::ObjectStorage;

use super::{MemoryGateway, PUBLIC_URL_BASE, StoredObject};

#[async_trait]
impl ObjectStorage for MemoryGateway {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        data: Bytes,
        content_type: &str,
    ) -> AppResult<()> {
        let mut state = self.state.write().await;
        if let Some(err) = state.bucket_failures.get(bucket) {
            return Err(err.clone());
        }
        let objects = state.buckets.entry(bucket.to_string()).or_default();
        if objects.contains_key(path) {
            return Err(AppError::conflict("The resource already exists"));
        }
        debug!(bucket, path, bytes = data.len(), "Object stored");
        objects.insert(
            path.to_string(),
            StoredObject {
                data,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{PUBLIC_URL_BASE}/{bucket}/{path}")
    }

    async fn remove(&self, bucket: &str, paths: &[String]) -> AppResult<()> {
        let mut state = self.state.write().await;
        if let Some(err) = state.bucket_failures.get(bucket) {
            return Err(err.clone());
        }
        if let Some(objects) = state.buckets.get_mut(bucket) {
            for path in paths {
                objects.remove(path);
            }
        }
        debug!(bucket, count = paths.len(), "Objects removed");
        Ok(())
    }
}
