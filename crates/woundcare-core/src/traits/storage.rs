//! Object storage exposed by the hosted service.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Bucketed object storage with public URLs.
#[async_trait]
pub trait ObjectStorage: Send + Sync + std::fmt::Debug + 'static {
    /// Write `data` at `path` inside `bucket`. Fails if the object exists.
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        data: Bytes,
        content_type: &str,
    ) -> AppResult<()>;

    /// Public URL of an object. Does not check that the object exists.
    fn public_url(&self, bucket: &str, path: &str) -> String;

    /// Remove objects from `bucket`. Missing objects are ignored.
    async fn remove(&self, bucket: &str, paths: &[String]) -> AppResult<()>;
}
