//! Photo storage configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Where uploaded wound photos are placed in file storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Public bucket holding photo objects.
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// Sub-path under which photo objects are written.
    #[serde(default = "default_photo_prefix")]
    pub photo_prefix: String,
    /// Largest accepted upload in bytes (default 10 MiB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
}

impl StorageConfig {
    /// Bucket and prefix must be usable as path segments.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.bucket.trim().is_empty() {
            return Err(AppError::configuration("Storage bucket cannot be empty"));
        }
        if self.bucket.contains('/') {
            return Err(AppError::configuration(format!(
                "Storage bucket '{}' must not contain '/'",
                self.bucket
            )));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket: default_bucket(),
            photo_prefix: default_photo_prefix(),
            max_upload_size_bytes: default_max_upload(),
        }
    }
}

fn default_bucket() -> String {
    "photos".to_string()
}

fn default_photo_prefix() -> String {
    "wound-photos".to_string()
}

fn default_max_upload() -> u64 {
    10_485_760 // 10 MiB
}
