//! Photo uploads and the photo metadata list.

use std::sync::Arc;

use bytes::Bytes;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use woundcare_auth::SessionManager;
use woundcare_core::config::StorageConfig;
use woundcare_core::error::AppError;
use woundcare_core::result::AppResult;
use woundcare_core::traits::{ObjectStorage, TableGateway};
use woundcare_entity::photo::{NewWoundPhoto, WoundPhoto, WoundPhotoUpdate};

use crate::store::{EntityCollection, LoadStatus, owner_scope};
use crate::validation::check_payload;

use super::upload::{content_type_for, extension_of, object_path};

/// Clinical metadata recorded with a photo uploaded in the same call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoDetails {
    pub patient_id: Uuid,
    pub photo_date: NaiveDate,
    pub wound_type: Option<String>,
    pub wound_stage: Option<String>,
    pub comments: Option<String>,
}

impl PhotoDetails {
    /// Details with only the required fields.
    pub fn new(patient_id: Uuid, photo_date: NaiveDate) -> Self {
        Self {
            patient_id,
            photo_date,
            wound_type: None,
            wound_stage: None,
            comments: None,
        }
    }

    fn into_payload(self, photo_url: String) -> NewWoundPhoto {
        NewWoundPhoto {
            patient_id: self.patient_id,
            photo_url,
            photo_date: self.photo_date,
            wound_type: self.wound_type,
            wound_stage: self.wound_stage,
            comments: self.comments,
        }
    }
}

/// An object written to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedObject {
    /// Path inside the bucket.
    pub path: String,
    /// Public URL for the path.
    pub url: String,
}

/// The caller's wound photos, most recent photo date first.
#[derive(Debug, Clone)]
pub struct WoundPhotoService {
    sessions: SessionManager,
    photos: EntityCollection<WoundPhoto>,
    storage: Arc<dyn ObjectStorage>,
    config: StorageConfig,
}

impl WoundPhotoService {
    /// Creates the service without fetching.
    pub fn new(
        tables: Arc<dyn TableGateway>,
        storage: Arc<dyn ObjectStorage>,
        sessions: SessionManager,
        config: StorageConfig,
    ) -> Self {
        Self {
            sessions,
            photos: EntityCollection::new(tables),
            storage,
            config,
        }
    }

    /// Creates the service and performs the initial fetch.
    pub async fn load(
        tables: Arc<dyn TableGateway>,
        storage: Arc<dyn ObjectStorage>,
        sessions: SessionManager,
        config: StorageConfig,
    ) -> Self {
        let service = Self::new(tables, storage, sessions, config);
        let _ = service.refresh().await;
        service
    }

    /// Re-fetch the list.
    pub async fn refresh(&self) -> AppResult<Vec<WoundPhoto>> {
        let scope = owner_scope::<WoundPhoto>(&self.sessions).await;
        self.photos.fetch(&scope).await
    }

    /// The local list.
    pub async fn list(&self) -> Vec<WoundPhoto> {
        self.photos.items().await
    }

    /// Locally held photos of one patient, in list order.
    pub async fn for_patient(&self, patient_id: Uuid) -> Vec<WoundPhoto> {
        self.photos.filtered(|p| p.patient_id == patient_id).await
    }

    /// Fetch status of the local list.
    pub async fn status(&self) -> LoadStatus {
        self.photos.status().await
    }

    /// Message of the last failed fetch.
    pub async fn last_error(&self) -> Option<String> {
        self.photos.last_error().await
    }

    /// Upload image bytes under a random name and return the public URL.
    ///
    /// The object keeps the extension of `file_name`. Nothing links the
    /// object to a metadata row; see [`Self::upload_and_create`].
    pub async fn upload_binary(&self, file_name: &str, data: Bytes) -> AppResult<String> {
        Ok(self.store_object(file_name, data).await?.url)
    }

    async fn store_object(&self, file_name: &str, data: Bytes) -> AppResult<UploadedObject> {
        let size = data.len() as u64;
        if size > self.config.max_upload_size_bytes {
            return Err(AppError::validation(format!(
                "File is {size} bytes; the maximum upload size is {} bytes",
                self.config.max_upload_size_bytes
            )));
        }
        let ext = extension_of(file_name)?;
        let path = object_path(&self.config.photo_prefix, ext);
        let content_type = content_type_for(ext);

        debug!(bucket = %self.config.bucket, path = %path, bytes = size, "Uploading photo");
        self.storage
            .upload(&self.config.bucket, &path, data, content_type)
            .await?;
        let url = self.storage.public_url(&self.config.bucket, &path);
        info!(path = %path, bytes = size, "Photo uploaded");
        Ok(UploadedObject { path, url })
    }

    /// Record metadata for an already uploaded photo.
    pub async fn create(&self, payload: NewWoundPhoto) -> AppResult<WoundPhoto> {
        let ctx = self.sessions.require_user().await?;
        check_payload(&payload)?;
        self.photos.create(ctx.user_id, &payload).await
    }

    /// Upload a photo and record its metadata.
    ///
    /// If the metadata insert fails the uploaded object is removed again,
    /// so no orphaned file is left behind.
    pub async fn upload_and_create(
        &self,
        file_name: &str,
        data: Bytes,
        details: PhotoDetails,
    ) -> AppResult<WoundPhoto> {
        self.sessions.require_user().await?;
        let uploaded = self.store_object(file_name, data).await?;

        match self.create(details.into_payload(uploaded.url)).await {
            Ok(photo) => Ok(photo),
            Err(e) => {
                let paths = [uploaded.path];
                if let Err(cleanup) = self.storage.remove(&self.config.bucket, &paths).await {
                    warn!(
                        path = %paths[0],
                        error = %cleanup.message,
                        "Failed to remove photo after metadata insert failed"
                    );
                } else {
                    warn!(path = %paths[0], error = %e.message, "Metadata insert failed; upload removed");
                }
                Err(e)
            }
        }
    }

    /// Apply a partial metadata update.
    pub async fn update(&self, id: Uuid, update: WoundPhotoUpdate) -> AppResult<WoundPhoto> {
        check_payload(&update)?;
        self.photos.update(id, &update).await
    }

    /// Delete a photo's metadata row. The stored object is kept.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.photos.delete(id).await
    }
}
