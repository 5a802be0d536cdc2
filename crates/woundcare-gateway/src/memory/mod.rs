//! In-process gateway.
//!
//! Tables are vectors of JSON rows, storage is a map of byte buffers, and
//! auth keeps a user directory plus one held session. Failures can be
//! injected per table or per bucket so callers' error paths can be driven
//! deterministically.

pub mod auth;
pub mod storage;
pub mod table;

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use serde_json::Value;
use tokio::sync::RwLock;

use woundcare_core::AppError;
use woundcare_core::traits::{AuthSession, AuthUser};
use woundcare_core::types::UserRole;

/// Base of the URLs returned by [`woundcare_core::traits::ObjectStorage::public_url`].
pub const PUBLIC_URL_BASE: &str = "memory://storage";

/// A stored object.
#[derive(Debug, Clone)]
pub struct StoredObject {
    /// Object bytes.
    pub data: Bytes,
    /// MIME type given at upload.
    pub content_type: String,
}

#[derive(Debug, Clone)]
struct MemoryUser {
    password: String,
    user: AuthUser,
}

#[derive(Debug, Default)]
struct MemoryState {
    tables: HashMap<String, Vec<Value>>,
    buckets: HashMap<String, HashMap<String, StoredObject>>,
    users: HashMap<String, MemoryUser>,
    session: Option<AuthSession>,
    table_failures: HashMap<String, AppError>,
    bucket_failures: HashMap<String, AppError>,
}

/// Gateway keeping all state in memory. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryGateway {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryGateway {
    /// Create an empty gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account directly, bypassing sign-up.
    pub async fn register_user(&self, email: &str, password: &str, role: UserRole) -> AuthUser {
        let user = AuthUser {
            id: uuid::Uuid::new_v4(),
            email: Some(email.to_string()),
            role,
        };
        self.state.write().await.users.insert(
            email.to_lowercase(),
            MemoryUser {
                password: password.to_string(),
                user: user.clone(),
            },
        );
        user
    }

    /// Insert rows verbatim, without assigning ids or timestamps.
    pub async fn seed(&self, table: &str, rows: Vec<Value>) {
        self.state
            .write()
            .await
            .tables
            .entry(table.to_string())
            .or_default()
            .extend(rows);
    }

    /// Current rows of a table, in insertion order.
    pub async fn rows(&self, table: &str) -> Vec<Value> {
        self.state
            .read()
            .await
            .tables
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    /// A stored object, if present.
    pub async fn object(&self, bucket: &str, path: &str) -> Option<StoredObject> {
        self.state
            .read()
            .await
            .buckets
            .get(bucket)
            .and_then(|objects| objects.get(path))
            .cloned()
    }

    /// Paths stored in a bucket, sorted.
    pub async fn object_paths(&self, bucket: &str) -> Vec<String> {
        let state = self.state.read().await;
        let mut paths: Vec<String> = state
            .buckets
            .get(bucket)
            .map(|objects| objects.keys().cloned().collect())
            .unwrap_or_default();
        paths.sort();
        paths
    }

    /// Make every operation on `table` fail with `error` until cleared.
    pub async fn fail_table(&self, table: &str, error: AppError) {
        self.state
            .write()
            .await
            .table_failures
            .insert(table.to_string(), error);
    }

    /// Make every operation on `bucket` fail with `error` until cleared.
    pub async fn fail_bucket(&self, bucket: &str, error: AppError) {
        self.state
            .write()
            .await
            .bucket_failures
            .insert(bucket.to_string(), error);
    }

    /// Remove all injected failures.
    pub async fn clear_failures(&self) {
        let mut state = self.state.write().await;
        state.table_failures.clear();
        state.bucket_failures.clear();
    }
}
