//! The set of trait objects handed to services.

use std::sync::Arc;

use tracing::info;

use woundcare_core::config::GatewayConfig;
use woundcare_core::result::AppResult;
use woundcare_core::traits::{AuthProvider, ObjectStorage, TableGateway};

use crate::memory::MemoryGateway;
use crate::rest::RestGateway;

/// Table, auth and storage access sharing one session.
#[derive(Debug, Clone)]
pub struct Gateway {
    /// Row access.
    pub tables: Arc<dyn TableGateway>,
    /// Session management.
    pub auth: Arc<dyn AuthProvider>,
    /// Object storage.
    pub storage: Arc<dyn ObjectStorage>,
}

impl Gateway {
    /// Connect to the hosted service described by `config`.
    pub fn connect(config: &GatewayConfig) -> AppResult<Self> {
        let rest = Arc::new(RestGateway::new(config)?);
        info!(
            url = %config.base_url(),
            anon_key = %config.masked_anon_key(),
            "Gateway configured"
        );
        Ok(Self {
            tables: rest.clone(),
            auth: rest.clone(),
            storage: rest,
        })
    }

    /// Use an in-process gateway.
    pub fn in_memory(memory: &MemoryGateway) -> Self {
        let shared = Arc::new(memory.clone());
        Self {
            tables: shared.clone(),
            auth: shared.clone(),
            storage: shared,
        }
    }
}
