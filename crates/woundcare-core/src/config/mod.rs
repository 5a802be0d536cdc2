//! Application configuration schemas.
//!
//! Configuration is merged by the `config` crate from optional TOML files
//! and `WOUNDCARE__`-prefixed environment variables. Each sub-module
//! represents one section.

pub mod gateway;
pub mod logging;
pub mod storage;

use serde::{Deserialize, Serialize};

pub use self::gateway::GatewayConfig;
pub use self::logging::LoggingConfig;
pub use self::storage::StorageConfig;

use crate::error::AppError;

/// Legacy variable names accepted for the two required gateway values.
const URL_OVERRIDE_VAR: &str = "SUPABASE_URL";
const ANON_KEY_OVERRIDE_VAR: &str = "SUPABASE_ANON_KEY";

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Hosted service connection settings.
    #[serde(default)]
    pub gateway: GatewayConfig,
    /// Photo storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// `path` names the base TOML file (extension optional); `env` selects an
    /// optional `config/{env}` overlay. Environment variables are applied last.
    pub fn load(path: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("WOUNDCARE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("gateway.url", std::env::var(URL_OVERRIDE_VAR).ok())?
            .set_override_option(
                "gateway.anon_key",
                std::env::var(ANON_KEY_OVERRIDE_VAR).ok(),
            )?
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that cannot reach the hosted service.
    pub fn validate(&self) -> Result<(), AppError> {
        self.gateway.validate()?;
        self.storage.validate()?;
        self.logging.validate()
    }
}
