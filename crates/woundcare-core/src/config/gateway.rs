//! Hosted service connection configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Connection settings for the hosted relational + auth + storage service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Base URL of the service project (e.g. `https://xyz.supabase.co`).
    #[serde(default)]
    pub url: String,
    /// Public anonymous API key sent with every request.
    #[serde(default)]
    pub anon_key: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl GatewayConfig {
    /// Both the URL and the anonymous key are mandatory.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.url.trim().is_empty() || self.anon_key.trim().is_empty() {
            return Err(AppError::configuration(
                "Missing gateway environment variables: url and anon_key are required",
            ));
        }
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(AppError::configuration(format!(
                "Gateway URL must start with http:// or https://, got '{}'",
                self.url
            )));
        }
        Ok(())
    }

    /// The base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// The anonymous key with all but the last four characters masked.
    pub fn masked_anon_key(&self) -> String {
        let visible: String = self
            .anon_key
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("****{visible}")
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_request_timeout() -> u64 {
    30
}
