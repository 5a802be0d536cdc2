//! Logging configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Formats accepted for `logging.format`.
const FORMATS: [&str; 2] = ["pretty", "json"];

/// How the binary initialises `tracing-subscriber`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, e.g. `"warn"` or `"woundcare_service=debug"`.
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_level")]
    pub level: String,
    /// `"pretty"` for terminals, `"json"` for log shippers.
    #[serde(default = "default_format")]
    pub format: String,
}

impl LoggingConfig {
    /// Whether events are emitted as JSON lines.
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }

    /// Reject unknown output formats.
    pub fn validate(&self) -> Result<(), AppError> {
        let format = self.format.to_lowercase();
        if !FORMATS.contains(&format.as_str()) {
            return Err(AppError::configuration(format!(
                "Unknown log format '{}': expected pretty or json",
                self.format
            )));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "pretty".to_string()
}
