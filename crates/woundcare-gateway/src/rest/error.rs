//! Mapping of hosted-service failures onto [`AppError`].

use serde::Deserialize;

use woundcare_core::error::{AppError, ErrorKind};

/// Unique-constraint violation.
const CODE_UNIQUE_VIOLATION: &str = "23505";
/// Row-level security or grant rejection.
const CODE_INSUFFICIENT_PRIVILEGE: &str = "42501";
/// `.single()` matched zero rows.
const CODE_NO_ROWS: &str = "PGRST116";
/// Wrong password or revoked refresh token.
const ERROR_INVALID_GRANT: &str = "invalid_grant";

/// Error body returned by the table, auth and storage endpoints.
///
/// The three APIs disagree on field names, so every variant is optional.
#[derive(Debug, Default, Deserialize)]
pub struct RemoteErrorBody {
    /// Postgres / PostgREST error code.
    pub code: Option<serde_json::Value>,
    /// Primary message (tables, storage).
    pub message: Option<String>,
    /// Extra detail (tables).
    pub details: Option<String>,
    /// Suggested fix (tables).
    pub hint: Option<String>,
    /// Auth API message.
    pub msg: Option<String>,
    /// Auth API OAuth-style description.
    pub error_description: Option<String>,
    /// Short error label (auth, storage).
    pub error: Option<String>,
}

impl RemoteErrorBody {
    /// Parse a response body, tolerating non-JSON payloads.
    pub fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    fn code(&self) -> Option<String> {
        match &self.code {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(serde_json::Value::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }

    fn text(&self) -> Option<String> {
        self.message
            .clone()
            .or_else(|| self.msg.clone())
            .or_else(|| self.error_description.clone())
            .or_else(|| self.error.clone())
            .filter(|m| !m.trim().is_empty())
    }
}

/// Classify a non-success response.
pub fn map_status(status: u16, body: &str) -> AppError {
    let parsed = RemoteErrorBody::parse(body);
    let code = parsed.code();
    let message = parsed
        .text()
        .unwrap_or_else(|| format!("Request failed with status {status}"));

    let kind = match code.as_deref() {
        Some(CODE_UNIQUE_VIOLATION) => ErrorKind::Conflict,
        Some(CODE_NO_ROWS) => ErrorKind::NotFound,
        Some(CODE_INSUFFICIENT_PRIVILEGE) => ErrorKind::Authorization,
        _ if parsed.error.as_deref() == Some(ERROR_INVALID_GRANT) => ErrorKind::Authentication,
        _ => match status {
            401 => ErrorKind::Authentication,
            403 => ErrorKind::Authorization,
            404 => ErrorKind::NotFound,
            409 => ErrorKind::Conflict,
            500..=599 => ErrorKind::ServiceUnavailable,
            _ => ErrorKind::ExternalService,
        },
    };

    if let Some(details) = parsed.details.as_deref().filter(|d| !d.is_empty()) {
        tracing::debug!(status, code = ?code, details, hint = ?parsed.hint, "Remote error detail");
    }

    AppError::new(kind, message)
}

/// Classify a transport-level failure.
pub fn map_transport(err: reqwest::Error) -> AppError {
    if err.is_connect() || err.is_timeout() {
        AppError::with_source(
            ErrorKind::ServiceUnavailable,
            format!("Service unreachable: {err}"),
            err,
        )
    } else if err.is_decode() {
        AppError::with_source(
            ErrorKind::Serialization,
            format!("Invalid response body: {err}"),
            err,
        )
    } else {
        AppError::with_source(
            ErrorKind::ExternalService,
            format!("Request failed: {err}"),
            err,
        )
    }
}
