//! HTTP gateway to the hosted relational, auth and storage service.
//!
//! One [`RestGateway`] holds the HTTP client, the project URL, the
//! anonymous key, and the current session. Every request carries the
//! `apikey` header plus a bearer token: the session's access token when
//! signed in, the anonymous key otherwise.

pub mod auth;
pub mod error;
pub mod query;
pub mod storage;
pub mod table;

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use woundcare_core::config::GatewayConfig;
use woundcare_core::error::{AppError, ErrorKind};
use woundcare_core::result::AppResult;
use woundcare_core::traits::AuthSession;

use self::error::{map_status, map_transport};

/// Gateway backed by the hosted service's REST endpoints.
#[derive(Debug, Clone)]
pub struct RestGateway {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    session: Arc<RwLock<Option<AuthSession>>>,
}

impl RestGateway {
    /// Build a gateway from validated configuration.
    pub fn new(config: &GatewayConfig) -> AppResult<Self> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Failed to build HTTP client: {e}"),
                    e,
                )
            })?;

        Ok(Self {
            http,
            base_url: config.base_url().to_string(),
            anon_key: config.anon_key.clone(),
            session: Arc::new(RwLock::new(None)),
        })
    }

    /// Project base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// A copy of the held session, if any.
    pub async fn session(&self) -> Option<AuthSession> {
        self.session.read().await.clone()
    }

    async fn set_session(&self, session: Option<AuthSession>) {
        *self.session.write().await = session;
    }

    /// Absolute URL for `path` with the given query pairs.
    fn endpoint(&self, path: &str, pairs: &[(String, String)]) -> AppResult<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path)).map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Invalid endpoint URL for {path}: {e}"),
                e,
            )
        })?;
        if !pairs.is_empty() {
            let mut query = url.query_pairs_mut();
            for (key, value) in pairs {
                query.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Start a request with the key and bearer headers set.
    async fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let token = match self.session.read().await.as_ref() {
            Some(session) => session.access_token.clone(),
            None => self.anon_key.clone(),
        };
        self.http
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
    }

    /// Send a request and turn non-success statuses into errors.
    async fn send(&self, builder: RequestBuilder) -> AppResult<Response> {
        let response = builder.send().await.map_err(map_transport)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(map_status(status.as_u16(), &body))
    }

    /// Send a request and decode a JSON response.
    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> AppResult<T> {
        self.send(builder)
            .await?
            .json::<T>()
            .await
            .map_err(map_transport)
    }
}
