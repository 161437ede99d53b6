//! HTTP client for the store-locator backend.
//!
//! Wraps `reqwest` with base-URL handling, retry on transient failures and
//! extraction of the backend's `{"erro": "..."}` messages. Endpoint methods
//! live in [`crate::catalog`] and [`crate::proximity`].

use std::time::Duration;

use pdvmap_core::AppConfig;
use reqwest::{Client, Url};

use crate::error::ApiError;
use crate::retry::retry_with_backoff;

/// Timeout, identity and retry policy for [`LocatorApiClient`].
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Additional attempts after the first failure. `0` disables retries.
    pub max_retries: u32,
    pub backoff_base_ms: u64,
}

impl ClientSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            timeout_secs: config.api_timeout_secs,
            user_agent: config.api_user_agent.clone(),
            max_retries: config.api_max_retries,
            backoff_base_ms: config.api_retry_backoff_base_ms,
        }
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            user_agent: "pdvmap/0.1 (store-locator)".to_string(),
            max_retries: 2,
            backoff_base_ms: 250,
        }
    }
}

/// Client for the store-locator REST backend.
///
/// Cheap to clone: the underlying `reqwest::Client` shares its connection
/// pool between clones.
#[derive(Debug, Clone)]
pub struct LocatorApiClient {
    client: Client,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl LocatorApiClient {
    /// Creates a client rooted at `base_url` (which may carry a path
    /// prefix such as `/api`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`ApiError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn new(base_url: &str, settings: &ClientSettings) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(settings.user_agent.as_str())
            .build()?;

        // Keep exactly one trailing slash so `Url::join` appends to the
        // prefix instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ApiError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            max_retries: settings.max_retries,
            backoff_base_ms: settings.backoff_base_ms,
        })
    }

    /// Creates a client from the application config.
    ///
    /// # Errors
    ///
    /// See [`LocatorApiClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        Self::new(&config.api_base_url, &ClientSettings::from_config(config))
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Checks that the backend answers `GET /health` with a 2xx status.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] on network failure.
    /// - [`ApiError::Status`] on a non-2xx status.
    pub async fn health(&self) -> Result<(), ApiError> {
        let url = self.build_url("health", &[])?;
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
                message: None,
            });
        }
        Ok(())
    }

    /// Builds an endpoint URL with properly percent-encoded query parameters.
    pub(crate) fn build_url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, ApiError> {
        let mut url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidBaseUrl {
                url: format!("{}{path}", self.base_url),
                reason: e.to_string(),
            })?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// GETs `path` and parses the body as JSON, retrying transient failures.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] on network failure after all retries.
    /// - [`ApiError::Status`] on a non-2xx status (5xx after all retries).
    /// - [`ApiError::Deserialize`] if a 2xx body is not valid JSON.
    pub(crate) async fn get_json(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<serde_json::Value, ApiError> {
        let url = self.build_url(path, query)?;
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.request_json(url.clone())
        })
        .await
    }

    /// GETs `path` exactly once. For lookups that only decorate a result
    /// and must not stall behind retries.
    ///
    /// # Errors
    ///
    /// Same as [`LocatorApiClient::get_json`], without retrying.
    pub(crate) async fn get_json_once(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<serde_json::Value, ApiError> {
        let url = self.build_url(path, query)?;
        self.request_json(url).await
    }

    async fn request_json(&self, url: Url) -> Result<serde_json::Value, ApiError> {
        tracing::debug!(url = %url, "backend GET");
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .as_ref()
                .and_then(error_message);
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| ApiError::Deserialize {
            context: url.path().to_owned(),
            source: e,
        })
    }
}

/// Reads the backend's `erro` field, ignoring blank messages.
pub(crate) fn error_message(body: &serde_json::Value) -> Option<String> {
    body.get("erro")
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_owned)
}

/// Requires a JSON array, turning `{"erro": ...}` into [`ApiError::Rejected`]
/// and any other shape into [`ApiError::UnexpectedShape`].
pub(crate) fn expect_list(
    body: serde_json::Value,
    context: &str,
) -> Result<Vec<serde_json::Value>, ApiError> {
    match body {
        serde_json::Value::Array(items) => Ok(items),
        other => match error_message(&other) {
            Some(message) => Err(ApiError::Rejected(message)),
            None => Err(ApiError::UnexpectedShape {
                context: context.to_owned(),
            }),
        },
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
