//! registry::client
//!
//! HTTP client for the AiiDAlab app registry.
//!
//! # Design
//!
//! The registry publishes a single JSON index. The client fetches it and
//! hands it back as an opaque [`serde_json::Value`]; only the handful of
//! fields needed for a listing are looked at here.
//!
//! No retries: a failed request is reported to the caller as-is.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Default registry API base URL.
pub const DEFAULT_REGISTRY_URL: &str = "https://aiidalab.github.io/aiidalab-registry/api/v1";

/// Index document under the API base.
const INDEX_PATH: &str = "apps_index.json";

/// User-Agent header value for registry requests.
const USER_AGENT_VALUE: &str = concat!("develop-aiidalab/", env!("CARGO_PKG_VERSION"));

/// Errors from registry lookups.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The request could not be sent or the body could not be read.
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        source: reqwest::Error,
    },

    /// The registry answered with a non-success status.
    #[error("registry returned HTTP {status} for {url}")]
    Http { url: String, status: u16 },

    /// The body was not the JSON we expected.
    #[error("failed to decode registry response from {url}: {message}")]
    Decode { url: String, message: String },

    /// The index has no entry for the requested app.
    #[error("app '{0}' not found in registry")]
    AppNotFound(String),
}

/// Registry client.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    /// HTTP client for making requests
    client: Client,
    /// API base URL, without trailing slash
    base_url: String,
}

impl RegistryClient {
    /// Create a client for the registry at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// URL of the app index.
    pub fn index_url(&self) -> String {
        format!("{}/{}", self.base_url, INDEX_PATH)
    }

    fn headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers
    }

    /// Fetch the full app index.
    pub async fn fetch_index(&self) -> Result<Value, RegistryError> {
        let url = self.index_url();
        let response = self
            .client
            .get(&url)
            .headers(Self::headers())
            .send()
            .await
            .map_err(|e| RegistryError::Request {
                url: url.clone(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RegistryError::Http {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| RegistryError::Request {
            url: url.clone(),
            source: e,
        })?;
        let index: Value = serde_json::from_str(&body).map_err(|e| RegistryError::Decode {
            url: url.clone(),
            message: e.to_string(),
        })?;

        if !index.get("apps").is_some_and(Value::is_object) {
            return Err(RegistryError::Decode {
                url,
                message: "missing 'apps' object".to_string(),
            });
        }
        Ok(index)
    }

    /// Fetch the index entry of a single app.
    pub async fn fetch_app(&self, name: &str) -> Result<Value, RegistryError> {
        let index = self.fetch_index().await?;
        index
            .get("apps")
            .and_then(|apps| apps.get(name))
            .cloned()
            .ok_or_else(|| RegistryError::AppNotFound(name.to_string()))
    }
}

impl Default for RegistryClient {
    fn default() -> Self {
        Self::new(DEFAULT_REGISTRY_URL)
    }
}

/// Name and title of one registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppSummary {
    pub name: String,
    pub title: Option<String>,
}

/// Summarize every app in an index, sorted by name.
///
/// The title is taken from `metadata.title`, falling back to a top-level
/// `title`.
pub fn app_summaries(index: &Value) -> Vec<AppSummary> {
    let Some(apps) = index.get("apps").and_then(Value::as_object) else {
        return Vec::new();
    };

    let mut summaries: Vec<_> = apps
        .iter()
        .map(|(name, entry)| AppSummary {
            name: name.clone(),
            title: entry
                .pointer("/metadata/title")
                .or_else(|| entry.get("title"))
                .and_then(Value::as_str)
                .map(str::to_string),
        })
        .collect();
    summaries.sort_by(|a, b| a.name.cmp(&b.name));
    summaries
}
