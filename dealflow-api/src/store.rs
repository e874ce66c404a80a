//! # Record store client
//!
//! Fetches and persists startup records against the external collection
//! service. The service is assumed to expose a simple record store:
//!
//! - `GET /v1/startups` returns the full, deduplicated-by-id catalog
//! - `PATCH /v1/startups/{id}` with `{"is_bookmarked": <bool>}` sets the
//!   bookmark flag; the call is idempotent and all-or-nothing
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dealflow::prelude::*;
//! # async fn example() -> Result<(), DealflowError> {
//! let store = HttpRecordStore::new()?;
//! let startups = store.fetch_all().await?;
//! store.set_bookmark("1", true).await?;
//! # Ok(())
//! # }
//! ```

use std::future::Future;

use serde::Serialize;
use snafu::prelude::*;
use tracing::debug;

use crate::{
    DEALFLOW_LOCAL_URL, Result,
    config::{DEALFLOW_API_KEY_ENV, DEALFLOW_URL_ENV, STARTUPS_PATH},
    error::{DealflowError, DeserializationSnafu, HttpSnafu},
    records::StartupRecord,
};

/// External collection service holding the startup catalog.
///
/// `fetch_all` must return an already-valid, deduplicated-by-id sequence.
/// `set_bookmark` must be idempotent and must not partially apply: either the
/// flag is set, or the call reports failure.
pub trait RecordStore: Send + Sync + 'static {
    /// Fetches the full catalog.
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<StartupRecord>>> + Send;

    /// Persists the bookmark flag for one record.
    fn set_bookmark(&self, id: &str, value: bool) -> impl Future<Output = Result<()>> + Send;
}

/// Configuration for [`HttpRecordStore`]. Defines the endpoint url and an
/// optional api key.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base url for the record store.
    /// If not provided in config, url is determined by:
    /// * the environment variable `DEALFLOW_URL`, if defined, or
    /// * `dealflow::DEALFLOW_LOCAL_URL` ("http://127.0.0.1:54321")
    pub base_url: String,

    /// Optional bearer token, sent as `Authorization: Bearer <key>`.
    /// Defaults to the `DEALFLOW_API_KEY` environment variable if set.
    pub api_key: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            base_url: std::env::var(DEALFLOW_URL_ENV)
                .unwrap_or(DEALFLOW_LOCAL_URL.to_string()),
            api_key: std::env::var(DEALFLOW_API_KEY_ENV).ok(),
        }
    }
}

impl StoreConfig {
    /// Sets the base url.
    pub fn base_url(self, base_url: impl Into<String>) -> Self {
        StoreConfig {
            base_url: base_url.into(),
            ..self
        }
    }

    /// Sets the api key.
    pub fn api_key(self, api_key: impl Into<String>) -> Self {
        StoreConfig {
            api_key: Some(api_key.into()),
            ..self
        }
    }
}

#[derive(Debug, Serialize)]
struct SetBookmarkBody {
    is_bookmarked: bool,
}

/// HTTP implementation of [`RecordStore`].
#[derive(Debug)]
pub struct HttpRecordStore {
    client: reqwest::Client,
    config: StoreConfig,
}

impl HttpRecordStore {
    /// Creates a store client with default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(StoreConfig::default())
    }

    /// Creates a store client with the provided configuration.
    pub fn with_config(config: StoreConfig) -> Result<Self> {
        let client = reqwest::Client::builder().no_proxy();
        Self::with_client(client, config)
    }

    /// Creates a store client from a `reqwest::ClientBuilder` and
    /// configuration. The builder can be customized with timeouts, proxies,
    /// dns servers, user agent, etc.
    pub fn with_client(builder: reqwest::ClientBuilder, config: StoreConfig) -> Result<Self> {
        debug!(url = ?config.base_url, "new record store client");
        let client = builder.build().context(HttpSnafu {
            method: "client-init",
            url: &config.base_url,
        })?;
        Ok(Self { client, config })
    }

    /// Returns the configuration.
    pub fn get_config(&self) -> &StoreConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.config.api_key.as_deref() {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    async fn check_status(
        method: &str,
        url: &str,
        response: reqwest::Response,
    ) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        Err(DealflowError::Api {
            code: status.as_u16(),
            method: method.to_string(),
            url: url.to_string(),
            message: response.text().await.unwrap_or_default(),
        })
    }
}

impl RecordStore for HttpRecordStore {
    async fn fetch_all(&self) -> Result<Vec<StartupRecord>> {
        let url = self.url(STARTUPS_PATH);
        debug!(%url, "fetch_all");
        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .context(HttpSnafu {
                method: "get",
                url: &url,
            })?;
        let response = Self::check_status("get", &url, response).await?;
        let data = response.bytes().await.context(HttpSnafu {
            method: "get",
            url: &url,
        })?;
        let records: Vec<StartupRecord> =
            serde_json::from_slice(&data).context(DeserializationSnafu)?;
        debug!(count = records.len(), "fetched catalog");
        Ok(records)
    }

    async fn set_bookmark(&self, id: &str, value: bool) -> Result<()> {
        let url = self.url(&format!("{STARTUPS_PATH}/{id}"));
        debug!(%url, value, "set_bookmark");
        let body = SetBookmarkBody {
            is_bookmarked: value,
        };
        let response = self
            .authorize(self.client.patch(&url))
            .json(&body)
            .send()
            .await
            .context(HttpSnafu {
                method: "patch",
                url: &url,
            })?;
        Self::check_status("patch", &url, response).await?;
        Ok(())
    }
}
