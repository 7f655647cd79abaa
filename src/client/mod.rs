// src/client/mod.rs

//! Content query client.
//!
//! Queries are executed through a [`ContentTransport`] chosen once from
//! configuration:
//!
//! - [`DirectTransport`]: the store's HTTP query API, optionally edge-cached
//! - [`ProxiedTransport`]: a local relay used during development
//! - [`FakeTransport`]: canned responses for tests and offline runs

mod direct;
mod fake;
mod proxied;
pub mod queries;

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::models::{Config, TransportMode};
use crate::utils::http::create_async_client;
use crate::utils::{RetryPolicy, with_retry};

pub use direct::DirectTransport;
pub use fake::FakeTransport;
pub use proxied::ProxiedTransport;

/// A structured query expression plus its parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub text: String,
    pub params: BTreeMap<String, serde_json::Value>,
}

impl Query {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            params: BTreeMap::new(),
        }
    }

    /// Add a JSON-serializable parameter.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Deterministic key for caching this request.
    ///
    /// Parameters are ordered by name, so insertion order does not matter.
    pub fn cache_key(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.text.as_bytes());
        hasher.update([0u8]);
        for (name, value) in &self.params {
            hasher.update(name.as_bytes());
            hasher.update(b"=");
            hasher.update(value.to_string().as_bytes());
            hasher.update([0u8]);
        }
        hex::encode(hasher.finalize())
    }

    /// Append `query=` and one `$name=<json>` pair per parameter to `url`.
    pub fn encode_into(&self, url: &mut Url) {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("query", &self.text);
        for (name, value) in &self.params {
            pairs.append_pair(&format!("${name}"), &value.to_string());
        }
    }
}

/// Response envelope shared by the store API and the relay.
#[derive(Debug, Deserialize)]
pub(crate) struct QueryResponse {
    #[serde(default)]
    pub result: serde_json::Value,
}

/// Trait for content store transports.
#[async_trait]
pub trait ContentTransport: Send + Sync {
    /// Execute a query and return the raw result payload.
    async fn execute(&self, query: &Query) -> Result<serde_json::Value>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Executes queries against the content store.
#[derive(Clone)]
pub struct ContentClient {
    transport: Arc<dyn ContentTransport>,
    retry: RetryPolicy,
}

impl ContentClient {
    /// Create a client over an explicit transport.
    pub fn new(transport: Arc<dyn ContentTransport>, retry: RetryPolicy) -> Self {
        Self { transport, retry }
    }

    /// Build the transport selected by configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = create_async_client(&config.content)?;
        let transport: Arc<dyn ContentTransport> = match config.content.transport {
            TransportMode::Direct => Arc::new(DirectTransport::new(http, &config.content)?),
            TransportMode::Proxied => Arc::new(ProxiedTransport::new(http, &config.content)?),
        };
        tracing::debug!("Content client using {} transport", transport.name());
        Ok(Self::new(transport, RetryPolicy::from(&config.retry)))
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    pub fn transport_name(&self) -> &'static str {
        self.transport.name()
    }

    /// Execute a query once and deserialize the result.
    pub async fn fetch<T: DeserializeOwned>(&self, query: &Query) -> Result<T> {
        let value = self.transport.execute(query).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Execute a query under the client's retry policy.
    ///
    /// Only the transport call is retried. The payload is decoded once, so a
    /// result that does not match `T` fails immediately.
    pub async fn fetch_with_retry<T: DeserializeOwned>(&self, query: &Query) -> Result<T> {
        let value = with_retry(&self.retry, || self.transport.execute(query)).await?;
        Ok(serde_json::from_value(value)?)
    }
}
