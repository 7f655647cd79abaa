//! Development transport that goes through a local relay.

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::client::{ContentTransport, Query, QueryResponse};
use crate::error::{AppError, Result};
use crate::models::ContentConfig;
use crate::utils::http::get_text;

/// Sends queries to a same-origin relay that forwards them to the store.
pub struct ProxiedTransport {
    client: Client,
    relay: Url,
}

impl ProxiedTransport {
    pub fn new(client: Client, config: &ContentConfig) -> Result<Self> {
        let relay = Url::parse(&config.proxy_url)?;
        if relay.cannot_be_a_base() {
            return Err(AppError::config(format!(
                "content.proxy_url is not a usable base URL: {}",
                config.proxy_url
            )));
        }
        Ok(Self { client, relay })
    }
}

#[async_trait]
impl ContentTransport for ProxiedTransport {
    async fn execute(&self, query: &Query) -> Result<serde_json::Value> {
        let mut url = self.relay.clone();
        query.encode_into(&mut url);

        tracing::debug!(url = %url, "Relaying content query");
        let body = get_text(&self.client, url, None).await?;
        let response: QueryResponse = serde_json::from_str(&body)?;
        Ok(response.result)
    }

    fn name(&self) -> &'static str {
        "proxied"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_base_relay() {
        let config = ContentConfig {
            proxy_url: "mailto:relay@example.com".to_string(),
            ..ContentConfig::default()
        };
        assert!(ProxiedTransport::new(Client::new(), &config).is_err());
    }

    #[test]
    fn test_accepts_local_relay() {
        let config = ContentConfig::default();
        let transport = ProxiedTransport::new(Client::new(), &config).unwrap();
        assert_eq!(transport.relay.as_str(), "http://localhost:3000/api/content");
    }
}
