//! Direct transport to the content store's HTTP query API.

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::client::{ContentTransport, Query, QueryResponse};
use crate::error::Result;
use crate::models::ContentConfig;
use crate::utils::http::get_text;

/// Calls `{api_base}/v{version}/data/query/{dataset}` directly.
pub struct DirectTransport {
    client: Client,
    endpoint: Url,
    token: Option<String>,
}

impl DirectTransport {
    pub fn new(client: Client, config: &ContentConfig) -> Result<Self> {
        Ok(Self {
            client,
            endpoint: Self::endpoint(config)?,
            token: config.token.clone(),
        })
    }

    /// Query endpoint, on the edge-cached host when `use_cdn` is set.
    ///
    /// Authenticated requests always go to the live host.
    fn endpoint(config: &ContentConfig) -> Result<Url> {
        let host = if config.use_cdn && config.token.is_none() {
            "apicdn.sanity.io"
        } else {
            "api.sanity.io"
        };
        let version = config.api_version.trim_start_matches('v');
        let url = format!(
            "https://{}.{}/v{}/data/query/{}",
            config.project_id, host, version, config.dataset
        );
        Ok(Url::parse(&url)?)
    }
}

#[async_trait]
impl ContentTransport for DirectTransport {
    async fn execute(&self, query: &Query) -> Result<serde_json::Value> {
        let mut url = self.endpoint.clone();
        query.encode_into(&mut url);

        let body = get_text(&self.client, url, self.token.as_deref()).await?;
        let response: QueryResponse = serde_json::from_str(&body)?;
        Ok(response.result)
    }

    fn name(&self) -> &'static str {
        "direct"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_uses_cdn_host() {
        let config = ContentConfig {
            project_id: "abc123".to_string(),
            ..ContentConfig::default()
        };
        assert_eq!(
            DirectTransport::endpoint(&config).unwrap().as_str(),
            "https://abc123.apicdn.sanity.io/v2024-01-01/data/query/production"
        );
    }

    #[test]
    fn test_endpoint_without_cdn_or_with_token() {
        let mut config = ContentConfig {
            project_id: "abc123".to_string(),
            use_cdn: false,
            api_version: "v2023-05-03".to_string(),
            ..ContentConfig::default()
        };
        assert_eq!(
            DirectTransport::endpoint(&config).unwrap().as_str(),
            "https://abc123.api.sanity.io/v2023-05-03/data/query/production"
        );

        config.use_cdn = true;
        config.token = Some("secret".to_string());
        assert!(
            DirectTransport::endpoint(&config)
                .unwrap()
                .as_str()
                .starts_with("https://abc123.api.sanity.io/")
        );
    }
}
