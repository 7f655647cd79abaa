// src/lambda/mod.rs

//! AWS Lambda handler for the sitemap endpoint.
//!
//! The function sits behind an API Gateway proxy integration:
//! 1. Accepts `GET` only (any other method, `HEAD` included, gets `405`)
//! 2. Builds the sitemap from static routes and one content query
//! 3. Returns it as `application/xml` with a long-lived cache policy
//!
//! Content failures degrade to a static-only sitemap; only assembly
//! failures produce a `500`.

use std::collections::BTreeMap;

use chrono::Local;
use lambda_runtime::{Error as LambdaError, LambdaEvent};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, instrument};

use crate::client::ContentClient;
use crate::error::Result;
use crate::models::Config;
use crate::sitemap::{CACHE_CONTROL, SitemapService};

/// API Gateway proxy response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl ApiResponse {
    fn new(status_code: u16, content_type: &str, body: String) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), content_type.to_string());
        Self {
            status_code,
            headers,
            body,
            is_base64_encoded: false,
        }
    }

    fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }

    /// `200` with the sitemap document.
    pub fn sitemap(xml: String) -> Self {
        Self::new(200, "application/xml", xml).header("Cache-Control", CACHE_CONTROL)
    }

    /// Plain-text error response.
    pub fn error(status_code: u16, message: &str) -> Self {
        Self::new(status_code, "text/plain", message.to_string())
    }
}

/// HTTP method of an API Gateway event (REST or HTTP API payload).
///
/// Direct invocations without a method are treated as `GET`.
pub fn request_method(event: &Value) -> String {
    event
        .get("httpMethod")
        .or_else(|| event.pointer("/requestContext/http/method"))
        .and_then(Value::as_str)
        .unwrap_or("GET")
        .to_uppercase()
}

/// Build the service from `CONFIG_PATH` (optional) and environment overrides.
pub fn load_service() -> Result<SitemapService> {
    let mut config = match std::env::var("CONFIG_PATH") {
        Ok(path) => Config::load_or_default(path),
        Err(_) => Config::default(),
    };
    config.apply_env();
    config.validate()?;

    let client = ContentClient::from_config(&config)?;
    info!(
        transport = client.transport_name(),
        base_url = %config.sitemap.base_url,
        "Sitemap service configured"
    );
    Ok(SitemapService::new(client, config.sitemap))
}

/// Main Lambda handler function.
#[instrument(skip(service, event))]
pub async fn handler(
    service: &SitemapService,
    event: LambdaEvent<Value>,
) -> std::result::Result<ApiResponse, LambdaError> {
    let start = std::time::Instant::now();
    let (request, _context) = event.into_parts();
    Ok(respond(service, &request, start).await)
}

async fn respond(service: &SitemapService, request: &Value, start: std::time::Instant) -> ApiResponse {
    let method = request_method(request);
    if method != "GET" {
        info!("Rejecting {} request", method);
        return ApiResponse::error(405, "Method Not Allowed").header("Allow", "GET");
    }

    match service.generate(Local::now().date_naive()).await {
        Ok(xml) => {
            info!(
                "Sitemap served: {} bytes in {}ms",
                xml.len(),
                start.elapsed().as_millis()
            );
            ApiResponse::sitemap(xml)
        }
        Err(e) => {
            error!("Sitemap generation failed: {}", e);
            ApiResponse::error(500, "Error generating sitemap")
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::client::FakeTransport;
    use crate::utils::RetryPolicy;

    fn service(transport: FakeTransport) -> SitemapService {
        let client = ContentClient::new(Arc::new(transport), RetryPolicy::default());
        SitemapService::new(client, Config::default().sitemap)
    }

    #[test]
    fn test_request_method_variants() {
        assert_eq!(request_method(&json!({"httpMethod": "get"})), "GET");
        assert_eq!(
            request_method(&json!({"requestContext": {"http": {"method": "POST"}}})),
            "POST"
        );
        assert_eq!(request_method(&json!({})), "GET");
    }

    #[test]
    fn test_response_serializes_for_api_gateway() {
        let response = ApiResponse::sitemap("<urlset/>".to_string());
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["statusCode"], 200);
        assert_eq!(value["headers"]["Content-Type"], "application/xml");
        assert_eq!(
            value["headers"]["Cache-Control"],
            "public, s-maxage=3600, stale-while-revalidate=86400"
        );
        assert_eq!(value["isBase64Encoded"], false);
    }

    #[tokio::test(start_paused = true)]
    async fn test_content_failure_still_returns_200() {
        let service = service(FakeTransport::failing(503));
        let response = respond(&service, &json!({"httpMethod": "GET"}), std::time::Instant::now()).await;

        assert_eq!(response.status_code, 200);
        assert_eq!(response.body.matches("<url>").count(), 15);
    }

    #[tokio::test]
    async fn test_non_get_methods_are_rejected() {
        let transport = Arc::new(FakeTransport::with_result(json!({})));
        let client = ContentClient::new(transport.clone(), RetryPolicy::default());
        let service = SitemapService::new(client, Config::default().sitemap);

        for method in ["POST", "HEAD", "PUT"] {
            let response =
                respond(&service, &json!({"httpMethod": method}), std::time::Instant::now()).await;
            assert_eq!(response.status_code, 405, "{method}");
            assert_eq!(response.headers.get("Allow").map(String::as_str), Some("GET"));
            assert!(!response.body.contains("<urlset"));
        }
        assert_eq!(transport.calls(), 0);
    }
}
