//! Lambda entry point for the sitemap endpoint.
//!
//! ## Environment Variables
//!
//! - `CONFIG_PATH`: Optional TOML configuration bundled with the function
//! - `CONTENT_PROJECT_ID`, `CONTENT_DATASET`, `CONTENT_API_VERSION`: Store location
//! - `CONTENT_TRANSPORT`: `direct` (default) or `proxied`
//! - `CONTENT_USE_CDN`, `CONTENT_API_TOKEN`, `CONTENT_PROXY_URL`: Transport options
//! - `FETCH_MAX_RETRIES`, `FETCH_TIMEOUT_MS`, `FETCH_BUDGET_MS`: Retry policy
//! - `SITE_BASE_URL`: Absolute origin used in `<loc>` elements
//! - `RUST_LOG`: Log level (e.g., `info`, `debug`)

use lambda_runtime::service_fn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mediadesk::lambda;

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    // Initialize tracing for Lambda
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    tracing::info!("mediadesk sitemap function starting...");

    let service = lambda::load_service()?;
    let service = &service;

    lambda_runtime::run(service_fn(move |event| async move {
        lambda::handler(service, event).await
    }))
    .await
}
