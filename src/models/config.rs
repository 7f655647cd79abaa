//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::sitemap::{ChangeFreq, StaticRoute};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Content store connection settings
    #[serde(default)]
    pub content: ContentConfig,

    /// Retry and timeout policy for content fetches
    #[serde(default)]
    pub retry: RetryConfig,

    /// Sitemap endpoint settings
    #[serde(default)]
    pub sitemap: SitemapConfig,

    /// Listing and section sizes
    #[serde(default)]
    pub listing: ListingConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration if the file exists.
    ///
    /// A missing file is `Ok(None)`; an unreadable or malformed file is an error.
    pub fn load_optional(path: impl AsRef<Path>) -> Result<Option<Self>> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(Some(toml::from_str(&content)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            tracing::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Override values from environment variables.
    ///
    /// Unparseable numeric or boolean values are ignored.
    pub fn apply_env(&mut self) {
        self.apply_vars(|key| std::env::var(key).ok());
    }

    fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(v) = var("CONTENT_PROJECT_ID") {
            self.content.project_id = v;
        }
        if let Some(v) = var("CONTENT_DATASET") {
            self.content.dataset = v;
        }
        if let Some(v) = var("CONTENT_API_VERSION") {
            self.content.api_version = v;
        }
        if let Some(v) = var("CONTENT_TRANSPORT") {
            match v.to_lowercase().as_str() {
                "direct" => self.content.transport = TransportMode::Direct,
                "proxied" | "proxy" => self.content.transport = TransportMode::Proxied,
                other => tracing::warn!("Ignoring unknown CONTENT_TRANSPORT value: {}", other),
            }
        }
        if let Some(v) = var("CONTENT_PROXY_URL") {
            self.content.proxy_url = v;
        }
        if let Some(v) = var("CONTENT_USE_CDN").and_then(|v| v.parse().ok()) {
            self.content.use_cdn = v;
        }
        if let Some(v) = var("CONTENT_API_TOKEN") {
            self.content.token = Some(v);
        }
        if let Some(v) = var("FETCH_MAX_RETRIES").and_then(|v| v.parse().ok()) {
            self.retry.max_retries = v;
        }
        if let Some(v) = var("FETCH_TIMEOUT_MS").and_then(|v| v.parse().ok()) {
            self.retry.timeout_ms = v;
        }
        if let Some(v) = var("FETCH_BUDGET_MS").and_then(|v| v.parse().ok()) {
            self.retry.budget_ms = Some(v);
        }
        if let Some(v) = var("SITE_BASE_URL") {
            self.sitemap.base_url = v;
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.content.project_id.trim().is_empty() {
            return Err(AppError::validation("content.project_id is empty"));
        }
        if self.content.dataset.trim().is_empty() {
            return Err(AppError::validation("content.dataset is empty"));
        }
        if self.content.transport == TransportMode::Proxied
            && self.content.proxy_url.trim().is_empty()
        {
            return Err(AppError::validation(
                "content.proxy_url is required for the proxied transport",
            ));
        }
        if self.content.user_agent.trim().is_empty() {
            return Err(AppError::validation("content.user_agent is empty"));
        }
        if self.retry.timeout_ms == 0 {
            return Err(AppError::validation("retry.timeout_ms must be > 0"));
        }
        url::Url::parse(&self.sitemap.base_url)
            .map_err(|e| AppError::validation(format!("sitemap.base_url is invalid: {e}")))?;
        for route in &self.sitemap.static_routes {
            if !route.path.starts_with('/') {
                return Err(AppError::validation(format!(
                    "static route '{}' must start with '/'",
                    route.path
                )));
            }
            if !(0.0..=1.0).contains(&route.priority) {
                return Err(AppError::validation(format!(
                    "static route '{}' has priority {} outside 0.0..=1.0",
                    route.path, route.priority
                )));
            }
        }
        if self.listing.page_size == 0 {
            return Err(AppError::validation("listing.page_size must be > 0"));
        }
        Ok(())
    }
}

/// Which transport reaches the content store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    /// Call the store's HTTP API directly (production)
    Direct,
    /// Go through a local relay (development, avoids cross-origin limits)
    Proxied,
}

/// Content store connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Store project identifier
    #[serde(default = "defaults::project_id")]
    pub project_id: String,

    /// Dataset name within the project
    #[serde(default = "defaults::dataset")]
    pub dataset: String,

    /// Dated API version
    #[serde(default = "defaults::api_version")]
    pub api_version: String,

    /// Transport selection
    #[serde(default = "defaults::transport")]
    pub transport: TransportMode,

    /// Relay endpoint used by the proxied transport
    #[serde(default = "defaults::proxy_url")]
    pub proxy_url: String,

    /// Use the edge-cached API host for direct calls
    #[serde(default = "defaults::use_cdn")]
    pub use_cdn: bool,

    /// Optional read token for the direct transport
    #[serde(default, skip_serializing)]
    pub token: Option<String>,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            project_id: defaults::project_id(),
            dataset: defaults::dataset(),
            api_version: defaults::api_version(),
            transport: defaults::transport(),
            proxy_url: defaults::proxy_url(),
            use_cdn: defaults::use_cdn(),
            token: None,
            user_agent: defaults::user_agent(),
        }
    }
}

/// Retry and timeout policy for content fetches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Retries after the first attempt
    #[serde(default = "defaults::max_retries")]
    pub max_retries: u32,

    /// Ceiling for a single attempt, in milliseconds
    #[serde(default = "defaults::timeout_ms")]
    pub timeout_ms: u64,

    /// Optional ceiling on total time spent across attempts
    #[serde(default)]
    pub budget_ms: Option<u64>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: defaults::max_retries(),
            timeout_ms: defaults::timeout_ms(),
            budget_ms: None,
        }
    }
}

/// Per-kind caps for the sitemap listing query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SitemapLimits {
    #[serde(default = "defaults::limit_articles")]
    pub articles: usize,
    #[serde(default = "defaults::limit_series")]
    pub series: usize,
    #[serde(default = "defaults::limit_portraits")]
    pub portraits: usize,
    #[serde(default = "defaults::limit_recommendations")]
    pub recommendations: usize,
    #[serde(default = "defaults::limit_universes")]
    pub universes: usize,
}

impl Default for SitemapLimits {
    fn default() -> Self {
        Self {
            articles: defaults::limit_articles(),
            series: defaults::limit_series(),
            portraits: defaults::limit_portraits(),
            recommendations: defaults::limit_recommendations(),
            universes: defaults::limit_universes(),
        }
    }
}

/// Sitemap endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SitemapConfig {
    /// Absolute site origin, without trailing slash
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Hand-maintained routes that are not content driven
    #[serde(default = "defaults::static_routes")]
    pub static_routes: Vec<StaticRoute>,

    /// Listing query caps
    #[serde(default)]
    pub limits: SitemapLimits,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            static_routes: defaults::static_routes(),
            limits: SitemapLimits::default(),
        }
    }
}

/// Listing and section sizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Items per page in list views
    #[serde(default = "defaults::page_size")]
    pub page_size: usize,

    /// Number of "today's picks"
    #[serde(default = "defaults::daily_picks")]
    pub daily_picks: usize,

    /// Number of category-diversified featured articles
    #[serde(default = "defaults::featured_count")]
    pub featured_count: usize,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: defaults::page_size(),
            daily_picks: defaults::daily_picks(),
            featured_count: defaults::featured_count(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level filter when RUST_LOG is unset
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    use super::{ChangeFreq, StaticRoute, TransportMode};

    // Content store defaults
    pub fn project_id() -> String {
        "mediadesk".into()
    }
    pub fn dataset() -> String {
        "production".into()
    }
    pub fn api_version() -> String {
        "2024-01-01".into()
    }
    pub fn transport() -> TransportMode {
        TransportMode::Direct
    }
    pub fn proxy_url() -> String {
        "http://localhost:3000/api/content".into()
    }
    pub fn use_cdn() -> bool {
        true
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; mediadesk/1.0)".into()
    }

    // Retry defaults
    pub fn max_retries() -> u32 {
        3
    }
    pub fn timeout_ms() -> u64 {
        30_000
    }

    // Sitemap defaults
    pub fn base_url() -> String {
        "https://www.example.com".into()
    }
    pub fn limit_articles() -> usize {
        500
    }
    pub fn limit_series() -> usize {
        100
    }
    pub fn limit_portraits() -> usize {
        200
    }
    pub fn limit_recommendations() -> usize {
        100
    }
    pub fn limit_universes() -> usize {
        20
    }

    pub fn static_routes() -> Vec<StaticRoute> {
        let route = |path: &str, priority: f32, changefreq: ChangeFreq| StaticRoute {
            path: path.to_string(),
            priority,
            changefreq,
        };
        vec![
            route("/", 1.0, ChangeFreq::Daily),
            route("/articles", 0.9, ChangeFreq::Daily),
            route("/videos", 0.9, ChangeFreq::Daily),
            route("/series", 0.8, ChangeFreq::Weekly),
            route("/portraits", 0.8, ChangeFreq::Weekly),
            route("/recommendations", 0.8, ChangeFreq::Weekly),
            route("/universes", 0.7, ChangeFreq::Weekly),
            route("/search", 0.5, ChangeFreq::Monthly),
            route("/about", 0.5, ChangeFreq::Monthly),
            route("/contact", 0.5, ChangeFreq::Monthly),
            route("/newsletter", 0.4, ChangeFreq::Monthly),
            route("/legal-notice", 0.2, ChangeFreq::Yearly),
            route("/privacy-policy", 0.2, ChangeFreq::Yearly),
            route("/terms", 0.2, ChangeFreq::Yearly),
            route("/cookies", 0.2, ChangeFreq::Yearly),
        ]
    }

    // Listing defaults
    pub fn page_size() -> usize {
        6
    }
    pub fn daily_picks() -> usize {
        3
    }
    pub fn featured_count() -> usize {
        6
    }

    // Logging defaults
    pub fn log_level() -> String {
        "info".into()
    }
}
