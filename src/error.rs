// src/error.rs

//! Unified error handling for content retrieval and sitemap assembly.

use thiserror::Error;

/// Result type alias for mediadesk operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// The content store (or its relay) answered with a non-success status
    #[error("Content fetch failed with status {status} for {url}")]
    FetchFailed { status: u16, url: String },

    /// An attempt did not settle before the configured ceiling
    #[error("Content fetch timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// Every permitted attempt failed
    #[error("Content fetch failed after {attempts} attempts: {source}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: Box<AppError>,
    },

    /// Retry loop finished without ever observing an error
    #[error("Retry loop ended without a result or an error")]
    UnknownRetryFailure,

    /// Composing or writing the sitemap document failed
    #[error("Sitemap assembly failed: {0}")]
    AssemblyFailed(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a fetch failure for a non-success status.
    pub fn fetch_failed(status: u16, url: impl Into<String>) -> Self {
        Self::FetchFailed {
            status,
            url: url.into(),
        }
    }

    /// Create a timeout error for the given ceiling.
    pub fn timeout(timeout_ms: u64) -> Self {
        Self::Timeout { timeout_ms }
    }

    /// Create a sitemap assembly error.
    pub fn assembly(message: impl std::fmt::Display) -> Self {
        Self::AssemblyFailed(message.to_string())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether this error (or the last attempt it wraps) is a timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::Http(e) => e.is_timeout(),
            Self::RetriesExhausted { source, .. } => source.is_timeout(),
            _ => false,
        }
    }

    /// The error observed on the final attempt, unwrapping retry exhaustion.
    pub fn last_cause(&self) -> &AppError {
        match self {
            Self::RetriesExhausted { source, .. } => source.last_cause(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_timeout_sees_through_retries() {
        let err = AppError::RetriesExhausted {
            attempts: 4,
            source: Box::new(AppError::timeout(30_000)),
        };
        assert!(err.is_timeout());
        assert!(matches!(err.last_cause(), AppError::Timeout { timeout_ms: 30_000 }));
    }

    #[test]
    fn test_fetch_failed_is_not_timeout() {
        let err = AppError::fetch_failed(502, "https://cms.example/query");
        assert!(!err.is_timeout());
        assert_eq!(
            err.to_string(),
            "Content fetch failed with status 502 for https://cms.example/query"
        );
    }
}
