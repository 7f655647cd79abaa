// src/models/mod.rs

//! Domain models for content retrieval and sitemap assembly.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod content;
mod sitemap;

// Re-export all public types
pub use config::{
    Config, ContentConfig, ListingConfig, LoggingConfig, RetryConfig, SitemapConfig,
    SitemapLimits, TransportMode,
};
pub use content::{ContentItem, ContentKind, decode_items};
pub use sitemap::{
    ChangeFreq, SitemapEntry, SitemapImage, SitemapListing, SitemapVideo, StaticRoute,
    VideoLocation,
};
