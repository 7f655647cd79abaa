//! Sitemap data structures.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::content::{ContentItem, decode_items};

/// Crawl change-frequency hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl fmt::Display for ChangeFreq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ChangeFreq::Always => "always",
            ChangeFreq::Hourly => "hourly",
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
            ChangeFreq::Yearly => "yearly",
            ChangeFreq::Never => "never",
        };
        f.write_str(s)
    }
}

/// A hand-maintained, non content-driven route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticRoute {
    pub path: String,
    pub priority: f32,
    pub changefreq: ChangeFreq,
}

/// Image attached to a sitemap URL.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapImage {
    pub loc: String,
    pub title: String,
}

/// Where a sitemap video can be played.
#[derive(Debug, Clone, PartialEq)]
pub enum VideoLocation {
    /// Direct media file or page URL
    Content(String),
    /// Embeddable player URL
    Player(String),
}

/// Video attached to a sitemap URL.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapVideo {
    pub thumbnail_loc: String,
    pub title: String,
    pub description: String,
    pub location: VideoLocation,
}

/// One `<url>` element of the sitemap.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: NaiveDate,
    pub changefreq: ChangeFreq,
    pub priority: f32,
    pub image: Option<SitemapImage>,
    pub video: Option<SitemapVideo>,
}

/// Result of the sitemap listing query, one array per content kind.
///
/// Items are decoded individually: a malformed document drops only itself.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SitemapListing {
    #[serde(default, deserialize_with = "lenient_items")]
    pub articles: Option<Vec<ContentItem>>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub series: Option<Vec<ContentItem>>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub portraits: Option<Vec<ContentItem>>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub recommendations: Option<Vec<ContentItem>>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub universes: Option<Vec<ContentItem>>,
}

fn lenient_items<'de, D>(deserializer: D) -> Result<Option<Vec<ContentItem>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<serde_json::Value>> = Option::deserialize(deserializer)?;
    Ok(raw.map(decode_items))
}

impl SitemapListing {
    /// Total number of items across all kinds.
    pub fn len(&self) -> usize {
        [
            &self.articles,
            &self.series,
            &self.portraits,
            &self.recommendations,
            &self.universes,
        ]
        .iter()
        .map(|items| items.as_ref().map_or(0, Vec::len))
        .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
