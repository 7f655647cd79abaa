//! Content items as returned by the content store.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::models::sitemap::ChangeFreq;

/// A content record shared by every content type.
///
/// Type-specific fields the store projects beyond this shape land in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Store document identifier
    #[serde(rename = "_id", default, deserialize_with = "null_as_default")]
    pub id: String,

    /// Display title; untitled documents project `null`
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    /// Category or universe the item belongs to
    #[serde(default)]
    pub category: Option<String>,

    /// Editorial type tag (e.g. "video", "interview")
    #[serde(default, rename = "contentType")]
    pub content_type: Option<String>,

    /// URL path segment
    #[serde(default)]
    pub slug: Option<String>,

    /// Resolved main image URL
    #[serde(default, rename = "imageUrl")]
    pub image_url: Option<String>,

    /// External video URL for video content
    #[serde(default, rename = "videoUrl")]
    pub video_url: Option<String>,

    /// Short description or excerpt
    #[serde(default)]
    pub description: Option<String>,

    /// Free-form tags
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,

    /// Last modification timestamp
    #[serde(default, rename = "_updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Publication timestamp
    #[serde(default, rename = "publishedAt")]
    pub published_at: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ContentItem {
    /// Create an item with only the identifying fields set.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            category: None,
            content_type: None,
            slug: None,
            image_url: None,
            video_url: None,
            description: None,
            tags: Vec::new(),
            updated_at: None,
            published_at: None,
            extra: BTreeMap::new(),
        }
    }

    /// Whether the item is tagged as a video.
    pub fn is_video(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case("video"))
    }
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode items one by one, skipping (and logging) those that do not fit.
pub fn decode_items(values: Vec<serde_json::Value>) -> Vec<ContentItem> {
    values
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<ContentItem>(value) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(error = %e, "Skipping undecodable content item");
                None
            }
        })
        .collect()
}

/// Content kinds that get their own pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Article,
    Series,
    Portrait,
    Recommendation,
    Universe,
}

impl ContentKind {
    pub const ALL: [ContentKind; 5] = [
        ContentKind::Article,
        ContentKind::Series,
        ContentKind::Portrait,
        ContentKind::Recommendation,
        ContentKind::Universe,
    ];

    /// URL prefix under which items of this kind are served.
    pub fn path_prefix(&self) -> &'static str {
        match self {
            ContentKind::Article => "/article/",
            ContentKind::Series => "/series/",
            ContentKind::Portrait => "/portrait/",
            ContentKind::Recommendation => "/recommendation/",
            ContentKind::Universe => "/universe/",
        }
    }

    /// Store document type name.
    pub fn document_type(&self) -> &'static str {
        match self {
            ContentKind::Article => "article",
            ContentKind::Series => "series",
            ContentKind::Portrait => "portraitStory",
            ContentKind::Recommendation => "recommendation",
            ContentKind::Universe => "universe",
        }
    }

    /// Sitemap priority for item pages of this kind.
    pub fn priority(&self) -> f32 {
        match self {
            ContentKind::Article => 0.7,
            ContentKind::Series => 0.7,
            ContentKind::Portrait => 0.6,
            ContentKind::Recommendation => 0.5,
            ContentKind::Universe => 0.8,
        }
    }

    /// Sitemap change frequency for item pages of this kind.
    pub fn changefreq(&self) -> ChangeFreq {
        match self {
            ContentKind::Article | ContentKind::Universe => ChangeFreq::Weekly,
            _ => ChangeFreq::Monthly,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().trim_end_matches('s') {
            "article" => Some(ContentKind::Article),
            "serie" => Some(ContentKind::Series),
            "portrait" => Some(ContentKind::Portrait),
            "recommendation" => Some(ContentKind::Recommendation),
            "universe" => Some(ContentKind::Universe),
            _ => None,
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContentKind::Article => "article",
            ContentKind::Series => "series",
            ContentKind::Portrait => "portrait",
            ContentKind::Recommendation => "recommendation",
            ContentKind::Universe => "universe",
        };
        f.write_str(name)
    }
}
