// src/sections.rs

//! Page sections that degrade to empty content instead of failing.
//!
//! A section whose fetch fails renders nothing. The failure is logged once
//! where it happens and handed back as [`Logged`], so callers can see in the
//! signature that the error is non-fatal and has already been reported.

use std::fmt;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, warn};

use crate::client::{ContentClient, Query, queries};
use crate::error::AppError;
use crate::models::{ContentItem, ContentKind, ListingConfig, decode_items};
use crate::ordering::{day_seed, diversify, seeded_shuffle, shuffled_random};

/// An error that has already been logged.
#[derive(Debug)]
pub struct Logged {
    pub section: &'static str,
    pub error: AppError,
}

impl fmt::Display for Logged {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "section '{}' unavailable: {}", self.section, self.error)
    }
}

/// Outcome of loading a section. `Err` means "render nothing".
pub type SectionResult<T> = std::result::Result<T, Logged>;

/// Fetch a section's content with retries, logging any failure.
pub async fn load_section<T: DeserializeOwned>(
    client: &ContentClient,
    section: &'static str,
    query: &Query,
) -> SectionResult<T> {
    client.fetch_with_retry(query).await.map_err(|error| {
        warn!(section, error = %error, "Section content unavailable, rendering empty");
        Logged { section, error }
    })
}

/// Home page content.
#[derive(Debug, Clone, Default)]
pub struct HomeFeed {
    /// Recommendations rotated once per calendar day
    pub daily_picks: Vec<ContentItem>,
    /// Latest articles interleaved by category
    pub featured: Vec<ContentItem>,
}

/// How many recommendations and articles to fetch before selecting.
const CANDIDATE_POOL: usize = 60;

impl HomeFeed {
    /// Fetch both sections concurrently and order them for display.
    ///
    /// Either section may come back empty independently of the other.
    pub async fn load(client: &ContentClient, config: &ListingConfig, today: NaiveDate) -> Self {
        let recommendations_query = queries::latest(ContentKind::Recommendation, CANDIDATE_POOL);
        let articles_query = queries::latest(ContentKind::Article, CANDIDATE_POOL);

        let (recommendations, articles) = futures::join!(
            load_section::<Vec<Value>>(client, "recommendations", &recommendations_query),
            load_section::<Vec<Value>>(client, "articles", &articles_query),
        );

        let feed = Self::from_items(
            decode_items(recommendations.unwrap_or_default()),
            decode_items(articles.unwrap_or_default()),
            config,
            today,
        );
        info!(
            daily_picks = feed.daily_picks.len(),
            featured = feed.featured.len(),
            "Home feed ready"
        );
        feed
    }

    /// Order already-fetched items.
    pub fn from_items(
        recommendations: Vec<ContentItem>,
        articles: Vec<ContentItem>,
        config: &ListingConfig,
        today: NaiveDate,
    ) -> Self {
        Self {
            daily_picks: daily_picks(&recommendations, config.daily_picks, today),
            featured: diversify(
                &articles,
                config.featured_count,
                |item: &ContentItem| item.category.clone(),
                |bucket| shuffled_random(&bucket),
            ),
        }
    }
}

/// The first `count` items of the day's seeded order.
pub fn daily_picks(items: &[ContentItem], count: usize, today: NaiveDate) -> Vec<ContentItem> {
    let mut picks = seeded_shuffle(items, day_seed(today));
    picks.truncate(count);
    picks
}
