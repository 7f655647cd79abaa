// src/sitemap/mod.rs

//! Sitemap assembly.
//!
//! Static routes from configuration are merged with one listing query over
//! the content store. A failed query never fails the sitemap: it is logged
//! and the document is built from static routes alone.

mod xml;

use chrono::NaiveDate;
use tracing::{error, info};

use crate::client::{ContentClient, queries};
use crate::error::Result;
use crate::models::{
    ContentItem, ContentKind, SitemapConfig, SitemapEntry, SitemapImage, SitemapListing,
    SitemapVideo, StaticRoute, VideoLocation,
};
use crate::utils::url::{site_url, youtube_embed, youtube_id, youtube_thumbnail};

pub use xml::render_sitemap;

/// Cache policy for the sitemap response.
pub const CACHE_CONTROL: &str = "public, s-maxage=3600, stale-while-revalidate=86400";

/// Builds the sitemap document from configuration and the content store.
#[derive(Clone)]
pub struct SitemapService {
    client: ContentClient,
    config: SitemapConfig,
}

impl SitemapService {
    pub fn new(client: ContentClient, config: SitemapConfig) -> Self {
        Self { client, config }
    }

    /// Fetch the listing, swallowing failures as `None`.
    pub async fn fetch_listing(&self) -> Option<SitemapListing> {
        let query = queries::sitemap_listing(&self.config.limits);
        match self.client.fetch_with_retry::<Option<SitemapListing>>(&query).await {
            Ok(listing) => listing,
            Err(e) => {
                error!(error = %e, "Sitemap content query failed, serving static routes only");
                None
            }
        }
    }

    /// Produce the full XML document for `today`.
    ///
    /// Only a composition failure is returned as an error.
    pub async fn generate(&self, today: NaiveDate) -> Result<String> {
        let listing = self.fetch_listing().await;
        let dynamic = listing.as_ref().map_or(0, SitemapListing::len);
        let entries = build_entries(&self.config, listing.as_ref(), today);
        info!(
            total = entries.len(),
            static_routes = self.config.static_routes.len(),
            dynamic,
            "Sitemap assembled"
        );
        render_sitemap(&entries)
    }
}

/// Static routes followed by one entry per content item that has a slug.
pub fn build_entries(
    config: &SitemapConfig,
    listing: Option<&SitemapListing>,
    today: NaiveDate,
) -> Vec<SitemapEntry> {
    let mut entries: Vec<SitemapEntry> = config
        .static_routes
        .iter()
        .map(|route| static_entry(&config.base_url, route, today))
        .collect();

    let Some(listing) = listing else {
        return entries;
    };

    let groups = [
        (ContentKind::Article, &listing.articles),
        (ContentKind::Series, &listing.series),
        (ContentKind::Portrait, &listing.portraits),
        (ContentKind::Recommendation, &listing.recommendations),
        (ContentKind::Universe, &listing.universes),
    ];
    for (kind, items) in groups {
        entries.extend(
            items
                .iter()
                .flatten()
                .filter_map(|item| content_entry(&config.base_url, kind, item, today)),
        );
    }
    entries
}

fn static_entry(base_url: &str, route: &StaticRoute, today: NaiveDate) -> SitemapEntry {
    SitemapEntry {
        loc: site_url(base_url, &route.path),
        lastmod: today,
        changefreq: route.changefreq,
        priority: route.priority,
        image: None,
        video: None,
    }
}

fn content_entry(
    base_url: &str,
    kind: ContentKind,
    item: &ContentItem,
    today: NaiveDate,
) -> Option<SitemapEntry> {
    let slug = item.slug.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
    let path = format!("{}{}", kind.path_prefix(), slug);

    let image = item.image_url.as_ref().map(|loc| SitemapImage {
        loc: loc.clone(),
        title: item.title.clone(),
    });

    let video = if kind == ContentKind::Article && item.is_video() {
        video_for(item)
    } else {
        None
    };

    Some(SitemapEntry {
        loc: site_url(base_url, &path),
        lastmod: item
            .updated_at
            .map(|ts| ts.date_naive())
            .unwrap_or(today),
        changefreq: kind.changefreq(),
        priority: kind.priority(),
        image,
        video,
    })
}

/// Video block for a video article; `None` without a usable thumbnail.
fn video_for(item: &ContentItem) -> Option<SitemapVideo> {
    let video_url = item.video_url.as_deref()?;
    let (thumbnail_loc, location) = match youtube_id(video_url) {
        Some(id) => (youtube_thumbnail(&id), VideoLocation::Player(youtube_embed(&id))),
        None => (
            item.image_url.clone()?,
            VideoLocation::Content(video_url.to_string()),
        ),
    };

    let description = item
        .description
        .clone()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| item.title.clone());

    Some(SitemapVideo {
        thumbnail_loc,
        title: item.title.clone(),
        description,
        location,
    })
}
