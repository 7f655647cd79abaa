//! Query builders for the content the site renders.

use crate::client::Query;
use crate::models::{ContentKind, SitemapLimits};

/// Projection every listing query shares, matching [`crate::models::ContentItem`].
const ITEM_PROJECTION: &str = r#"{
  _id,
  _updatedAt,
  title,
  "slug": slug.current,
  "category": coalesce(universe->title, category),
  contentType,
  "imageUrl": mainImage.asset->url,
  videoUrl,
  "description": coalesce(excerpt, description),
  "tags": coalesce(tags, []),
  publishedAt
}"#;

const SITEMAP_QUERY: &str = r#"{
  "articles": *[_type == "article" && defined(slug.current)] | order(coalesce(publishedAt, _createdAt) desc) [0...$articles] {
    _id, _updatedAt, title, "slug": slug.current, contentType,
    "imageUrl": mainImage.asset->url, videoUrl, "description": excerpt
  },
  "series": *[_type == "series" && defined(slug.current)] | order(_createdAt desc) [0...$series] {
    _id, _updatedAt, title, "slug": slug.current, "imageUrl": mainImage.asset->url
  },
  "portraits": *[_type == "portraitStory" && defined(slug.current)] | order(coalesce(publishedAt, _createdAt) desc) [0...$portraits] {
    _id, _updatedAt, title, "slug": slug.current, "imageUrl": mainImage.asset->url
  },
  "recommendations": *[_type == "recommendation" && defined(slug.current)] | order(_createdAt desc) [0...$recommendations] {
    _id, _updatedAt, title, "slug": slug.current, "imageUrl": mainImage.asset->url
  },
  "universes": *[_type == "universe" && defined(slug.current)] | order(_createdAt desc) [0...$universes] {
    _id, _updatedAt, title, "slug": slug.current, "imageUrl": mainImage.asset->url
  }
}"#;

/// Single query fetching every sitemap listing, capped per kind.
pub fn sitemap_listing(limits: &SitemapLimits) -> Query {
    Query::new(SITEMAP_QUERY)
        .param("articles", limits.articles)
        .param("series", limits.series)
        .param("portraits", limits.portraits)
        .param("recommendations", limits.recommendations)
        .param("universes", limits.universes)
}

/// Newest items of one kind, up to `limit`.
pub fn latest(kind: ContentKind, limit: usize) -> Query {
    let text = format!(
        "*[_type == $type] | order(coalesce(publishedAt, _createdAt) desc) [0...$limit] {ITEM_PROJECTION}"
    );
    Query::new(text)
        .param("type", kind.document_type())
        .param("limit", limit)
}

/// One item of a kind by slug.
pub fn by_slug(kind: ContentKind, slug: &str) -> Query {
    let text = format!("*[_type == $type && slug.current == $slug][0] {ITEM_PROJECTION}");
    Query::new(text)
        .param("type", kind.document_type())
        .param("slug", slug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sitemap_listing_params() {
        let query = sitemap_listing(&SitemapLimits::default());
        assert_eq!(query.params.get("articles"), Some(&json!(500)));
        assert_eq!(query.params.get("series"), Some(&json!(100)));
        assert_eq!(query.params.get("portraits"), Some(&json!(200)));
        assert_eq!(query.params.get("recommendations"), Some(&json!(100)));
        assert_eq!(query.params.get("universes"), Some(&json!(20)));
        assert!(query.text.contains("$articles"));
    }

    #[test]
    fn test_latest_uses_document_type() {
        let query = latest(ContentKind::Portrait, 12);
        assert_eq!(query.params.get("type"), Some(&json!("portraitStory")));
        assert_eq!(query.params.get("limit"), Some(&json!(12)));
        assert!(query.text.contains("\"slug\": slug.current"));
    }
}
