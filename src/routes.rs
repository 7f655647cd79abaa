// src/routes.rs

//! URL routing table, including legacy aliases kept for old links.

use crate::models::ContentKind;

/// Pages the site can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Listing(ContentKind),
    Videos,
    Detail(ContentKind),
    Search,
    About,
    Contact,
    Newsletter,
    LegalNotice,
    PrivacyPolicy,
    Terms,
    Cookies,
}

/// A resolved path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub page: Page,
    /// Captured `:slug` segment, if the pattern has one
    pub slug: Option<String>,
    /// Whether the path matched a legacy alias
    pub legacy: bool,
}

struct Route {
    pattern: &'static str,
    page: Page,
    legacy: bool,
}

/// Ordered pattern table; the first matching pattern wins.
pub struct RouteTable {
    routes: Vec<Route>,
}

impl Default for RouteTable {
    fn default() -> Self {
        let canonical = [
            ("/", Page::Home),
            ("/articles", Page::Listing(ContentKind::Article)),
            ("/article/:slug", Page::Detail(ContentKind::Article)),
            ("/videos", Page::Videos),
            ("/series", Page::Listing(ContentKind::Series)),
            ("/series/:slug", Page::Detail(ContentKind::Series)),
            ("/portraits", Page::Listing(ContentKind::Portrait)),
            ("/portrait/:slug", Page::Detail(ContentKind::Portrait)),
            ("/recommendations", Page::Listing(ContentKind::Recommendation)),
            ("/recommendation/:slug", Page::Detail(ContentKind::Recommendation)),
            ("/universes", Page::Listing(ContentKind::Universe)),
            ("/universe/:slug", Page::Detail(ContentKind::Universe)),
            ("/search", Page::Search),
            ("/about", Page::About),
            ("/contact", Page::Contact),
            ("/newsletter", Page::Newsletter),
            ("/legal-notice", Page::LegalNotice),
            ("/privacy-policy", Page::PrivacyPolicy),
            ("/terms", Page::Terms),
            ("/cookies", Page::Cookies),
        ];
        let legacy = [
            ("/blog", Page::Listing(ContentKind::Article)),
            ("/blog/:slug", Page::Detail(ContentKind::Article)),
            ("/stories", Page::Listing(ContentKind::Portrait)),
            ("/stories/:slug", Page::Detail(ContentKind::Portrait)),
            ("/categories", Page::Listing(ContentKind::Universe)),
            ("/categories/:slug", Page::Detail(ContentKind::Universe)),
            ("/legal", Page::LegalNotice),
            ("/privacy", Page::PrivacyPolicy),
        ];

        let routes = canonical
            .into_iter()
            .map(|(pattern, page)| Route {
                pattern,
                page,
                legacy: false,
            })
            .chain(legacy.into_iter().map(|(pattern, page)| Route {
                pattern,
                page,
                legacy: true,
            }))
            .collect();
        Self { routes }
    }
}

impl RouteTable {
    /// Resolve a request path; query strings, fragments and trailing slashes
    /// are ignored.
    pub fn resolve(&self, path: &str) -> Option<RouteMatch> {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        self.routes.iter().find_map(|route| {
            let slug = match_pattern(route.pattern, &segments)?;
            Some(RouteMatch {
                page: route.page,
                slug,
                legacy: route.legacy,
            })
        })
    }

    /// Canonical pattern for a page, used when redirecting legacy paths.
    pub fn canonical_pattern(&self, page: Page) -> Option<&'static str> {
        self.routes
            .iter()
            .find(|route| route.page == page && !route.legacy)
            .map(|route| route.pattern)
    }
}

/// `Some(slug)` on match, where `slug` is the captured parameter if any.
fn match_pattern(pattern: &str, segments: &[&str]) -> Option<Option<String>> {
    let parts: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    if parts.len() != segments.len() {
        return None;
    }

    let mut slug = None;
    for (part, segment) in parts.iter().zip(segments) {
        if part.starts_with(':') {
            slug = Some(segment.to_string());
        } else if !part.eq_ignore_ascii_case(segment) {
            return None;
        }
    }
    Some(slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_canonical() {
        let table = RouteTable::default();
        assert_eq!(table.resolve("/").unwrap().page, Page::Home);

        let m = table.resolve("/article/my-story/?ref=home").unwrap();
        assert_eq!(m.page, Page::Detail(ContentKind::Article));
        assert_eq!(m.slug.as_deref(), Some("my-story"));
        assert!(!m.legacy);
    }

    #[test]
    fn test_legacy_aliases_share_pages() {
        let table = RouteTable::default();
        let legacy = table.resolve("/blog/my-story").unwrap();
        let canonical = table.resolve("/article/my-story").unwrap();
        assert_eq!(legacy.page, canonical.page);
        assert_eq!(legacy.slug, canonical.slug);
        assert!(legacy.legacy);

        assert_eq!(
            table.canonical_pattern(legacy.page),
            Some("/article/:slug")
        );
        assert_eq!(table.resolve("/legal").unwrap().page, Page::LegalNotice);
    }

    #[test]
    fn test_unknown_paths() {
        let table = RouteTable::default();
        assert!(table.resolve("/article").is_none());
        assert!(table.resolve("/article/a/b").is_none());
        assert!(table.resolve("/podcasts").is_none());
    }

    #[test]
    fn test_static_routes_are_routable() {
        let table = RouteTable::default();
        for route in crate::models::Config::default().sitemap.static_routes {
            assert!(table.resolve(&route.path).is_some(), "{}", route.path);
        }
    }

    #[test]
    fn test_content_prefixes_are_routable() {
        let table = RouteTable::default();
        for kind in ContentKind::ALL {
            let path = format!("{}some-slug", kind.path_prefix());
            assert_eq!(table.resolve(&path).unwrap().page, Page::Detail(kind));
        }
    }
}
