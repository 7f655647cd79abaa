// src/utils/url.rs

//! URL manipulation utilities.

use std::sync::LazyLock;

use regex::Regex;

static YOUTUBE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:youtube(?:-nocookie)?\.com/(?:watch\?(?:[^#]*&)?v=|embed/|shorts/|live/|v/)|youtu\.be/)([A-Za-z0-9_-]{11})",
    )
    .expect("YouTube pattern is valid")
});

/// Join a site origin and an absolute path without doubling slashes.
///
/// # Examples
/// ```
/// use mediadesk::utils::url::site_url;
///
/// assert_eq!(
///     site_url("https://example.com/", "/article/hello"),
///     "https://example.com/article/hello"
/// );
/// ```
pub fn site_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.is_empty() || path == "/" {
        return format!("{base}/");
    }
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

/// Extract the 11-character video ID from a YouTube URL.
///
/// # Examples
/// ```
/// use mediadesk::utils::url::youtube_id;
///
/// assert_eq!(
///     youtube_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
///     Some("dQw4w9WgXcQ".to_string())
/// );
/// assert_eq!(youtube_id("https://vimeo.com/123"), None);
/// ```
pub fn youtube_id(url: &str) -> Option<String> {
    YOUTUBE_ID
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Thumbnail URL YouTube serves for a video ID.
pub fn youtube_thumbnail(id: &str) -> String {
    format!("https://img.youtube.com/vi/{id}/maxresdefault.jpg")
}

/// Embeddable player URL for a video ID.
pub fn youtube_embed(id: &str) -> String {
    format!("https://www.youtube.com/embed/{id}")
}
