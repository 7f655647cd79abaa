//! XML rendering for the sitemap protocol with image and video extensions.

use std::fmt::Write;

use crate::error::{AppError, Result};
use crate::models::{SitemapEntry, SitemapImage, SitemapVideo, VideoLocation};
use crate::utils::escape_xml;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
const IMAGE_NS: &str = "http://www.google.com/schemas/sitemap-image/1.1";
const VIDEO_NS: &str = "http://www.google.com/schemas/sitemap-video/1.1";

/// Render entries as a complete `<urlset>` document.
pub fn render_sitemap(entries: &[SitemapEntry]) -> Result<String> {
    let mut xml = String::with_capacity(256 + entries.len() * 256);
    write_document(&mut xml, entries).map_err(AppError::assembly)?;
    Ok(xml)
}

fn write_document(xml: &mut String, entries: &[SitemapEntry]) -> std::fmt::Result {
    writeln!(xml, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        xml,
        r#"<urlset xmlns="{SITEMAP_NS}" xmlns:image="{IMAGE_NS}" xmlns:video="{VIDEO_NS}">"#
    )?;
    for entry in entries {
        write_entry(xml, entry)?;
    }
    writeln!(xml, "</urlset>")
}

fn write_entry(xml: &mut String, entry: &SitemapEntry) -> std::fmt::Result {
    writeln!(xml, "  <url>")?;
    writeln!(xml, "    <loc>{}</loc>", escape_xml(&entry.loc))?;
    writeln!(xml, "    <lastmod>{}</lastmod>", entry.lastmod.format("%Y-%m-%d"))?;
    writeln!(xml, "    <changefreq>{}</changefreq>", entry.changefreq)?;
    writeln!(xml, "    <priority>{:.1}</priority>", entry.priority)?;
    if let Some(image) = &entry.image {
        write_image(xml, image)?;
    }
    if let Some(video) = &entry.video {
        write_video(xml, video)?;
    }
    writeln!(xml, "  </url>")
}

fn write_image(xml: &mut String, image: &SitemapImage) -> std::fmt::Result {
    writeln!(xml, "    <image:image>")?;
    writeln!(xml, "      <image:loc>{}</image:loc>", escape_xml(&image.loc))?;
    writeln!(xml, "      <image:title>{}</image:title>", escape_xml(&image.title))?;
    writeln!(xml, "    </image:image>")
}

fn write_video(xml: &mut String, video: &SitemapVideo) -> std::fmt::Result {
    writeln!(xml, "    <video:video>")?;
    writeln!(
        xml,
        "      <video:thumbnail_loc>{}</video:thumbnail_loc>",
        escape_xml(&video.thumbnail_loc)
    )?;
    writeln!(xml, "      <video:title>{}</video:title>", escape_xml(&video.title))?;
    writeln!(
        xml,
        "      <video:description>{}</video:description>",
        escape_xml(&video.description)
    )?;
    match &video.location {
        VideoLocation::Content(url) => writeln!(
            xml,
            "      <video:content_loc>{}</video:content_loc>",
            escape_xml(url)
        )?,
        VideoLocation::Player(url) => writeln!(
            xml,
            "      <video:player_loc>{}</video:player_loc>",
            escape_xml(url)
        )?,
    }
    writeln!(xml, "    </video:video>")
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::ChangeFreq;

    fn entry(loc: &str) -> SitemapEntry {
        SitemapEntry {
            loc: loc.to_string(),
            lastmod: NaiveDate::from_ymd_opt(2026, 10, 17).unwrap(),
            changefreq: ChangeFreq::Weekly,
            priority: 0.7,
            image: None,
            video: None,
        }
    }

    #[test]
    fn test_empty_document() {
        let xml = render_sitemap(&[]).unwrap();
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(r#"xmlns:image="http://www.google.com/schemas/sitemap-image/1.1""#));
        assert!(xml.contains(r#"xmlns:video="http://www.google.com/schemas/sitemap-video/1.1""#));
        assert!(xml.trim_end().ends_with("</urlset>"));
        assert_eq!(xml.matches("<url>").count(), 0);
    }

    #[test]
    fn test_entry_fields() {
        let xml = render_sitemap(&[entry("https://example.com/article/a")]).unwrap();
        assert!(xml.contains("<loc>https://example.com/article/a</loc>"));
        assert!(xml.contains("<lastmod>2026-10-17</lastmod>"));
        assert!(xml.contains("<changefreq>weekly</changefreq>"));
        assert!(xml.contains("<priority>0.7</priority>"));
    }

    #[test]
    fn test_image_title_is_escaped() {
        let mut e = entry("https://example.com/?a=1&b=2");
        e.image = Some(SitemapImage {
            loc: "https://cdn.example.com/i.jpg".to_string(),
            title: r#"Rock & Roll <Live> "Paris" l'été"#.to_string(),
        });
        let xml = render_sitemap(&[e]).unwrap();

        assert!(xml.contains("<loc>https://example.com/?a=1&amp;b=2</loc>"));
        assert!(xml.contains(
            "<image:title>Rock &amp; Roll &lt;Live&gt; &quot;Paris&quot; l&apos;été</image:title>"
        ));
        let body = xml.split("<image:title>").nth(1).unwrap();
        let title = body.split("</image:title>").next().unwrap();
        assert!(!title.contains('<') && !title.contains('"') && !title.contains('\''));
    }

    #[test]
    fn test_video_player_location() {
        let mut e = entry("https://example.com/article/v");
        e.video = Some(SitemapVideo {
            thumbnail_loc: "https://img.youtube.com/vi/dQw4w9WgXcQ/maxresdefault.jpg".to_string(),
            title: "Clip".to_string(),
            description: "Clip".to_string(),
            location: VideoLocation::Player("https://www.youtube.com/embed/dQw4w9WgXcQ".to_string()),
        });
        let xml = render_sitemap(&[e]).unwrap();
        assert!(xml.contains("<video:player_loc>https://www.youtube.com/embed/dQw4w9WgXcQ</video:player_loc>"));
        assert!(!xml.contains("<video:content_loc>"));
    }
}
