//! XML sitemap for generated HTML pages.

use chrono::NaiveDate;

use crate::template::escape_xml;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Render a sitemap: the site root first, then each page URL in order.
///
/// `page_urls` are site-relative (`/content/{slug}/`). Every entry carries
/// the same `lastmod`, the date of the run.
pub fn build(base_url: &str, page_urls: &[String], date: NaiveDate) -> String {
    let lastmod = date.format("%Y-%m-%d").to_string();
    let mut lines = Vec::with_capacity(page_urls.len() + 3);

    lines.push(r#"<?xml version="1.0" encoding="UTF-8"?>"#.to_string());
    lines.push(format!(r#"<urlset xmlns="{}">"#, SITEMAP_NS));
    lines.push(url_entry(&format!("{}/", base_url), &lastmod));
    for url in page_urls {
        lines.push(url_entry(&format!("{}{}", base_url, url), &lastmod));
    }
    lines.push("</urlset>".to_string());

    let mut xml = lines.join("\n");
    xml.push('\n');
    xml
}

fn url_entry(loc: &str, lastmod: &str) -> String {
    format!(
        "  <url><loc>{}</loc><lastmod>{}</lastmod></url>",
        escape_xml(loc),
        lastmod
    )
}
