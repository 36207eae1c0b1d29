//! Page variants: the three rendering strategies over [`PageFields`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::page::PageFields;
use crate::template::{self, escape_html, TemplateVars};

const LANDING_TEMPLATE: &str = include_str!("templates/landing.html");
const LANDING_CTA_TEMPLATE: &str = include_str!("templates/landing_cta.html");
const BLOG_TEMPLATE: &str = include_str!("templates/blog.md");

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Basic HTML landing page.
    #[default]
    Landing,
    /// Landing page with a call-to-action block and affiliate disclaimer.
    LandingCta,
    /// Markdown blog post with front-matter and a comparison table.
    Blog,
}

/// Site-wide values every render needs besides the row itself.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub base_url: &'a str,
    pub site_root: &'a str,
    pub date: NaiveDate,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Landing, Variant::LandingCta, Variant::Blog];

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Landing => "landing",
            Variant::LandingCta => "landing-cta",
            Variant::Blog => "blog",
        }
    }

    pub fn is_html(&self) -> bool {
        !matches!(self, Variant::Blog)
    }

    /// Only HTML variants are published under the site and listed in the sitemap.
    pub fn builds_sitemap(&self) -> bool {
        self.is_html()
    }

    /// URL of a page relative to the site root (HTML) or to the output directory (Markdown).
    pub fn page_url(&self, slug: &str) -> String {
        if self.is_html() {
            format!("/content/{}/", slug)
        } else {
            format!("{}.md", slug)
        }
    }

    /// File a page is written to. HTML pages get one folder per slug.
    pub fn output_path(&self, out_dir: &Path, slug: &str) -> PathBuf {
        if self.is_html() {
            out_dir.join(slug).join("index.html")
        } else {
            out_dir.join(format!("{}.md", slug))
        }
    }

    fn template(&self) -> &'static str {
        match self {
            Variant::Landing => LANDING_TEMPLATE,
            Variant::LandingCta => LANDING_CTA_TEMPLATE,
            Variant::Blog => BLOG_TEMPLATE,
        }
    }

    pub fn render(&self, fields: &PageFields, ctx: &RenderContext<'_>) -> Result<String> {
        let body = self.template();
        let canonical = format!("{}/content/{}/", ctx.base_url, fields.slug);

        let raw: Vec<(&str, &str)> = vec![
            (TemplateVars::META_TITLE, fields.meta_title.as_str()),
            (TemplateVars::META_DESC, fields.meta_desc.as_str()),
            (TemplateVars::CANONICAL, canonical.as_str()),
            (TemplateVars::SITE_ROOT, ctx.site_root),
            (TemplateVars::H1, fields.h1.as_str()),
            (TemplateVars::PICK_1, fields.picks[0].name.as_str()),
            (TemplateVars::PICK_2, fields.picks[1].name.as_str()),
            (TemplateVars::PICK_3, fields.picks[2].name.as_str()),
            (TemplateVars::USP_1, fields.picks[0].usp.as_str()),
            (TemplateVars::USP_2, fields.picks[1].usp.as_str()),
            (TemplateVars::USP_3, fields.picks[2].usp.as_str()),
            (TemplateVars::AFF_1, fields.picks[0].link.as_str()),
            (TemplateVars::AFF_2, fields.picks[1].link.as_str()),
            (TemplateVars::AFF_3, fields.picks[2].link.as_str()),
            (TemplateVars::CTA_TEXT, fields.cta_text.as_str()),
            (TemplateVars::PERSONA, fields.persona.as_str()),
        ];

        let escape: fn(&str) -> String = if self.is_html() {
            escape_html
        } else {
            escape_markdown
        };
        let mut owned: Vec<(&str, String)> = raw
            .into_iter()
            .map(|(key, value)| (key, escape(value)))
            .collect();

        if template::is_present(body, TemplateVars::FRONT_MATTER) {
            owned.push((TemplateVars::FRONT_MATTER, front_matter(fields, ctx.date)?));
        }

        let vars: Vec<(&str, &str)> = owned.iter().map(|(k, v)| (*k, v.as_str())).collect();
        Ok(template::render(body, &vars))
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Variant::ALL
            .into_iter()
            .find(|v| v.as_str() == s.trim())
            .ok_or_else(|| {
                Error::validation_invalid_argument(
                    "variant",
                    "expected one of: landing, landing-cta, blog",
                    Some(s.to_string()),
                )
            })
    }
}

/// Pipes would split a table cell; everything else passes through.
fn escape_markdown(value: &str) -> String {
    value.replace('|', "\\|")
}

#[derive(Serialize)]
struct FrontMatter<'a> {
    title: &'a str,
    description: &'a str,
    slug: &'a str,
    date: String,
    #[serde(skip_serializing_if = "str::is_empty")]
    keyword: &'a str,
    #[serde(rename = "type", skip_serializing_if = "str::is_empty")]
    kind: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    intent: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    status: &'a str,
}

fn front_matter(fields: &PageFields, date: NaiveDate) -> Result<String> {
    let matter = FrontMatter {
        title: &fields.meta_title,
        description: &fields.meta_desc,
        slug: &fields.slug,
        date: date.format("%Y-%m-%d").to_string(),
        keyword: &fields.keyword,
        kind: &fields.kind,
        intent: &fields.intent,
        status: &fields.status,
    };
    serde_yml::to_string(&matter).map_err(|e| {
        Error::internal_unexpected(format!("serialize front matter for {}: {}", fields.slug, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offer::OfferRow;

    fn ctx() -> RenderContext<'static> {
        RenderContext {
            base_url: "https://example.github.io/Klaraval-site",
            site_root: "/Klaraval-site",
            date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
        }
    }

    fn fields(row: OfferRow) -> PageFields {
        PageFields::resolve(&row, "basta-elbolag")
    }

    #[test]
    fn parse_and_display_round_trip_names() {
        for v in Variant::ALL {
            assert_eq!(v.as_str().parse::<Variant>().unwrap(), v);
        }
        assert!("pdf".parse::<Variant>().is_err());
    }

    #[test]
    fn html_paths_use_slug_folders() {
        let out = Path::new("site/content");
        assert_eq!(
            Variant::Landing.output_path(out, "a"),
            PathBuf::from("site/content/a/index.html")
        );
        assert_eq!(Variant::LandingCta.page_url("a"), "/content/a/");
        assert_eq!(
            Variant::Blog.output_path(Path::new("posts"), "a"),
            PathBuf::from("posts/a.md")
        );
        assert_eq!(Variant::Blog.page_url("a"), "a.md");
    }

    #[test]
    fn landing_renders_canonical_and_defaults() {
        let html = Variant::Landing.render(&fields(OfferRow::default()), &ctx()).unwrap();
        assert!(html.contains(
            r#"<link rel="canonical" href="https://example.github.io/Klaraval-site/content/basta-elbolag/">"#
        ));
        assert!(html.contains("<title>basta-elbolag</title>"));
        assert!(html.contains(r##"<a href="#" rel="nofollow">Val 2 →</a>"##));
        assert!(html.contains("<p>Bra för tillväxt.</p>"));
        assert!(html.contains(r#"href="/Klaraval-site/styles.css""#));
        assert!(!html.contains("{{"));
        assert!(!html.contains("class=\"cta\""));
    }

    #[test]
    fn landing_escapes_row_values() {
        let row = OfferRow {
            h1: "Lån & krediter <2025>".to_string(),
            aff_link_1: "https://x.se/?a=1&b=2".to_string(),
            ..OfferRow::default()
        };
        let html = Variant::Landing.render(&fields(row), &ctx()).unwrap();
        assert!(html.contains("<h1>Lån &amp; krediter &lt;2025&gt;</h1>"));
        assert!(html.contains(r#"href="https://x.se/?a=1&amp;b=2""#));
    }

    #[test]
    fn markup_in_cells_is_rendered_as_text() {
        let row = OfferRow {
            usp_1: "<strong>Billigast</strong> i test".to_string(),
            meta_desc: "Jämför <em>nu</em>".to_string(),
            ..OfferRow::default()
        };
        for variant in [Variant::Landing, Variant::LandingCta] {
            let html = variant.render(&fields(row.clone()), &ctx()).unwrap();
            assert!(html.contains("<p>&lt;strong&gt;Billigast&lt;/strong&gt; i test</p>"));
            assert!(!html.contains("<strong>"));
            assert!(html.contains("Jämför &lt;em&gt;nu&lt;/em&gt;"));
        }
    }

    #[test]
    fn landing_cta_adds_cta_block_and_disclaimer() {
        let row = OfferRow {
            persona: "småföretagare".to_string(),
            aff_link_1: "https://aff.example/1".to_string(),
            ..OfferRow::default()
        };
        let html = Variant::LandingCta.render(&fields(row), &ctx()).unwrap();
        assert!(html.contains("<h2>Se aktuella erbjudanden</h2>"));
        assert!(html.contains("Listan passar småföretagare."));
        assert!(html.contains(r#"class="button" href="https://aff.example/1""#));
        assert!(html.contains(r#"<p class="disclaimer">"#));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn blog_has_front_matter_and_placeholder_table() {
        let row = OfferRow {
            keyword: "bästa elbolag".to_string(),
            title: "Bästa elbolaget".to_string(),
            pick_1: "Tibber".to_string(),
            aff_link_1: "https://aff.example/1".to_string(),
            ..OfferRow::default()
        };
        let md = Variant::Blog.render(&fields(row), &ctx()).unwrap();
        assert!(md.starts_with("---\n"));
        assert!(md.contains("title: Bästa elbolaget"));
        assert!(md.contains("slug: basta-elbolag"));
        assert!(md.contains("2025-03-14"));
        assert!(!md.contains("status:"));
        assert!(md.contains("| [Tibber](https://aff.example/1) | … | … | … |"));
        assert!(md.contains("| [Val 2](#) | … | … | … |"));
        assert!(md.contains("# Bästa elbolaget\n"));
        assert!(!md.contains("{{"));
    }

    #[test]
    fn blog_escapes_table_pipes() {
        let row = OfferRow {
            pick_3: "A | B".to_string(),
            ..OfferRow::default()
        };
        let md = Variant::Blog.render(&fields(row), &ctx()).unwrap();
        assert!(md.contains("| [A \\| B](#) | … | … | … |"));
    }
}
