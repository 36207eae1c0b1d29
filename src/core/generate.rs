//! One generation run: CSV in, pages and sitemap out.
//!
//! The CSV is fully loaded and its header validated before anything touches
//! the output tree, so a bad header or malformed record leaves the previous
//! output as it was. Rows are then rendered and written one at a time, in
//! file order.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::SiteConfig;
use crate::error::Result;
use crate::local_files::{self, FileSystem};
use crate::offer::{self, OfferRecord};
use crate::page::PageFields;
use crate::sitemap;
use crate::slugify;
use crate::variant::{RenderContext, Variant};

/// What a run will do with one CSV row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowPlan {
    pub line: u64,
    /// `None` when the row has no keyword and is skipped.
    pub slug: Option<String>,
}

/// A page written during the run. When several rows share a slug this
/// describes the file left on disk, attributed to the last row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPage {
    pub slug: String,
    pub url: String,
    pub path: PathBuf,
    pub line: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResult {
    pub variant: Variant,
    pub date: String,
    /// Rows rendered and written, including rows whose slug was reused.
    pub generated: usize,
    pub skipped: usize,
    /// Distinct pages, in the order their slug first appeared.
    pub pages: Vec<GeneratedPage>,
    /// Slugs written more than once; the last row's output won.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub overwritten: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sitemap: Option<PathBuf>,
}

impl GenerateResult {
    /// One-line console summary.
    pub fn summary(&self) -> String {
        if self.sitemap.is_some() {
            format!(
                "OK: genererade {} sidor och uppdaterade sitemap.",
                self.generated
            )
        } else {
            format!("OK: genererade {} sidor.", self.generated)
        }
    }
}

/// Resolve the slug of every row, marking keyword-less rows as skipped.
pub fn plan(records: &[OfferRecord]) -> Vec<RowPlan> {
    records
        .iter()
        .map(|record| RowPlan {
            line: record.line,
            slug: record
                .row
                .has_keyword()
                .then(|| slugify::resolve(&record.row.slug, &record.row.keyword)),
        })
        .collect()
}

/// Slugs that more than one non-skipped row resolves to, in first-seen order.
pub fn collisions(plans: &[RowPlan]) -> Vec<String> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut repeated = Vec::new();
    for slug in plans.iter().filter_map(|p| p.slug.as_deref()) {
        let count = seen.entry(slug).or_insert(0);
        *count += 1;
        if *count == 2 {
            repeated.push(slug.to_string());
        }
    }
    repeated
}

/// Run against the local filesystem.
pub fn run(config: &SiteConfig, date: NaiveDate) -> Result<GenerateResult> {
    run_with(&local_files::local(), config, date)
}

pub fn run_with<F: FileSystem>(
    fs: &F,
    config: &SiteConfig,
    date: NaiveDate,
) -> Result<GenerateResult> {
    crate::log_status!(
        "generate",
        "Reading {} ({} pages)",
        config.csv_path.display(),
        config.variant
    );
    let records = offer::load(&config.csv_path)?;
    write_pages(fs, config, &records, date)
}

/// Render and write every planned row, then the sitemap.
pub fn write_pages<F: FileSystem>(
    fs: &F,
    config: &SiteConfig,
    records: &[OfferRecord],
    date: NaiveDate,
) -> Result<GenerateResult> {
    let variant = config.variant;
    let ctx = RenderContext {
        base_url: &config.base_url,
        site_root: config.site_root(),
        date,
    };

    fs.ensure_dir(&config.out_dir)?;

    let mut pages: Vec<GeneratedPage> = Vec::new();
    let mut index_by_slug: HashMap<String, usize> = HashMap::new();
    let mut overwritten: Vec<String> = Vec::new();
    let mut generated = 0;
    let mut skipped = 0;

    for (record, row_plan) in records.iter().zip(plan(records)) {
        let Some(slug) = row_plan.slug else {
            skipped += 1;
            continue;
        };

        let fields = PageFields::resolve(&record.row, &slug);
        let body = variant.render(&fields, &ctx)?;
        let path = variant.output_path(&config.out_dir, &slug);
        if let Some(parent) = path.parent() {
            fs.ensure_dir(parent)?;
        }
        fs.write(&path, &body)?;
        generated += 1;

        let page = GeneratedPage {
            url: variant.page_url(&slug),
            path,
            line: record.line,
            slug,
        };

        match index_by_slug.get(&page.slug) {
            Some(&idx) => {
                if !overwritten.contains(&page.slug) {
                    overwritten.push(page.slug.clone());
                }
                pages[idx] = page;
            }
            None => {
                index_by_slug.insert(page.slug.clone(), pages.len());
                pages.push(page);
            }
        }
    }

    for line in row_notes(skipped, overwritten.len()) {
        crate::log_status!("generate", "{}", line);
    }

    let sitemap_path = if variant.builds_sitemap() {
        let urls: Vec<String> = pages.iter().map(|p| p.url.clone()).collect();
        let xml = sitemap::build(&config.base_url, &urls, date);
        write_sitemap(fs, &config.sitemap_path, &xml)?;
        crate::log_status!(
            "sitemap",
            "Wrote {} entries to {}",
            urls.len() + 1,
            config.sitemap_path.display()
        );
        Some(config.sitemap_path.clone())
    } else {
        None
    };

    Ok(GenerateResult {
        variant,
        date: date.format("%Y-%m-%d").to_string(),
        generated,
        skipped,
        pages,
        overwritten,
        sitemap: sitemap_path,
    })
}

/// Per-run counts of rows that did not produce a page of their own.
fn row_notes(skipped: usize, overwritten: usize) -> Vec<String> {
    let mut notes = Vec::new();
    if skipped > 0 {
        notes.push(format!("Skipped {} rows without keyword", skipped));
    }
    if overwritten > 0 {
        notes.push(format!("{} slugs overwritten", overwritten));
    }
    notes
}

fn write_sitemap<F: FileSystem>(fs: &F, path: &Path, xml: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs.ensure_dir(parent)?;
    }
    fs.write(path, xml)
}
