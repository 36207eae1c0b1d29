use clap::Args;
use offerpages::slugify;
use serde::Serialize;

use crate::commands::{CmdResult, TextOutput};

#[derive(Args, Debug)]
pub struct SlugifyArgs {
    /// Keywords to turn into slugs
    #[arg(required = true)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SlugifyItem {
    pub keyword: String,
    pub slug: String,
}

#[derive(Debug, Serialize)]
pub struct SlugifyOutput {
    pub slugs: Vec<SlugifyItem>,
}

pub fn run(
    args: SlugifyArgs,
    _global: &crate::commands::GlobalArgs,
) -> CmdResult<SlugifyOutput> {
    let slugs = args
        .keywords
        .into_iter()
        .map(|keyword| SlugifyItem {
            slug: slugify::resolve("", &keyword),
            keyword,
        })
        .collect();

    Ok((SlugifyOutput { slugs }, 0))
}

impl TextOutput for SlugifyOutput {
    fn to_text(&self) -> String {
        self.slugs
            .iter()
            .map(|item| item.slug.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
