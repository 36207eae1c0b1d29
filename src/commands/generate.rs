use chrono::NaiveDate;
use clap::Args;
use offerpages::generate::{self, GenerateResult};
use offerpages::variant::Variant;

use crate::commands::{CmdResult, SourceArgs, TextOutput};

#[derive(Args, Default, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Page variant: landing, landing-cta, or blog
    #[arg(long)]
    pub variant: Option<Variant>,

    /// Output directory (default: site/content, or site/blog for blog)
    #[arg(long, value_name = "DIR")]
    pub out: Option<String>,

    /// Sitemap file written by HTML variants (default: sitemap.xml)
    #[arg(long, value_name = "PATH")]
    pub sitemap: Option<String>,

    /// Date stamped into the sitemap and front-matter (default: today)
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date: Option<NaiveDate>,
}

pub fn run(
    args: GenerateArgs,
    _global: &crate::commands::GlobalArgs,
) -> CmdResult<GenerateResult> {
    let mut overrides = args.source.overrides();
    overrides.variant = args.variant;
    overrides.out_dir = args.out;
    overrides.sitemap_path = args.sitemap;

    let config = crate::commands::resolve_config(&overrides)?;
    let date = args
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let result = generate::run(&config, date)?;
    Ok((result, 0))
}

impl TextOutput for GenerateResult {
    fn to_text(&self) -> String {
        self.summary()
    }
}
