use std::path::PathBuf;

use clap::Args;
use offerpages::generate::{self, RowPlan};
use offerpages::offer;
use serde::Serialize;

use crate::commands::{CmdResult, SourceArgs, TextOutput};

#[derive(Args, Default, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Include the per-row slug plan in the output
    #[arg(long)]
    pub rows: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateOutput {
    pub csv_path: PathBuf,
    pub rows: usize,
    pub pages: usize,
    pub skipped: usize,
    pub collisions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<Vec<RowPlan>>,
}

pub fn run(
    args: ValidateArgs,
    _global: &crate::commands::GlobalArgs,
) -> CmdResult<ValidateOutput> {
    let config = crate::commands::resolve_config(&args.source.overrides())?;
    let records = offer::load(&config.csv_path)?;
    let plans = generate::plan(&records);

    let skipped = plans.iter().filter(|p| p.slug.is_none()).count();
    let output = ValidateOutput {
        csv_path: config.csv_path,
        rows: plans.len(),
        pages: plans.len() - skipped,
        skipped,
        collisions: generate::collisions(&plans),
        plan: args.rows.then_some(plans),
    };

    Ok((output, 0))
}

impl TextOutput for ValidateOutput {
    fn to_text(&self) -> String {
        let mut lines = vec![format!(
            "OK: {} has all required columns; {} of {} rows would generate pages.",
            self.csv_path.display(),
            self.pages,
            self.rows
        )];

        if !self.collisions.is_empty() {
            lines.push(format!(
                "Shared slugs (last row wins): {}",
                self.collisions.join(", ")
            ));
        }

        if let Some(plan) = &self.plan {
            for row in plan {
                let slug = row.slug.as_deref().unwrap_or("(skipped: no keyword)");
                lines.push(format!("  line {}: {}", row.line, slug));
            }
        }

        lines.join("\n")
    }
}
