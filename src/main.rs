use clap::{Parser, Subcommand};

use commands::GlobalArgs;

mod commands;
mod output;

use commands::{generate, slugify, validate};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "offerpages")]
#[command(version = VERSION)]
#[command(about = "Generate landing pages and a sitemap from an offers CSV")]
struct Cli {
    /// Print a JSON envelope instead of a one-line summary
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one page per CSV row, plus the sitemap for HTML variants (default)
    Generate(generate::GenerateArgs),
    /// Check the CSV header and preview slugs without writing anything
    Validate(validate::ValidateArgs),
    /// Print the slug each keyword resolves to
    Slugify(slugify::SlugifyArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let global = GlobalArgs { json: cli.json };

    let command = cli
        .command
        .unwrap_or_else(|| Commands::Generate(generate::GenerateArgs::default()));

    let (result, exit_code) = commands::run(command, &global);

    let printed = if global.json {
        output::print_json_result(result)
    } else {
        output::print_text_result(result)
    };

    if let Err(err) = printed {
        eprintln!("{}", output::error_text(&err));
        return std::process::ExitCode::from(1);
    }

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
