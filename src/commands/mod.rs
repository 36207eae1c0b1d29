use clap::Args;
use offerpages::config::{self, Overrides, SiteConfig};

pub type CmdResult<T> = offerpages::Result<(T, i32)>;

pub(crate) struct GlobalArgs {
    pub json: bool,
}

/// Human-readable rendering of a command result, used outside `--json` mode.
pub trait TextOutput {
    fn to_text(&self) -> String;
}

/// Where the rows come from and which site they belong to.
#[derive(Args, Default, Debug, Clone)]
pub struct SourceArgs {
    /// Config file (default: ./offerpages.json when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Offers CSV (default: data/offers.csv)
    #[arg(long, value_name = "PATH")]
    pub csv: Option<String>,

    /// Base URL for canonical links and the sitemap (overrides BASE_URL)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,
}

impl SourceArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            config_path: self.config.clone(),
            csv_path: self.csv.clone(),
            base_url: self.base_url.clone(),
            ..Overrides::default()
        }
    }
}

/// Resolve the run configuration from file, environment, and flags.
pub fn resolve_config(overrides: &Overrides) -> offerpages::Result<SiteConfig> {
    let file = config::load_file(overrides.config_path.as_deref())?;
    let env_base_url = std::env::var(config::BASE_URL_ENV).ok();
    config::resolve(file, env_base_url, overrides)
}

pub mod generate;
pub mod slugify;
pub mod validate;

/// Dispatch a command to its handler and render the result.
macro_rules! dispatch {
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result($module::run($args, $global))
    };
}

pub(crate) fn run(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (offerpages::Result<crate::output::Rendered>, i32) {
    match command {
        crate::Commands::Generate(args) => dispatch!(args, global, generate),
        crate::Commands::Validate(args) => dispatch!(args, global, validate),
        crate::Commands::Slugify(args) => dispatch!(args, global, slugify),
    }
}
