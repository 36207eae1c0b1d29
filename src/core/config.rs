//! Run configuration.
//!
//! Resolution order, lowest to highest precedence: built-in defaults,
//! `offerpages.json`, the `BASE_URL` environment variable, CLI overrides.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::variant::Variant;

pub const CONFIG_FILE: &str = "offerpages.json";
pub const BASE_URL_ENV: &str = "BASE_URL";

pub const DEFAULT_BASE_URL: &str = "https://morandasings.github.io/Klaraval-site";
pub const DEFAULT_CSV_PATH: &str = "data/offers.csv";
pub const DEFAULT_OUT_DIR: &str = "site/content";
pub const DEFAULT_BLOG_DIR: &str = "site/blog";
pub const DEFAULT_SITEMAP_PATH: &str = "sitemap.xml";

/// Contents of `offerpages.json`. Every key is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigFile {
    pub csv_path: Option<String>,
    pub out_dir: Option<String>,
    pub blog_dir: Option<String>,
    pub sitemap_path: Option<String>,
    pub base_url: Option<String>,
    pub variant: Option<Variant>,
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config_path: Option<String>,
    pub csv_path: Option<String>,
    pub out_dir: Option<String>,
    pub sitemap_path: Option<String>,
    pub base_url: Option<String>,
    pub variant: Option<Variant>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub variant: Variant,
    pub csv_path: PathBuf,
    pub out_dir: PathBuf,
    pub sitemap_path: PathBuf,
    /// Base URL without a trailing slash.
    pub base_url: String,
}

impl SiteConfig {
    /// Path component of the base URL, e.g. `/Klaraval-site`, or empty when
    /// the site lives at the domain root.
    pub fn site_root(&self) -> &str {
        site_root(&self.base_url)
    }
}

/// Load the config file: an explicit path must exist, the default
/// `offerpages.json` in the working directory is optional.
pub fn load_file(explicit: Option<&str>) -> Result<ConfigFile> {
    let path = match explicit {
        Some(p) => {
            let path = expand_path(p);
            if !path.is_file() {
                return Err(Error::config_not_found(path.display().to_string()));
            }
            path
        }
        None => {
            let path = PathBuf::from(CONFIG_FILE);
            if !path.is_file() {
                return Ok(ConfigFile::default());
            }
            path
        }
    };

    parse_file(&path)
}

fn parse_file(path: &Path) -> Result<ConfigFile> {
    let display = path.display().to_string();
    let raw = fs::read_to_string(path)
        .map_err(|e| Error::internal_io(e.to_string(), Some(format!("read {}", display))))?;
    serde_json::from_str(&raw).map_err(|e| Error::config_invalid_json(display, e))
}

/// Merge file, environment, and CLI values over the defaults.
pub fn resolve(
    file: ConfigFile,
    env_base_url: Option<String>,
    overrides: &Overrides,
) -> Result<SiteConfig> {
    let variant = overrides
        .variant
        .or(file.variant)
        .unwrap_or_default();

    let csv_path = pick(&overrides.csv_path, &file.csv_path, DEFAULT_CSV_PATH);

    let out_dir = if variant.is_html() {
        pick(&overrides.out_dir, &file.out_dir, DEFAULT_OUT_DIR)
    } else {
        pick(&overrides.out_dir, &file.blog_dir, DEFAULT_BLOG_DIR)
    };

    let sitemap_path = pick(&overrides.sitemap_path, &file.sitemap_path, DEFAULT_SITEMAP_PATH);

    let env_base_url = env_base_url.filter(|v| !v.trim().is_empty());
    let base_url = overrides
        .base_url
        .clone()
        .or(env_base_url)
        .or(file.base_url)
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    Ok(SiteConfig {
        variant,
        csv_path: expand_path(&csv_path),
        out_dir: expand_path(&out_dir),
        sitemap_path: expand_path(&sitemap_path),
        base_url: normalize_base_url(&base_url)?,
    })
}

fn pick(cli: &Option<String>, file: &Option<String>, default: &str) -> String {
    cli.clone()
        .or_else(|| file.clone())
        .unwrap_or_else(|| default.to_string())
}

fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).into_owned())
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(Error::config_invalid_value(
            "baseUrl",
            Some(raw.to_string()),
            "base URL must start with http:// or https://",
        ));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

fn site_root(base_url: &str) -> &str {
    let after_scheme = base_url
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(base_url);
    match after_scheme.find('/') {
        Some(idx) => after_scheme[idx..].trim_end_matches('/'),
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use tempfile::TempDir;

    #[test]
    fn defaults_apply_without_file_env_or_flags() {
        let config = resolve(ConfigFile::default(), None, &Overrides::default()).unwrap();
        assert_eq!(config.variant, Variant::Landing);
        assert_eq!(config.csv_path, PathBuf::from("data/offers.csv"));
        assert_eq!(config.out_dir, PathBuf::from("site/content"));
        assert_eq!(config.sitemap_path, PathBuf::from("sitemap.xml"));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.site_root(), "/Klaraval-site");
    }

    #[test]
    fn blog_variant_uses_blog_dir() {
        let overrides = Overrides {
            variant: Some(Variant::Blog),
            ..Overrides::default()
        };
        let config = resolve(ConfigFile::default(), None, &overrides).unwrap();
        assert_eq!(config.out_dir, PathBuf::from("site/blog"));
    }

    #[test]
    fn env_overrides_file_and_cli_overrides_env() {
        let file = ConfigFile {
            base_url: Some("https://file.example".to_string()),
            ..ConfigFile::default()
        };
        let env = Some("https://env.example/".to_string());

        let config = resolve(file.clone(), env.clone(), &Overrides::default()).unwrap();
        assert_eq!(config.base_url, "https://env.example");

        let overrides = Overrides {
            base_url: Some("https://cli.example/sub/".to_string()),
            ..Overrides::default()
        };
        let config = resolve(file, env, &overrides).unwrap();
        assert_eq!(config.base_url, "https://cli.example/sub");
        assert_eq!(config.site_root(), "/sub");
    }

    #[test]
    fn blank_env_base_url_is_ignored() {
        let config = resolve(ConfigFile::default(), Some("  ".to_string()), &Overrides::default())
            .unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn base_url_without_scheme_is_rejected() {
        let overrides = Overrides {
            base_url: Some("example.com".to_string()),
            ..Overrides::default()
        };
        let err = resolve(ConfigFile::default(), None, &overrides).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalidValue);
    }

    #[test]
    fn site_root_is_empty_for_domain_root() {
        assert_eq!(site_root("https://klaraval.se"), "");
        assert_eq!(site_root("https://klaraval.se/a/b"), "/a/b");
    }

    #[test]
    fn load_file_reads_camel_case_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("offerpages.json");
        fs::write(
            &path,
            r#"{"csvPath": "in.csv", "variant": "landing-cta", "blogDir": "posts"}"#,
        )
        .unwrap();

        let file = load_file(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(file.csv_path.as_deref(), Some("in.csv"));
        assert_eq!(file.variant, Some(Variant::LandingCta));
        assert_eq!(file.blog_dir.as_deref(), Some("posts"));
    }

    #[test]
    fn load_file_explicit_missing_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.json");
        let err = load_file(Some(path.to_str().unwrap())).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigNotFound);
    }

    #[test]
    fn load_file_invalid_json_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("offerpages.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_file(Some(path.to_str().unwrap())).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalidJson);
    }
}
