use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use offerpages::offer::REQUIRED_COLUMNS;
use tempfile::TempDir;

fn offerpages(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_offerpages"))
        .args(args)
        .current_dir(dir)
        .env_remove("BASE_URL")
        .output()
        .unwrap()
}

fn write_default_csv(dir: &Path, body: &str) {
    fs::create_dir_all(dir.join("data")).unwrap();
    fs::write(
        dir.join("data/offers.csv"),
        format!("{}\n{}", REQUIRED_COLUMNS.join(","), body),
    )
    .unwrap();
}

#[test]
fn no_arguments_generates_with_defaults() {
    let dir = TempDir::new().unwrap();
    write_default_csv(dir.path(), "a,,Första sidan\n,,\n");

    let out = offerpages(dir.path(), &[]);

    assert!(out.status.success());
    assert_eq!(
        String::from_utf8_lossy(&out.stdout).trim(),
        "OK: genererade 1 sidor och uppdaterade sitemap."
    );
    assert!(dir.path().join("site/content/a/index.html").is_file());
    let xml = fs::read_to_string(dir.path().join("sitemap.xml")).unwrap();
    assert!(xml.contains("<loc>https://morandasings.github.io/Klaraval-site/content/a/</loc>"));
}

#[test]
fn base_url_env_is_used_for_sitemap() {
    let dir = TempDir::new().unwrap();
    write_default_csv(dir.path(), ",,Hej\n");

    let out = Command::new(env!("CARGO_BIN_EXE_offerpages"))
        .args(["generate", "--date", "2025-02-03"])
        .current_dir(dir.path())
        .env("BASE_URL", "https://klaraval.se/")
        .output()
        .unwrap();

    assert!(out.status.success());
    let xml = fs::read_to_string(dir.path().join("sitemap.xml")).unwrap();
    assert!(xml.contains("<loc>https://klaraval.se/</loc><lastmod>2025-02-03</lastmod>"));
    assert!(xml.contains("<loc>https://klaraval.se/content/hej/</loc>"));
}

#[test]
fn missing_csv_exits_non_zero() {
    let dir = TempDir::new().unwrap();

    let out = offerpages(dir.path(), &["generate"]);

    assert_eq!(out.status.code(), Some(4));
    assert!(String::from_utf8_lossy(&out.stderr).contains("ERROR: Hittar inte"));
    assert!(!dir.path().join("site").exists());
}

#[test]
fn missing_column_exits_non_zero_without_output() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("data")).unwrap();
    fs::write(dir.path().join("data/offers.csv"), "slug,keyword\nx,y\n").unwrap();

    let out = offerpages(dir.path(), &["generate"]);

    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Saknade kolumner: type, intent"));
    assert!(!dir.path().join("site").exists());
    assert!(!dir.path().join("sitemap.xml").exists());
}

#[test]
fn json_flag_prints_envelope() {
    let dir = TempDir::new().unwrap();
    write_default_csv(dir.path(), ",,Hej\n");

    let out = offerpages(dir.path(), &["generate", "--json"]);

    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["success"], true);
    assert_eq!(value["data"]["generated"], 1);
    assert_eq!(value["data"]["pages"][0]["slug"], "hej");
}

#[test]
fn validate_writes_nothing() {
    let dir = TempDir::new().unwrap();
    write_default_csv(dir.path(), "dup,,a\ndup,,b\n,,\n");

    let out = offerpages(dir.path(), &["validate"]);

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("2 of 3 rows would generate pages"));
    assert!(stdout.contains("Shared slugs (last row wins): dup"));
    assert!(!dir.path().join("site").exists());
}

#[test]
fn slugify_prints_one_slug_per_keyword() {
    let dir = TempDir::new().unwrap();

    let out = offerpages(dir.path(), &["slugify", "Bästa Café-val!", "!!!"]);

    assert!(out.status.success());
    assert_eq!(
        String::from_utf8_lossy(&out.stdout),
        "basta-cafe-val\nsaknar-slug\n"
    );
}
