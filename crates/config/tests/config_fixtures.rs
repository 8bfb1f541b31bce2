//! Integration tests for config fixtures (JSON + TOML) and file loading.

use ctxlog_config::{
    LogEnv, LogFormat, LogTarget, load_log_config_from_path, parse_log_config_json,
    parse_log_config_toml, to_pretty_json,
};
use ctxlog_ports::Level;
use ctxlog_shared::ErrorCode;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| manifest_dir.to_path_buf())
}

fn fixture_path(relative: &str) -> PathBuf {
    workspace_root()
        .join("crates")
        .join("testkit")
        .join("fixtures")
        .join(relative)
}

fn read_fixture(relative: &str) -> Result<String, Box<dyn Error>> {
    Ok(fs::read_to_string(fixture_path(relative))?)
}

#[test]
fn json_fixture_parses() -> Result<(), Box<dyn Error>> {
    let config = parse_log_config_json(&read_fixture("config/log-config.valid.json")?)?;

    assert_eq!(config.level, Level::Debug);
    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.target, LogTarget::Stdout);
    assert_eq!(config.fields.len(), 2);
    Ok(())
}

#[test]
fn toml_fixture_accepts_the_warning_alias() -> Result<(), Box<dyn Error>> {
    let config = parse_log_config_toml(&read_fixture("config/log-config.valid.toml")?)?;

    assert_eq!(config.level, Level::Warn);
    assert!(!config.redact_secrets);
    assert_eq!(config.fields.get("service").map(String::as_str), Some("billing"));
    Ok(())
}

#[test]
fn invalid_fixtures_report_stable_codes() -> Result<(), Box<dyn Error>> {
    let version = parse_log_config_json(&read_fixture("config/log-config.invalid-version.json")?)
        .err()
        .map(|error| error.code);
    assert_eq!(version, Some(ErrorCode::new("config", "unsupported_version")));

    let unknown = parse_log_config_json(&read_fixture("config/log-config.unknown-key.json")?)
        .err()
        .map(|error| error.code);
    assert_eq!(unknown, Some(ErrorCode::new("config", "invalid_json")));
    Ok(())
}

#[test]
fn path_loading_detects_the_format() -> Result<(), Box<dyn Error>> {
    let env = LogEnv::default();

    let from_json = load_log_config_from_path(
        Some(&fixture_path("config/log-config.valid.json")),
        &env,
    )?;
    let from_toml = load_log_config_from_path(
        Some(&fixture_path("config/log-config.valid.toml")),
        &env,
    )?;

    assert_eq!(from_json.format, LogFormat::Json);
    assert_eq!(from_toml.format, LogFormat::Text);
    Ok(())
}

#[test]
fn pretty_json_round_trips_through_the_parser() -> Result<(), Box<dyn Error>> {
    let config = parse_log_config_json(&read_fixture("config/log-config.valid.json")?)?;

    let reparsed = parse_log_config_json(&to_pretty_json(&config)?)?;

    assert_eq!(reparsed, config);
    Ok(())
}
