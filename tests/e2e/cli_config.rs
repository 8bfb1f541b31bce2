//! CLI E2E tests for `ctxlog config`.

use serde_json::Value;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| manifest_dir.to_path_buf())
}

fn fixture(relative: &str) -> PathBuf {
    workspace_root()
        .join("crates")
        .join("testkit")
        .join("fixtures")
        .join(relative)
}

fn ctxlog_config(args: &[&str], env: &[(&str, &str)]) -> std::io::Result<Output> {
    let mut command = Command::new(env!("CARGO_BIN_EXE_ctxlog"));
    for var in [
        "CTXLOG_LEVEL",
        "CTXLOG_FORMAT",
        "CTXLOG_TARGET",
        "CTXLOG_REDACT_SECRETS",
        "CTXLOG_FIELDS",
    ] {
        command.env_remove(var);
    }
    for (name, value) in env {
        command.env(name, value);
    }
    command.arg("config").args(args).output()
}

#[test]
fn defaults_print_as_pretty_json() -> Result<(), Box<dyn Error>> {
    let output = ctxlog_config(&[], &[])?;

    assert!(output.status.success());
    let config: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(config.pointer("/version"), Some(&Value::from(1)));
    assert_eq!(config.pointer("/level"), Some(&Value::from("info")));
    assert_eq!(config.pointer("/format"), Some(&Value::from("text")));
    assert_eq!(config.pointer("/redactSecrets"), Some(&Value::Bool(true)));
    Ok(())
}

#[test]
fn env_overrides_the_config_file() -> Result<(), Box<dyn Error>> {
    let path = fixture("config/log-config.valid.json");
    let path = path.to_str().ok_or("fixture path is not UTF-8")?;

    let output = ctxlog_config(&["--config", path], &[("CTXLOG_LEVEL", "trace")])?;

    assert!(output.status.success());
    let config: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(config.pointer("/level"), Some(&Value::from("trace")));
    assert_eq!(config.pointer("/format"), Some(&Value::from("json")));
    assert_eq!(
        config.pointer("/fields/service"),
        Some(&Value::from("billing"))
    );
    Ok(())
}

#[test]
fn toml_output_is_available() -> Result<(), Box<dyn Error>> {
    let output = ctxlog_config(&["--output", "toml"], &[("CTXLOG_FORMAT", "json")])?;

    assert!(output.status.success());
    assert!(String::from_utf8(output.stdout)?.contains("format = \"json\""));
    Ok(())
}

#[test]
fn missing_config_file_exits_with_invalid_input() -> Result<(), Box<dyn Error>> {
    let output = ctxlog_config(&["--config", "/nonexistent/ctxlog.toml"], &[])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8(output.stderr)?.contains("config:config_file_not_found"));
    Ok(())
}
