//! CLI E2E tests for `ctxlog emit`.

use serde_json::Value;
use std::error::Error;
use std::process::{Command, Output};

const CTXLOG_VARS: [&str; 5] = [
    "CTXLOG_LEVEL",
    "CTXLOG_FORMAT",
    "CTXLOG_TARGET",
    "CTXLOG_REDACT_SECRETS",
    "CTXLOG_FIELDS",
];

fn ctxlog(args: &[&str], env: &[(&str, &str)]) -> std::io::Result<Output> {
    let mut command = Command::new(env!("CARGO_BIN_EXE_ctxlog"));
    for var in CTXLOG_VARS {
        command.env_remove(var);
    }
    command.env_remove("RUST_LOG");
    for (name, value) in env {
        command.env(name, value);
    }
    command.args(args).output()
}

#[test]
fn text_line_carries_the_correlation_id_and_fields() -> Result<(), Box<dyn Error>> {
    let output = ctxlog(
        &[
            "emit",
            "--correlation-id",
            "req_cli",
            "--field",
            "route=/upload",
            "stored",
        ],
        &[],
    )?;

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stderr)?,
        "correlationId=req_cli route=/upload INFO: stored\n"
    );
    assert!(output.stdout.is_empty());
    Ok(())
}

#[test]
fn fatal_writes_then_exits_with_status_one() -> Result<(), Box<dyn Error>> {
    let output = ctxlog(&["emit", "--level", "fatal", "stopping"], &[])?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(String::from_utf8(output.stderr)?, "FATAL: stopping\n");
    Ok(())
}

#[test]
fn json_lines_go_to_the_configured_target() -> Result<(), Box<dyn Error>> {
    let output = ctxlog(
        &[
            "emit",
            "--format",
            "json",
            "--level",
            "warn",
            "--field",
            "apiKey=s3cr3t",
            "slow request",
        ],
        &[("CTXLOG_TARGET", "stdout"), ("CTXLOG_FIELDS", "service=billing")],
    )?;

    assert!(output.status.success());
    let payload: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(payload.pointer("/level"), Some(&Value::from("warn")));
    assert_eq!(payload.pointer("/message"), Some(&Value::from("slow request")));
    assert_eq!(
        payload.pointer("/fields/service"),
        Some(&Value::from("billing"))
    );
    assert_eq!(
        payload.pointer("/fields/apiKey"),
        Some(&Value::from("[REDACTED]"))
    );
    Ok(())
}

#[test]
fn lines_below_the_configured_level_are_dropped() -> Result<(), Box<dyn Error>> {
    let output = ctxlog(&["emit", "--level", "debug", "noise"], &[])?;

    assert!(output.status.success());
    assert!(output.stderr.is_empty());

    let verbose = ctxlog(
        &["emit", "--level", "debug", "noise"],
        &[("CTXLOG_LEVEL", "trace")],
    )?;
    assert_eq!(String::from_utf8(verbose.stderr)?, "DEBUG: noise\n");
    Ok(())
}

#[test]
fn invalid_env_is_reported_as_invalid_input() -> Result<(), Box<dyn Error>> {
    let output = ctxlog(&["emit", "hello"], &[("CTXLOG_REDACT_SECRETS", "sometimes")])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8(output.stderr)?.contains("config:invalid_env_bool"));
    Ok(())
}
