//! Config command handler.

use crate::CliOutput;
use crate::error::CliError;
use clap::ValueEnum;
use ctxlog_config::{load_log_config_std_env, to_pretty_json, to_pretty_toml};
use std::path::Path;

/// Serialization used by `ctxlog config`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ConfigOutput {
    /// Pretty JSON.
    #[default]
    Json,
    /// Pretty TOML.
    Toml,
}

/// Print the effective config (defaults, then file, then env).
pub fn run_config(path: Option<&Path>, output: ConfigOutput) -> Result<CliOutput, CliError> {
    let config = load_log_config_std_env(path)?;
    let stdout = match output {
        ConfigOutput::Json => to_pretty_json(&config)?,
        ConfigOutput::Toml => to_pretty_toml(&config)?,
    };
    Ok(CliOutput::stdout(stdout))
}
