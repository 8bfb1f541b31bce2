//! Config loading helpers (env + file).
//!
//! Precedence, highest wins: env overrides, then the config file, then
//! [`LogConfig::default`].

use crate::{LogConfig, LogEnv, apply_env_overrides};
use ctxlog_shared::{ErrorCode, ErrorEnvelope};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

/// Load the log config from an optional JSON document and env overrides.
pub fn load_log_config_from_sources(
    config_json: Option<&str>,
    env: &LogEnv,
) -> Result<LogConfig, ErrorEnvelope> {
    let config = match config_json {
        None => LogConfig::default(),
        Some(input) => parse_config_unvalidated(input, ConfigFormat::Json)?,
    };

    apply_env_overrides(config, env).map_err(Into::into)
}

/// Load the log config from an optional file path and env overrides.
///
/// The file format follows the extension: `.toml` for TOML, `.json` or no
/// extension for JSON.
pub fn load_log_config_from_path(
    config_path: Option<&Path>,
    env: &LogEnv,
) -> Result<LogConfig, ErrorEnvelope> {
    let config = match config_path {
        None => LogConfig::default(),
        Some(path) => {
            let config_text = read_config_file(path)?;
            let format = detect_config_format(path)?;
            parse_config_unvalidated(&config_text, format)?
        },
    };

    tracing::debug!(
        path = ?config_path,
        env_overrides = !env.is_empty(),
        "loading log config"
    );
    apply_env_overrides(config, env).map_err(Into::into)
}

/// Load the log config from the process environment and an optional file.
pub fn load_log_config_std_env(config_path: Option<&Path>) -> Result<LogConfig, ErrorEnvelope> {
    let env = LogEnv::from_std_env().map_err(ErrorEnvelope::from)?;
    load_log_config_from_path(config_path, &env)
}

/// Serialize the config as deterministic pretty JSON (with trailing newline).
pub fn to_pretty_json(config: &LogConfig) -> Result<String, ErrorEnvelope> {
    let mut output = serde_json::to_string_pretty(config).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::new("core", "internal"),
            format!("failed to serialize config: {error}"),
        )
    })?;
    output.push('\n');
    Ok(output)
}

/// Serialize the config as deterministic pretty TOML (with trailing newline).
pub fn to_pretty_toml(config: &LogConfig) -> Result<String, ErrorEnvelope> {
    let mut output = toml::to_string_pretty(config).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::new("config", "serialize_toml"),
            format!("failed to serialize config TOML: {error}"),
        )
    })?;
    output.push('\n');
    Ok(output)
}

fn parse_config_unvalidated(input: &str, format: ConfigFormat) -> Result<LogConfig, ErrorEnvelope> {
    match format {
        ConfigFormat::Json => serde_json::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_json"),
                format!("invalid config JSON: {error}"),
            )
            .with_metadata("source", "config")
        }),
        ConfigFormat::Toml => toml::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_toml"),
                format!("invalid config TOML: {error}"),
            )
            .with_metadata("source", "config")
        }),
    }
}

fn read_config_file(path: &Path) -> Result<String, ErrorEnvelope> {
    std::fs::read_to_string(path).map_err(|error| {
        let code = match error.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::new("config", "config_file_not_found"),
            std::io::ErrorKind::PermissionDenied => {
                ErrorCode::new("config", "config_file_permission_denied")
            },
            _ => ErrorCode::new("config", "config_file_io"),
        };

        ErrorEnvelope::expected(code, format!("failed to read config file: {error}"))
            .with_metadata("path", path.to_string_lossy().to_string())
    })
}

fn detect_config_format(path: &Path) -> Result<ConfigFormat, ErrorEnvelope> {
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        None | Some("json") => Ok(ConfigFormat::Json),
        Some("toml") => Ok(ConfigFormat::Toml),
        Some(other) => Err(ErrorEnvelope::expected(
            ErrorCode::new("config", "unsupported_format"),
            "unsupported config format; use .json or .toml",
        )
        .with_metadata("extension", other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LogFormat;
    use ctxlog_ports::Level;
    use std::error::Error;
    use std::path::PathBuf;

    #[test]
    fn sources_without_input_yield_defaults() -> Result<(), Box<dyn Error>> {
        let config = load_log_config_from_sources(None, &LogEnv::default())?;
        assert_eq!(config, LogConfig::default());
        Ok(())
    }

    #[test]
    fn env_wins_over_document() -> Result<(), Box<dyn Error>> {
        let env = LogEnv {
            format: Some(LogFormat::Json),
            ..LogEnv::default()
        };

        let config =
            load_log_config_from_sources(Some(r#"{"level":"trace","format":"text"}"#), &env)?;

        assert_eq!(config.level, Level::Trace);
        assert_eq!(config.format, LogFormat::Json);
        Ok(())
    }

    #[test]
    fn missing_file_reports_not_found() {
        let path = PathBuf::from("/nonexistent/ctxlog/config.json");
        let error = load_log_config_from_path(Some(&path), &LogEnv::default()).err();

        assert_eq!(
            error.map(|error| error.code),
            Some(ErrorCode::new("config", "config_file_not_found"))
        );
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let error = detect_config_format(Path::new("log.yaml")).err();

        assert_eq!(
            error.and_then(|error| error.metadata.get("extension").cloned()),
            Some("yaml".to_string())
        );
    }

    #[test]
    fn pretty_outputs_end_with_newline() -> Result<(), Box<dyn Error>> {
        let config = LogConfig::default();

        let json = to_pretty_json(&config)?;
        let toml = to_pretty_toml(&config)?;

        assert!(json.ends_with("}\n"));
        assert!(json.contains("\"redactSecrets\": true"));
        assert!(toml.contains("level = \"info\""));
        Ok(())
    }
}
