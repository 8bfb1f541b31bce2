//! Emit command handler.

use crate::CliOutput;
use crate::error::CliError;
use clap::Args;
use ctxlog_config::{LogEnv, LogFormat, build_logger, load_log_config_from_path};
use ctxlog_logger::{Entry, correlation_id_enrichment, register_enrichment};
use ctxlog_ports::Level;
use ctxlog_shared::{Context, CorrelationId, ErrorEnvelope};
use std::path::PathBuf;

/// Arguments for `ctxlog emit`.
#[derive(Debug, Args)]
pub struct EmitArgs {
    /// Level of the emitted line (`fatal` exits with status 1).
    #[arg(long, default_value = "info")]
    pub level: Level,
    /// Output format override (`text`, `json`, `tracing`).
    #[arg(long)]
    pub format: Option<LogFormat>,
    /// One-off field as `name=value`; repeatable.
    #[arg(long = "field", value_parser = parse_field)]
    pub fields: Vec<(String, String)>,
    /// Correlation id carried by the logging context.
    #[arg(long)]
    pub correlation_id: Option<String>,
    /// Optional config file path (JSON/TOML).
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Message text.
    pub message: String,
}

/// Run the emit command.
///
/// Precedence for format: `--format`, then env, then the config file.
pub fn run_emit(args: &EmitArgs) -> Result<CliOutput, CliError> {
    let env = LogEnv::from_std_env().map_err(ErrorEnvelope::from)?;
    let mut config = load_log_config_from_path(args.config.as_deref(), &env)?;
    if let Some(format) = args.format {
        config.format = format;
    }
    if config.format == LogFormat::Tracing {
        crate::init_tracing(config.level);
    }

    let context = match &args.correlation_id {
        Some(id) => Context::background().with_correlation_id(CorrelationId::parse(id)?),
        None => Context::background(),
    };
    register_enrichment(correlation_id_enrichment());

    tracing::debug!(level = args.level.name(), format = %config.format, "emitting");
    let logger = build_logger(&config, &context);
    let entry = args
        .fields
        .iter()
        .fold(logger.new_entry(), |entry, (name, value)| {
            entry.with_field(name, value.as_str())
        });
    emit_at(&entry, args.level, &args.message);

    Ok(CliOutput::empty())
}

fn emit_at(entry: &Entry, level: Level, message: &str) {
    match level {
        Level::Fatal => entry.fatal(message),
        Level::Error => entry.error_msg(message),
        Level::Warn => entry.warn(message),
        Level::Info => entry.info(message),
        Level::Debug => entry.debug(message),
        Level::Trace => entry.trace(message),
    }
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got `{raw}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err("field name must be non-empty".to_owned());
    }
    Ok((name.to_owned(), value.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_split_on_the_first_equals() {
        assert_eq!(
            parse_field("query=a=b"),
            Ok(("query".to_owned(), "a=b".to_owned()))
        );
        assert_eq!(
            parse_field(" route =/upload"),
            Ok(("route".to_owned(), "/upload".to_owned()))
        );
    }

    #[test]
    fn malformed_fields_are_rejected() {
        assert!(parse_field("novalue").is_err());
        assert!(parse_field("=value").is_err());
    }
}
