//! Logging configuration schema.

use ctxlog_ports::Level;
use ctxlog_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Current config schema version.
pub const CURRENT_CONFIG_VERSION: u32 = 1;

const MAX_BASE_FIELDS: usize = 64;

/// Output format of the configured adapter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// `k=v LEVEL: message` lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
    /// Events forwarded to `tracing`.
    Tracing,
}

impl LogFormat {
    /// Lower-case name used in config files and env vars.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::Tracing => "tracing",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "tracing" => Ok(Self::Tracing),
            _ => Err(value.to_string()),
        }
    }
}

/// Stream the text and JSON formats write to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogTarget {
    /// Standard error.
    #[default]
    Stderr,
    /// Standard output.
    Stdout,
}

impl FromStr for LogTarget {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "stderr" => Ok(Self::Stderr),
            "stdout" => Ok(Self::Stdout),
            _ => Err(value.to_string()),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct LogConfig {
    /// Schema version.
    pub version: u32,
    /// Least severe level emitted.
    pub level: Level,
    /// Output format.
    pub format: LogFormat,
    /// Output stream for text and JSON formats.
    pub target: LogTarget,
    /// Redact values of secret-looking field names.
    pub redact_secrets: bool,
    /// Fields attached to every line.
    pub fields: BTreeMap<String, String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_CONFIG_VERSION,
            level: Level::Info,
            format: LogFormat::Text,
            target: LogTarget::Stderr,
            redact_secrets: true,
            fields: BTreeMap::new(),
        }
    }
}

impl LogConfig {
    /// Validate and normalize the config.
    ///
    /// Field names are trimmed; names and values must be non-empty.
    pub fn validate_and_normalize(mut self) -> Result<Self, ConfigSchemaError> {
        if self.version != CURRENT_CONFIG_VERSION {
            return Err(ConfigSchemaError::UnsupportedVersion {
                found: self.version,
                supported: CURRENT_CONFIG_VERSION,
            });
        }
        if self.fields.len() > MAX_BASE_FIELDS {
            return Err(ConfigSchemaError::TooManyFields {
                len: self.fields.len(),
                max: MAX_BASE_FIELDS,
            });
        }

        let mut fields = BTreeMap::new();
        for (name, value) in std::mem::take(&mut self.fields) {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                return Err(ConfigSchemaError::EmptyFieldName);
            }
            if value.trim().is_empty() {
                return Err(ConfigSchemaError::EmptyFieldValue {
                    name: trimmed.to_string(),
                });
            }
            fields.insert(trimmed.to_string(), value);
        }
        self.fields = fields;
        Ok(self)
    }
}

/// Schema validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigSchemaError {
    /// The config version is not supported by this binary.
    #[error("unsupported config version {found} (supported: {supported})")]
    UnsupportedVersion {
        /// Version found in the config.
        found: u32,
        /// Version supported by this crate.
        supported: u32,
    },
    /// A base field has an empty name.
    #[error("field names must be non-empty")]
    EmptyFieldName,
    /// A base field has an empty value.
    #[error("field `{name}` must have a non-empty value")]
    EmptyFieldValue {
        /// Field name.
        name: String,
    },
    /// Too many base fields.
    #[error("too many fields ({len}, max {max})")]
    TooManyFields {
        /// Number of fields given.
        len: usize,
        /// Maximum allowed.
        max: usize,
    },
}

impl From<ConfigSchemaError> for ErrorEnvelope {
    fn from(error: ConfigSchemaError) -> Self {
        let message = error.to_string();
        match error {
            ConfigSchemaError::UnsupportedVersion { found, supported } => Self::expected(
                ErrorCode::new("config", "unsupported_version"),
                message,
            )
            .with_metadata("found", found.to_string())
            .with_metadata("supported", supported.to_string()),
            ConfigSchemaError::EmptyFieldName => {
                Self::expected(ErrorCode::new("config", "invalid_field"), message)
            },
            ConfigSchemaError::EmptyFieldValue { name } => {
                Self::expected(ErrorCode::new("config", "invalid_field"), message)
                    .with_metadata("field", name)
            },
            ConfigSchemaError::TooManyFields { len, max } => {
                Self::expected(ErrorCode::new("config", "too_many_fields"), message)
                    .with_metadata("len", len.to_string())
                    .with_metadata("max", max.to_string())
            },
        }
    }
}

/// Parse a log config from a JSON string, applying validation.
pub fn parse_log_config_json(input: &str) -> Result<LogConfig, ErrorEnvelope> {
    let config: LogConfig = serde_json::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_json"),
            format!("invalid config JSON: {error}"),
        )
    })?;

    config.validate_and_normalize().map_err(Into::into)
}

/// Parse a log config from a TOML string, applying validation.
pub fn parse_log_config_toml(input: &str) -> Result<LogConfig, ErrorEnvelope> {
    let config: LogConfig = toml::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_toml"),
            format!("invalid config TOML: {error}"),
        )
    })?;

    config.validate_and_normalize().map_err(Into::into)
}
