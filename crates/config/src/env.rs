//! Environment variable parsing and env-to-config merging.
//!
//! Env parsing is strict: a variable that is set but empty or malformed fails
//! instead of being ignored.

use crate::schema::{ConfigSchemaError, LogConfig, LogFormat, LogTarget};
use ctxlog_ports::Level;
use ctxlog_shared::{ErrorCode, ErrorEnvelope, REDACTED, is_secret_key};
use std::collections::BTreeMap;

/// Env var: least severe level emitted.
pub const ENV_LEVEL: &str = "CTXLOG_LEVEL";
/// Env var: output format (`text` | `json` | `tracing`).
pub const ENV_FORMAT: &str = "CTXLOG_FORMAT";
/// Env var: output stream (`stderr` | `stdout`).
pub const ENV_TARGET: &str = "CTXLOG_TARGET";
/// Env var: secret redaction toggle.
pub const ENV_REDACT_SECRETS: &str = "CTXLOG_REDACT_SECRETS";
/// Env var: base fields as `k=v,k2=v2`.
pub const ENV_FIELDS: &str = "CTXLOG_FIELDS";

const ALL_ENV_VARS: [&str; 5] = [ENV_LEVEL, ENV_FORMAT, ENV_TARGET, ENV_REDACT_SECRETS, ENV_FIELDS];

/// Overrides read from the environment. `None` leaves the config untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogEnv {
    /// Level override.
    pub level: Option<Level>,
    /// Format override.
    pub format: Option<LogFormat>,
    /// Target override.
    pub target: Option<LogTarget>,
    /// Redaction override.
    pub redact_secrets: Option<bool>,
    /// Fields merged over the configured ones.
    pub fields: Option<BTreeMap<String, String>>,
}

impl LogEnv {
    /// Parse env overrides from a key/value map (useful for tests and fixtures).
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        Ok(Self {
            level: parse_optional_level(map, ENV_LEVEL)?,
            format: parse_optional_enum(map, ENV_FORMAT)?,
            target: parse_optional_enum(map, ENV_TARGET)?,
            redact_secrets: parse_optional_bool(map, ENV_REDACT_SECRETS)?,
            fields: parse_optional_fields(map, ENV_FIELDS)?,
        })
    }

    /// Parse env overrides from the current process environment.
    pub fn from_std_env() -> Result<Self, EnvParseError> {
        let map = ALL_ENV_VARS
            .into_iter()
            .filter_map(|name| {
                std::env::var(name)
                    .ok()
                    .map(|value| (name.to_string(), value))
            })
            .collect();
        Self::from_map(&map)
    }

    /// Returns true when no override is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.level.is_none()
            && self.format.is_none()
            && self.target.is_none()
            && self.redact_secrets.is_none()
            && self.fields.is_none()
    }
}

/// Apply env overrides to `config` and validate the result.
pub fn apply_env_overrides(
    mut config: LogConfig,
    env: &LogEnv,
) -> Result<LogConfig, ConfigSchemaError> {
    if let Some(level) = env.level {
        config.level = level;
    }
    if let Some(format) = env.format {
        config.format = format;
    }
    if let Some(target) = env.target {
        config.target = target;
    }
    if let Some(redact) = env.redact_secrets {
        config.redact_secrets = redact;
    }
    if let Some(fields) = &env.fields {
        config
            .fields
            .extend(fields.iter().map(|(name, value)| (name.clone(), value.clone())));
    }
    config.validate_and_normalize()
}

/// Env parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvParseError {
    /// Env var was set but empty.
    #[error("{var} must be non-empty")]
    EmptyValue {
        /// Env var name.
        var: &'static str,
    },
    /// Boolean env var had an invalid value.
    #[error("{var} must be a boolean")]
    InvalidBool {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
    /// Enum env var had an invalid value.
    #[error("{var} has an unsupported value")]
    InvalidEnum {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
    /// Field list contained an entry that is not `name=value`.
    #[error("{var} contains invalid field entry: {entry}")]
    InvalidFieldEntry {
        /// Env var name.
        var: &'static str,
        /// Invalid entry.
        entry: String,
    },
}

impl EnvParseError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyValue { .. } => ErrorCode::new("config", "empty_env_var"),
            Self::InvalidBool { .. } => ErrorCode::new("config", "invalid_env_bool"),
            Self::InvalidEnum { .. } => ErrorCode::new("config", "invalid_env_enum"),
            Self::InvalidFieldEntry { .. } => ErrorCode::new("config", "invalid_env_fields"),
        }
    }
}

impl From<EnvParseError> for ErrorEnvelope {
    fn from(error: EnvParseError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::expected(code, message);

        match error {
            EnvParseError::EmptyValue { var } => envelope.with_metadata("env_var", var),
            EnvParseError::InvalidBool { var, value } | EnvParseError::InvalidEnum { var, value } => {
                envelope
                    .with_metadata("env_var", var)
                    .with_metadata("value", value)
            },
            EnvParseError::InvalidFieldEntry { var, entry } => envelope
                .with_metadata("env_var", var)
                .with_metadata("entry", redact_entry(&entry)),
        }
    }
}

fn redact_entry(entry: &str) -> String {
    match entry.split_once('=') {
        Some((name, _)) if is_secret_key(name) => format!("{name}={REDACTED}"),
        _ => entry.to_string(),
    }
}

fn non_empty<'a>(
    map: &'a BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<&'a str>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }
    Ok(Some(trimmed))
}

fn parse_optional_level(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<Level>, EnvParseError> {
    non_empty(map, var)?
        .map(|value| {
            value.parse::<Level>().map_err(|_| EnvParseError::InvalidEnum {
                var,
                value: value.to_string(),
            })
        })
        .transpose()
}

fn parse_optional_enum<T: std::str::FromStr>(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<T>, EnvParseError> {
    non_empty(map, var)?
        .map(|value| {
            value.parse::<T>().map_err(|_| EnvParseError::InvalidEnum {
                var,
                value: value.to_string(),
            })
        })
        .transpose()
}

fn parse_optional_bool(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<bool>, EnvParseError> {
    let Some(value) = non_empty(map, var)? else {
        return Ok(None);
    };

    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(Some(true)),
        "false" | "0" | "no" | "off" => Ok(Some(false)),
        _ => Err(EnvParseError::InvalidBool {
            var,
            value: value.to_string(),
        }),
    }
}

fn parse_optional_fields(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<BTreeMap<String, String>>, EnvParseError> {
    let Some(value) = non_empty(map, var)? else {
        return Ok(None);
    };

    let mut fields = BTreeMap::new();
    for entry in value.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
        let Some((name, field_value)) = entry.split_once('=') else {
            return Err(EnvParseError::InvalidFieldEntry {
                var,
                entry: entry.to_string(),
            });
        };
        let (name, field_value) = (name.trim(), field_value.trim());
        if name.is_empty() || field_value.is_empty() {
            return Err(EnvParseError::InvalidFieldEntry {
                var,
                entry: entry.to_string(),
            });
        }
        fields.insert(name.to_string(), field_value.to_string());
    }
    Ok(Some(fields))
}
