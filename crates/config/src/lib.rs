//! # ctxlog-config
//!
//! Logging configuration: schema, env overrides, file loading, and the
//! factory that turns a config into a [`Logger`](ctxlog_logger::Logger).
//! This crate depends on `adapters`, `logger`, `ports`, and `shared`.

/// Logger construction from a validated config.
pub mod build;
/// Environment variable parsing and merging.
pub mod env;
/// Config loading helpers (env + file).
pub mod load;
/// Configuration schema types and helpers.
pub mod schema;

pub use build::{build_adapter, build_logger};
pub use env::{
    ENV_FIELDS, ENV_FORMAT, ENV_LEVEL, ENV_REDACT_SECRETS, ENV_TARGET, EnvParseError, LogEnv,
    apply_env_overrides,
};
pub use load::{
    load_log_config_from_path, load_log_config_from_sources, load_log_config_std_env,
    to_pretty_json, to_pretty_toml,
};
pub use schema::{
    CURRENT_CONFIG_VERSION, ConfigSchemaError, LogConfig, LogFormat, LogTarget,
    parse_log_config_json, parse_log_config_toml,
};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctxlog_adapters::adapters_crate_version;
    use ctxlog_shared::shared_crate_version;

    #[test]
    fn config_crate_compiles() {
        let version = config_crate_version();
        assert!(!version.is_empty());
    }

    #[test]
    fn config_can_use_adapters_and_shared() {
        assert!(!adapters_crate_version().is_empty());
        assert!(!shared_crate_version().is_empty());
    }
}
