//! # ctxlog-adapters
//!
//! Concrete [`Adapter`](ctxlog_ports::Adapter) backends:
//!
//! - [`TextAdapter`]: `k=v LEVEL: message` lines
//! - [`JsonAdapter`]: one JSON object per line
//! - [`TracingAdapter`]: forwards to `tracing`
//!
//! The text and JSON adapters write through a [`LogSink`].
//! This crate depends on `logger`, `ports`, and `shared`.

#![cfg_attr(test, allow(clippy::expect_used, reason = "tests assert via expect"))]
#![cfg_attr(test, allow(clippy::indexing_slicing, reason = "tests index captured lines"))]

pub mod json;
pub mod log_sink;
mod redaction;
pub mod text;
pub mod tracing_adapter;

pub use json::JsonAdapter;
pub use log_sink::{LogSink, MemoryLogSink, StderrLogSink, StdoutLogSink};
pub use text::TextAdapter;
pub use tracing_adapter::TracingAdapter;

/// Returns the adapters crate version.
#[must_use]
pub const fn adapters_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctxlog_logger::logger_crate_version;
    use ctxlog_ports::ports_crate_version;
    use ctxlog_shared::shared_crate_version;

    fn workspace_deps() -> Vec<String> {
        let cargo_toml = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml"));
        let mut deps = Vec::new();
        let mut in_deps = false;

        for raw_line in cargo_toml.lines() {
            let line = raw_line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            if line.starts_with('[') {
                in_deps = line == "[dependencies]";
                continue;
            }
            if in_deps && line.starts_with("ctxlog-") {
                let key = line.split('=').next().unwrap_or("").trim();
                let name = key.split('.').next().unwrap_or("").trim();
                deps.push(name.to_string());
            }
        }

        deps
    }

    #[test]
    fn adapters_stay_out_of_config_and_testkit() {
        let deps = workspace_deps();
        assert!(!deps.iter().any(|dep| dep == "ctxlog-config"));
        assert!(!deps.iter().any(|dep| dep == "ctxlog-testkit"));
    }

    #[test]
    fn adapters_can_use_core_crates() {
        assert!(!adapters_crate_version().is_empty());
        assert!(!logger_crate_version().is_empty());
        assert!(!ports_crate_version().is_empty());
        assert!(!shared_crate_version().is_empty());
    }
}
