//! Turn a validated [`LogConfig`] into a ready [`Logger`].

use crate::{LogConfig, LogFormat, LogTarget};
use ctxlog_adapters::{
    JsonAdapter, LogSink, StderrLogSink, StdoutLogSink, TextAdapter, TracingAdapter,
};
use ctxlog_logger::Logger;
use ctxlog_ports::{Adapter, FieldValue};
use ctxlog_shared::Context;
use std::sync::Arc;

/// Build the configured adapter writing to `sink`.
///
/// Base fields are attached to the returned adapter. The tracing format
/// ignores `sink` and the minimum level; the subscriber filters instead.
pub fn build_adapter(config: &LogConfig, sink: Arc<dyn LogSink>) -> Arc<dyn Adapter> {
    let adapter: Arc<dyn Adapter> = match config.format {
        LogFormat::Text => Arc::new(
            TextAdapter::new(sink)
                .with_min_level(config.level)
                .with_redaction(config.redact_secrets),
        ),
        LogFormat::Json => Arc::new(
            JsonAdapter::new(sink)
                .with_min_level(config.level)
                .with_redaction(config.redact_secrets),
        ),
        LogFormat::Tracing => {
            Arc::new(TracingAdapter::new().with_redaction(config.redact_secrets))
        },
    };

    config.fields.iter().fold(adapter, |adapter, (name, value)| {
        adapter.with_field(name, FieldValue::from(value.as_str()))
    })
}

/// Build a logger for `config` writing to the configured stream.
pub fn build_logger(config: &LogConfig, context: &Context) -> Logger {
    let sink: Arc<dyn LogSink> = match config.target {
        LogTarget::Stderr => Arc::new(StderrLogSink),
        LogTarget::Stdout => Arc::new(StdoutLogSink),
    };
    tracing::debug!(
        format = %config.format,
        level = config.level.name(),
        fields = config.fields.len(),
        "building logger"
    );
    Logger::using_adapter(context, build_adapter(config, sink))
}
