//! Plain-text adapter.
//!
//! Lines look like `k=v k2=v2 LEVEL: message`. Fields are sorted by name;
//! a key or value containing a space is written as a quoted, escaped string.

use crate::log_sink::{LogSink, StderrLogSink};
use crate::redaction::redacted;
use ctxlog_logger::Logger;
use ctxlog_ports::{Adapter, FieldValue, Fields, Level, merged_fields};
use ctxlog_shared::Context;
use std::sync::Arc;

/// Adapter writing `k=v LEVEL: message` lines to a [`LogSink`].
#[derive(Clone)]
pub struct TextAdapter {
    sink: Arc<dyn LogSink>,
    fields: Fields,
    min_level: Level,
    redact: bool,
}

impl TextAdapter {
    /// Adapter writing every level to `sink`, without redaction.
    #[must_use]
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self {
            sink,
            fields: Fields::new(),
            min_level: Level::Trace,
            redact: false,
        }
    }

    /// Drop lines more verbose than `level`.
    #[must_use]
    pub const fn with_min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    /// Replace values of secret-looking keys with a placeholder.
    #[must_use]
    pub const fn with_redaction(mut self, redact: bool) -> Self {
        self.redact = redact;
        self
    }

    /// A root logger writing text lines to stderr.
    ///
    /// Lines carry no date or time prefix; add a timestamp field through
    /// enrichment when the sink does not stamp lines itself.
    #[must_use]
    pub fn std_logger() -> Logger {
        Logger::using_adapter(
            &Context::background(),
            Arc::new(Self::new(Arc::new(StderrLogSink))),
        )
    }

    /// Fields accumulated on this adapter.
    #[must_use]
    pub const fn fields(&self) -> &Fields {
        &self.fields
    }

    fn render(&self, level: Level, message: &str) -> String {
        let fields = if self.redact {
            redacted(&self.fields)
        } else {
            self.fields.clone()
        };

        let prefix: String = fields
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    FieldValue::String(text) => text.clone(),
                    other => other.to_string(),
                };
                format!("{}={} ", quoted(key), quoted(&value))
            })
            .collect();
        format!("{prefix}{}: {message}\n", level.prefix())
    }
}

fn quoted(text: &str) -> String {
    if text.contains(' ') {
        format!("{text:?}")
    } else {
        text.to_string()
    }
}

impl Adapter for TextAdapter {
    fn emit(&self, level: Level, message: &str) {
        if !self.min_level.enables(level) {
            return;
        }
        self.sink.write_line(&self.render(level, message));
    }

    fn new_entry(&self) -> Arc<dyn Adapter> {
        Arc::new(self.clone())
    }

    fn with_field(&self, name: &str, value: FieldValue) -> Arc<dyn Adapter> {
        Arc::new(Self {
            fields: merged_fields(&self.fields, name, value),
            ..self.clone()
        })
    }
}
