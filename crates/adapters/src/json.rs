//! Structured JSON adapter.

use crate::log_sink::LogSink;
use crate::redaction::redacted;
use ctxlog_ports::{Adapter, FieldValue, Fields, Level, merged_fields};
use serde_json::Value;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

const SERIALIZE_FAILED_LINE: &str =
    "{\"timestampMs\":0,\"level\":\"error\",\"message\":\"log serialization failed\"}\n";

/// JSON adapter emitting one object per line:
/// `{"timestampMs", "level", "message", "fields"}`.
///
/// `fields` is omitted when empty. Secret-looking keys are redacted unless
/// redaction is turned off.
#[derive(Clone)]
pub struct JsonAdapter {
    sink: Arc<dyn LogSink>,
    fields: Fields,
    min_level: Level,
    redact: bool,
}

impl JsonAdapter {
    /// Create a JSON adapter backed by the provided sink.
    #[must_use]
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self {
            sink,
            fields: Fields::new(),
            min_level: Level::Trace,
            redact: true,
        }
    }

    /// Set the least severe level emitted.
    #[must_use]
    pub const fn with_min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    /// Toggle secret redaction.
    #[must_use]
    pub const fn with_redaction(mut self, redact: bool) -> Self {
        self.redact = redact;
        self
    }

    fn encode(&self, level: Level, message: &str) -> String {
        let fields = if self.redact {
            redacted(&self.fields)
        } else {
            self.fields.clone()
        };

        let mut payload = serde_json::Map::new();
        payload.insert("timestampMs".to_string(), Value::from(now_epoch_ms()));
        payload.insert("level".to_string(), Value::String(level_str(level)));
        payload.insert("message".to_string(), Value::String(message.to_string()));
        if !fields.is_empty() {
            payload.insert("fields".to_string(), fields_to_json(&fields));
        }

        serde_json::to_string(&Value::Object(payload)).map_or_else(
            |error| {
                tracing::debug!(%error, "json log line serialization failed");
                SERIALIZE_FAILED_LINE.to_string()
            },
            |mut encoded| {
                encoded.push('\n');
                encoded
            },
        )
    }
}

impl Adapter for JsonAdapter {
    fn emit(&self, level: Level, message: &str) {
        if !self.min_level.enables(level) {
            return;
        }
        self.sink.write_line(&self.encode(level, message));
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

fn level_str(level: Level) -> String {
    level.name().to_ascii_lowercase()
}

fn fields_to_json(fields: &Fields) -> Value {
    let mut map = serde_json::Map::new();
    for (key, value) in fields {
        map.insert(key.to_string(), value.clone());
    }
    Value::Object(map)
}

fn now_epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|duration| u64::try_from(duration.as_millis()).ok())
        .unwrap_or_default()
}
