//! Bridge adapter forwarding emissions to `tracing`.
//!
//! Each emission becomes one event under the `ctxlog` target. Accumulated
//! fields are rendered as a single JSON `fields` value; Fatal maps to the
//! `ERROR` tracing level with `fatal = true`.

use crate::redaction::redacted;
use ctxlog_ports::{Adapter, FieldValue, Fields, Level, merged_fields};
use std::sync::Arc;

/// Adapter emitting `tracing` events.
#[derive(Debug, Clone, Default)]
pub struct TracingAdapter {
    fields: Fields,
    redact: bool,
}

impl TracingAdapter {
    /// Adapter with no fields and redaction off.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle secret redaction.
    #[must_use]
    pub const fn with_redaction(mut self, redact: bool) -> Self {
        self.redact = redact;
        self
    }

    fn rendered_fields(&self) -> String {
        let fields = if self.redact {
            redacted(&self.fields)
        } else {
            self.fields.clone()
        };
        serde_json::to_string(&fields).unwrap_or_default()
    }
}

impl Adapter for TracingAdapter {
    fn emit(&self, level: Level, message: &str) {
        let fields = self.rendered_fields();
        match level {
            Level::Trace => tracing::trace!(target: "ctxlog", fields = %fields, "{message}"),
            Level::Debug => tracing::debug!(target: "ctxlog", fields = %fields, "{message}"),
            Level::Info => tracing::info!(target: "ctxlog", fields = %fields, "{message}"),
            Level::Warn => tracing::warn!(target: "ctxlog", fields = %fields, "{message}"),
            Level::Error => tracing::error!(target: "ctxlog", fields = %fields, "{message}"),
            Level::Fatal => {
                tracing::error!(target: "ctxlog", fatal = true, fields = %fields, "{message}");
            },
        }
    }

    fn new_entry(&self) -> Arc<dyn Adapter> {
        Arc::new(self.clone())
    }

    fn with_field(&self, name: &str, value: FieldValue) -> Arc<dyn Adapter> {
        Arc::new(Self {
            fields: merged_fields(&self.fields, name, value),
            redact: self.redact,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io;
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

    impl CaptureWriter {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().expect("capture lock")).into_owned()
        }
    }

    impl io::Write for CaptureWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("capture lock").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn captured(emit: impl FnOnce()) -> String {
        let writer = CaptureWriter::default();
        let make_writer = writer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .without_time()
            .with_writer(move || make_writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, emit);
        writer.contents()
    }

    #[test]
    fn levels_map_to_tracing_levels() {
        let adapter = TracingAdapter::new();

        let output = captured(|| {
            adapter.emit(Level::Trace, "t");
            adapter.emit(Level::Warn, "w");
            adapter.emit(Level::Fatal, "f");
        });

        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("TRACE"));
        assert!(lines[1].contains("WARN"));
        assert!(lines[2].contains("ERROR"));
        assert!(lines[2].contains("fatal=true"));
    }

    #[test]
    fn fields_are_forwarded_and_redacted() {
        let adapter = TracingAdapter::new()
            .with_redaction(true)
            .with_field("tenant", json!("acme"));
        let adapter = adapter.with_field("password", json!("hunter2"));

        let output = captured(|| adapter.emit(Level::Info, "signed in"));

        assert!(output.contains("signed in"));
        assert!(output.contains("acme"));
        assert!(!output.contains("hunter2"));
    }
}
