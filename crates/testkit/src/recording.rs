//! Recording adapter capturing every emission with its field set.
//!
//! All adapters derived from one [`RecordingAdapter`] (via `new_entry` or
//! `with_field`) share a single recorder, so a test can hand the root adapter
//! to a logger and later inspect what any derived entry emitted.

use ctxlog_ports::{Adapter, FieldValue, Fields, Level, merged_fields};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// One captured `emit` call.
#[derive(Debug, Clone, PartialEq)]
pub struct Emission {
    /// Level passed to `emit`.
    pub level: Level,
    /// Message passed to `emit`.
    pub message: String,
    /// Fields accumulated on the emitting adapter.
    pub fields: Fields,
}

impl Emission {
    /// Field value by name.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Field value as a string slice, when it is a JSON string.
    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(FieldValue::as_str)
    }
}

#[derive(Debug, Default)]
struct Recorder {
    emissions: Mutex<Vec<Emission>>,
    new_entry_calls: AtomicUsize,
    with_field_calls: AtomicUsize,
}

/// Adapter that records emissions instead of writing them anywhere.
#[derive(Debug, Clone, Default)]
pub struct RecordingAdapter {
    recorder: Arc<Recorder>,
    fields: Fields,
}

impl RecordingAdapter {
    /// Create an adapter with an empty recorder and no fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// This adapter as a shared trait object (shares the recorder).
    pub fn adapter(&self) -> Arc<dyn Adapter> {
        Arc::new(self.clone())
    }

    /// Fields accumulated on this particular adapter instance.
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Snapshot of every emission so far.
    pub fn emissions(&self) -> Vec<Emission> {
        self.recorder.emissions.lock().expect("recorder lock").clone()
    }

    /// Drain recorded emissions.
    pub fn take(&self) -> Vec<Emission> {
        let mut guard = self.recorder.emissions.lock().expect("recorder lock");
        std::mem::take(&mut *guard)
    }

    /// Most recent emission.
    pub fn last(&self) -> Option<Emission> {
        self.recorder
            .emissions
            .lock()
            .expect("recorder lock")
            .last()
            .cloned()
    }

    /// Number of emissions so far.
    pub fn emission_count(&self) -> usize {
        self.recorder.emissions.lock().expect("recorder lock").len()
    }

    /// Number of `new_entry` calls across all derived adapters.
    pub fn new_entry_calls(&self) -> usize {
        self.recorder.new_entry_calls.load(Ordering::SeqCst)
    }

    /// Number of `with_field` calls across all derived adapters.
    pub fn with_field_calls(&self) -> usize {
        self.recorder.with_field_calls.load(Ordering::SeqCst)
    }
}

impl Adapter for RecordingAdapter {
    fn emit(&self, level: Level, message: &str) {
        self.recorder
            .emissions
            .lock()
            .expect("recorder lock")
            .push(Emission {
                level,
                message: message.to_string(),
                fields: self.fields.clone(),
            });
    }

    fn new_entry(&self) -> Arc<dyn Adapter> {
        self.recorder.new_entry_calls.fetch_add(1, Ordering::SeqCst);
        Arc::new(self.clone())
    }

    fn with_field(&self, name: &str, value: FieldValue) -> Arc<dyn Adapter> {
        self.recorder.with_field_calls.fetch_add(1, Ordering::SeqCst);
        Arc::new(Self {
            recorder: Arc::clone(&self.recorder),
            fields: merged_fields(&self.fields, name, value),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn derived_adapters_share_the_recorder() {
        let root = RecordingAdapter::new();
        let child = root.with_field("tenant", json!("acme"));
        child.emit(Level::Info, "hello");
        root.emit(Level::Warn, "plain");

        let emissions = root.take();
        assert_eq!(emissions.len(), 2);
        assert_eq!(emissions[0].field_str("tenant"), Some("acme"));
        assert!(emissions[1].fields.is_empty());
        assert_eq!(root.with_field_calls(), 1);
    }

    #[test]
    fn with_field_does_not_mutate_receiver() {
        let root = RecordingAdapter::new();
        let _child = root.with_field("k", json!(1));
        assert!(root.fields().is_empty());
    }
}
