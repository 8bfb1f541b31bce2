//! Backend adapter boundary contract.

use crate::Level;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Value of a named log field.
pub type FieldValue = serde_json::Value;

/// Named log fields, ordered by name.
pub type Fields = BTreeMap<Box<str>, FieldValue>;

/// Mediates between the logging model and a concrete backend.
///
/// Adapters have value semantics: [`Adapter::new_entry`] and
/// [`Adapter::with_field`] return new instances and never mutate the
/// receiver, so one adapter can be shared by every thread that logs through
/// it.
pub trait Adapter: Send + Sync {
    /// Send one line to the backend.
    ///
    /// Backend failures are handled (or swallowed) by the adapter; emission
    /// never reports an error to the caller.
    fn emit(&self, level: Level, message: &str);

    /// Return an independent copy of this adapter's accumulated field state.
    fn new_entry(&self) -> Arc<dyn Adapter>;

    /// Return a copy with one additional field merged into its field set.
    fn with_field(&self, name: &str, value: FieldValue) -> Arc<dyn Adapter>;
}

/// Merge `name = value` into a copy of `fields`.
///
/// Shared helper for adapters that keep their field state in a [`Fields`] map.
#[must_use]
pub fn merged_fields(fields: &Fields, name: &str, value: FieldValue) -> Fields {
    let mut merged = fields.clone();
    merged.insert(name.to_owned().into_boxed_str(), value);
    merged
}
