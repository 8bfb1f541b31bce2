//! Adapter that discards everything.

use ctxlog_ports::{Adapter, FieldValue, Level};
use std::sync::{Arc, LazyLock};

/// Discards every emission and hands back one shared instance for every
/// derivation.
#[derive(Debug, Default, Clone, Copy)]
pub struct NulAdapter;

impl NulAdapter {
    /// The process-wide instance.
    #[must_use]
    pub fn shared() -> Arc<dyn Adapter> {
        static SHARED: LazyLock<Arc<NulAdapter>> = LazyLock::new(|| Arc::new(NulAdapter));
        let adapter: Arc<Self> = Arc::clone(&SHARED);
        adapter
    }
}

impl Adapter for NulAdapter {
    fn emit(&self, _level: Level, _message: &str) {}

    fn new_entry(&self) -> Arc<dyn Adapter> {
        Self::shared()
    }

    fn with_field(&self, _name: &str, _value: FieldValue) -> Arc<dyn Adapter> {
        Self::shared()
    }
}
