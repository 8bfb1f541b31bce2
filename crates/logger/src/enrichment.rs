//! Ordered registry of enrichment functions.
//!
//! Every time an [`Entry`] is derived for a context, each registered function
//! runs once, in registration order, and the output of one becomes the input
//! of the next. Registration is append-only.
//!
//! The function list sits behind a read-write lock. Derivation takes a
//! snapshot under the read lock and releases it before running any function,
//! so registering concurrently with logging is safe and enrichment functions
//! may log themselves.

use crate::{Enricher, Entry};
use ctxlog_ports::FieldValue;
use ctxlog_shared::Context;
use std::fmt;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

/// Transforms a draft entry for a context into an enriched entry.
pub type EnrichmentFn = Arc<dyn Fn(&Context, &dyn Enricher) -> Entry + Send + Sync>;

/// Field name written by [`correlation_id_enrichment`].
pub const CORRELATION_ID_FIELD: &str = "correlationId";

/// An ordered, append-only list of enrichment functions.
///
/// Clones share the same list. [`Registry::global`] is the process-wide
/// default used by loggers that are not given an explicit registry.
#[derive(Clone, Default)]
pub struct Registry {
    funcs: Arc<RwLock<Vec<EnrichmentFn>>>,
}

static GLOBAL: LazyLock<Registry> = LazyLock::new(Registry::new);

impl Registry {
    /// An empty registry, isolated from the global one.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry.
    #[must_use]
    pub fn global() -> Self {
        GLOBAL.clone()
    }

    /// Append an enrichment function.
    pub fn register<F>(&self, enrich: F)
    where
        F: Fn(&Context, &dyn Enricher) -> Entry + Send + Sync + 'static,
    {
        let mut funcs = self.funcs.write().unwrap_or_else(PoisonError::into_inner);
        funcs.push(Arc::new(enrich));
        tracing::trace!(registered = funcs.len(), "enrichment function registered");
    }

    /// Number of registered functions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.funcs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ordered copy of the registered functions.
    #[must_use]
    pub fn snapshot(&self) -> Vec<EnrichmentFn> {
        self.funcs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Run the pipeline over `draft` for `context`.
    pub(crate) fn enrich(&self, context: &Context, draft: Entry) -> Entry {
        self.snapshot()
            .iter()
            .fold(draft, |entry, enrich| enrich(context, &entry.as_enricher()))
    }

    /// Returns true when both handles share one function list.
    #[must_use]
    pub fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.funcs, &other.funcs)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Registry")
            .field("len", &self.len())
            .finish()
    }
}

/// Register `enrich` with the process-wide registry.
pub fn register_enrichment<F>(enrich: F)
where
    F: Fn(&Context, &dyn Enricher) -> Entry + Send + Sync + 'static,
{
    GLOBAL.register(enrich);
}

/// Enrichment adding the context's correlation id as `correlationId`.
pub fn correlation_id_enrichment() -> impl Fn(&Context, &dyn Enricher) -> Entry + Send + Sync + 'static
{
    |context: &Context, enricher: &dyn Enricher| match context.correlation_id() {
        Some(id) => enricher.with_field(CORRELATION_ID_FIELD, FieldValue::from(id.as_str())),
        None => enricher.entry(),
    }
}
