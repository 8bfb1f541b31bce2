//! Context-bound log entries.
//!
//! An [`Entry`] binds an execution [`Context`] to an [`Adapter`]. It is an
//! immutable handle: every `with_*` operation returns a new entry and level
//! methods never change the receiver, so entries can be shared freely across
//! threads.
//!
//! # Derivation
//!
//! Deriving an entry for a context asks the adapter for a fresh derivation
//! point, wraps it in a draft bound to the context, and folds the draft
//! through every enrichment function of the entry's [`Registry`]. Fields added
//! with [`Entry::with_field`] are re-applied after the pipeline, so registered
//! enrichment never shadows them.
//!
//! Each entry also remembers its base adapter: the root adapter plus its
//! one-off fields, without anything the pipeline added. Derivation always
//! starts from that base, so fields contributed by enrichment for one context
//! never leak into an entry derived for another.
//!
//! Every level method derives exactly once, from the entry's own context or,
//! for the error paths, from the context recovered from the logged error.

use crate::exit::{self, ExitHook};
use crate::nul::NulAdapter;
use crate::Registry;
use ctxlog_ports::{Adapter, FieldValue, Fields, Level, merged_fields};
use ctxlog_shared::{Context, recover};
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// The capability handed to enrichment functions.
///
/// An enricher can add one field at a time to the draft it wraps, or hand the
/// draft back unchanged. Enrichment functions may also return an entirely
/// different [`Entry`].
pub trait Enricher {
    /// The draft with one more adapter-level field.
    fn with_field(&self, name: &str, value: FieldValue) -> Entry;

    /// The draft unchanged.
    fn entry(&self) -> Entry;
}

/// Draft entry seen by enrichment functions.
pub(crate) struct Draft<'a>(&'a Entry);

impl Enricher for Draft<'_> {
    fn with_field(&self, name: &str, value: FieldValue) -> Entry {
        let entry = self.0;
        entry.rebuild(
            entry.inner.context.clone(),
            entry.inner.adapter.with_field(name, value),
            Arc::clone(&entry.inner.base),
            entry.inner.fields.clone(),
        )
    }

    fn entry(&self) -> Entry {
        self.0.clone()
    }
}

struct EntryState {
    context: Context,
    adapter: Arc<dyn Adapter>,
    base: Arc<dyn Adapter>,
    fields: Fields,
    registry: Registry,
    exit: Option<ExitHook>,
    discard: bool,
}

/// A context-bound, field-enriched handle used to emit log lines.
#[derive(Clone)]
pub struct Entry {
    inner: Arc<EntryState>,
}

impl Entry {
    pub(crate) fn root(
        context: Context,
        adapter: Arc<dyn Adapter>,
        registry: Registry,
        exit: Option<ExitHook>,
    ) -> Self {
        Self {
            inner: Arc::new(EntryState {
                context,
                base: Arc::clone(&adapter),
                adapter,
                fields: Fields::new(),
                registry,
                exit,
                discard: false,
            }),
        }
    }

    pub(crate) fn discarding() -> Self {
        Self {
            inner: Arc::new(EntryState {
                context: Context::background(),
                adapter: NulAdapter::shared(),
                base: NulAdapter::shared(),
                fields: Fields::new(),
                registry: Registry::new(),
                exit: None,
                discard: true,
            }),
        }
    }

    fn rebuild(
        &self,
        context: Context,
        adapter: Arc<dyn Adapter>,
        base: Arc<dyn Adapter>,
        fields: Fields,
    ) -> Self {
        Self {
            inner: Arc::new(EntryState {
                context,
                adapter,
                base,
                fields,
                registry: self.inner.registry.clone(),
                exit: self.inner.exit.clone(),
                discard: self.inner.discard,
            }),
        }
    }

    pub(crate) const fn as_enricher(&self) -> Draft<'_> {
        Draft(self)
    }

    /// The bound context.
    #[must_use]
    pub fn context(&self) -> &Context {
        &self.inner.context
    }

    /// The embedded adapter, carrying every field applied so far.
    #[must_use]
    pub fn adapter(&self) -> &Arc<dyn Adapter> {
        &self.inner.adapter
    }

    /// Fields added through [`Entry::with_field`].
    #[must_use]
    pub fn fields(&self) -> &Fields {
        &self.inner.fields
    }

    /// The enrichment registry used for derivation.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.inner.registry
    }

    /// Returns true when both handles are the same entry.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Returns true for entries of the no-op logger.
    #[must_use]
    pub fn is_discarding(&self) -> bool {
        self.inner.discard
    }

    fn derive(&self, context: &Context) -> Self {
        if self.inner.discard {
            return self.clone();
        }
        let draft = self.rebuild(
            context.clone(),
            self.inner.base.new_entry(),
            Arc::clone(&self.inner.base),
            self.inner.fields.clone(),
        );
        let enriched = self.inner.registry.enrich(context, draft);
        if self.inner.fields.is_empty() {
            return enriched;
        }

        let layer = |start: &Arc<dyn Adapter>| {
            self.inner
                .fields
                .iter()
                .fold(Arc::clone(start), |adapter, (name, value)| {
                    adapter.with_field(name, value.clone())
                })
        };
        let adapter = layer(&enriched.inner.adapter);
        // A substituted entry brings its own base; ours already holds the fields.
        let base = if Arc::ptr_eq(&enriched.inner.base, &self.inner.base) {
            Arc::clone(&self.inner.base)
        } else {
            layer(&enriched.inner.base)
        };
        let fields = self
            .inner
            .fields
            .iter()
            .fold(enriched.inner.fields.clone(), |fields, (name, value)| {
                merged_fields(&fields, name, value.clone())
            });
        enriched.rebuild(enriched.inner.context.clone(), adapter, base, fields)
    }

    /// Derive a new entry bound to `context`, running the enrichment pipeline.
    #[must_use]
    pub fn with_context(&self, context: &Context) -> Self {
        self.derive(context)
    }

    /// Derive a new entry bound to this entry's context.
    #[must_use]
    pub fn new_entry(&self) -> Self {
        self.derive(&self.inner.context)
    }

    /// A new entry with one more field.
    ///
    /// The field is applied to the adapter immediately and re-applied after
    /// the enrichment pipeline on every later derivation.
    #[must_use]
    pub fn with_field(&self, name: &str, value: impl Into<FieldValue>) -> Self {
        if self.inner.discard {
            return self.clone();
        }
        let value = value.into();
        self.rebuild(
            self.inner.context.clone(),
            self.inner.adapter.with_field(name, value.clone()),
            self.inner.base.with_field(name, value.clone()),
            merged_fields(&self.inner.fields, name, value),
        )
    }

    /// The context recovered from the first error whose attached context
    /// differs from this entry's context, if any.
    fn context_from_errors(&self, errors: &[&(dyn Error + 'static)]) -> Option<Context> {
        errors
            .iter()
            .map(|error| recover(&self.inner.context, *error))
            .find(|context| !context.same(&self.inner.context))
    }

    /// Select the entry to log `errors` with.
    ///
    /// Errors are inspected in order. The first one carrying a context other
    /// than this entry's own yields an entry derived from that context; later
    /// errors are ignored. Without such an error the receiver is returned.
    #[must_use]
    pub fn entry_from_errors(&self, errors: &[&(dyn Error + 'static)]) -> Self {
        self.context_from_errors(errors)
            .map_or_else(|| self.clone(), |context| self.derive(&context))
    }

    fn emit_in(&self, context: &Context, level: Level, message: &str) {
        if self.inner.discard {
            return;
        }
        self.derive(context).inner.adapter.emit(level, message);
    }

    fn emit_formatted(
        &self,
        level: Level,
        errors: &[&(dyn Error + 'static)],
        args: fmt::Arguments<'_>,
    ) {
        if self.inner.discard {
            return;
        }
        let context = self
            .context_from_errors(errors)
            .unwrap_or_else(|| self.inner.context.clone());
        self.emit_in(&context, level, &fmt::format(args));
    }

    /// Invoke this entry's termination hook, or the process-wide one.
    pub fn exit(&self, code: i32) {
        match &self.inner.exit {
            Some(hook) => hook(code),
            None => exit::exit(code),
        }
    }

    /// Emit `message` at Trace level.
    pub fn trace(&self, message: &str) {
        self.emit_in(&self.inner.context, Level::Trace, message);
    }

    /// Emit `message` at Debug level.
    pub fn debug(&self, message: &str) {
        self.emit_in(&self.inner.context, Level::Debug, message);
    }

    /// Emit `message` at Info level.
    pub fn info(&self, message: &str) {
        self.emit_in(&self.inner.context, Level::Info, message);
    }

    /// Emit `message` at Warn level.
    pub fn warn(&self, message: &str) {
        self.emit_in(&self.inner.context, Level::Warn, message);
    }

    /// Emit `error`'s message at Error level.
    ///
    /// The entry is always derived from the context attached to `error`,
    /// falling back to this entry's context.
    pub fn error(&self, error: &(dyn Error + 'static)) {
        let context = recover(&self.inner.context, error);
        self.emit_in(&context, Level::Error, &error.to_string());
    }

    /// Emit any displayable value at Error level.
    pub fn error_msg(&self, message: impl fmt::Display) {
        self.emit_in(&self.inner.context, Level::Error, &message.to_string());
    }

    /// Emit `message` at Fatal level, then terminate with code 1.
    pub fn fatal(&self, message: &str) {
        self.emit_in(&self.inner.context, Level::Fatal, message);
        self.exit(1);
    }

    /// Emit `error`'s message at Fatal level from its attached context, then
    /// terminate with code 1.
    pub fn fatal_error(&self, error: &(dyn Error + 'static)) {
        let context = recover(&self.inner.context, error);
        self.emit_in(&context, Level::Fatal, &error.to_string());
        self.exit(1);
    }

    /// Formatted Trace. See [`tracef!`](crate::tracef).
    pub fn tracef(&self, errors: &[&(dyn Error + 'static)], args: fmt::Arguments<'_>) {
        self.emit_formatted(Level::Trace, errors, args);
    }

    /// Formatted Debug. See [`debugf!`](crate::debugf).
    pub fn debugf(&self, errors: &[&(dyn Error + 'static)], args: fmt::Arguments<'_>) {
        self.emit_formatted(Level::Debug, errors, args);
    }

    /// Formatted Info. See [`infof!`](crate::infof).
    pub fn infof(&self, errors: &[&(dyn Error + 'static)], args: fmt::Arguments<'_>) {
        self.emit_formatted(Level::Info, errors, args);
    }

    /// Formatted Warn. See [`warnf!`](crate::warnf).
    pub fn warnf(&self, errors: &[&(dyn Error + 'static)], args: fmt::Arguments<'_>) {
        self.emit_formatted(Level::Warn, errors, args);
    }

    /// Formatted Error, enriched from the first error in `errors` that
    /// carries a different context. See [`errorf!`](crate::errorf).
    pub fn errorf(&self, errors: &[&(dyn Error + 'static)], args: fmt::Arguments<'_>) {
        self.emit_formatted(Level::Error, errors, args);
    }

    /// Formatted Fatal followed by termination with code 1.
    /// See [`fatalf!`](crate::fatalf).
    pub fn fatalf(&self, errors: &[&(dyn Error + 'static)], args: fmt::Arguments<'_>) {
        self.emit_formatted(Level::Fatal, errors, args);
        self.exit(1);
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Entry")
            .field("context", &self.inner.context)
            .field("fields", &self.inner.fields)
            .field("discard", &self.inner.discard)
            .finish_non_exhaustive()
    }
}
