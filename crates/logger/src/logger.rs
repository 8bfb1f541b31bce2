//! Long-lived root bindings of an adapter to a context.

use crate::exit::ExitHook;
use crate::{Entry, Registry};
use ctxlog_ports::Adapter;
use ctxlog_shared::Context;
use std::ops::Deref;
use std::sync::{Arc, LazyLock};

/// A root [`Entry`]: an adapter bound to an initial context.
///
/// A logger is created once per adapter binding and shared by cloning. It
/// dereferences to its root entry, so every level method is available on the
/// logger itself.
#[derive(Clone, Debug)]
pub struct Logger {
    root: Entry,
}

static NUL: LazyLock<Logger> = LazyLock::new(|| Logger {
    root: Entry::discarding(),
});

impl Logger {
    /// A logger bound to `context`, enriched by the global registry.
    #[must_use]
    pub fn using_adapter(context: &Context, adapter: Arc<dyn Adapter>) -> Self {
        Self::builder(adapter).context(context.clone()).build()
    }

    /// Start building a logger around `adapter`.
    #[must_use]
    pub fn builder(adapter: Arc<dyn Adapter>) -> LoggerBuilder {
        LoggerBuilder {
            adapter,
            context: Context::background(),
            registry: None,
            exit: None,
        }
    }

    /// The shared no-op logger.
    ///
    /// It never emits and returns itself from every derivation. Fatal paths
    /// still call the process-wide exit hook.
    #[must_use]
    pub fn nul() -> Self {
        NUL.clone()
    }

    /// The root entry.
    #[must_use]
    pub const fn root(&self) -> &Entry {
        &self.root
    }
}

impl Deref for Logger {
    type Target = Entry;

    fn deref(&self) -> &Entry {
        &self.root
    }
}

/// Builder for [`Logger`].
#[must_use]
pub struct LoggerBuilder {
    adapter: Arc<dyn Adapter>,
    context: Context,
    registry: Option<Registry>,
    exit: Option<ExitHook>,
}

impl LoggerBuilder {
    /// Root context (defaults to [`Context::background`]).
    pub fn context(mut self, context: Context) -> Self {
        self.context = context;
        self
    }

    /// Enrichment registry (defaults to [`Registry::global`]).
    pub fn registry(mut self, registry: Registry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Termination hook for this logger's Fatal paths, replacing the
    /// process-wide one.
    pub fn exit_hook(mut self, hook: impl Fn(i32) + Send + Sync + 'static) -> Self {
        self.exit = Some(Arc::new(hook));
        self
    }

    /// Finish the logger.
    pub fn build(self) -> Logger {
        let registry = self.registry.unwrap_or_else(Registry::global);
        Logger {
            root: Entry::root(self.context, self.adapter, registry, self.exit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctxlog_testkit::{RecordingAdapter, request_context};

    #[test]
    fn builder_defaults_to_background_and_global_registry() {
        let logger = Logger::builder(RecordingAdapter::new().adapter()).build();

        assert!(logger.context().same(&Context::background()));
        assert!(logger.registry().same(&Registry::global()));
    }

    #[test]
    fn using_adapter_binds_the_context() {
        let context = request_context("req_root");
        let logger = Logger::using_adapter(&context, RecordingAdapter::new().adapter());

        assert!(logger.context().same(&context));
    }

    #[test]
    fn nul_returns_itself_from_every_derivation() {
        let logger = Logger::nul();
        let entry = logger.new_entry();
        let rebound = entry.with_context(&request_context("req_x"));
        let tagged = rebound.with_field("k", 1);

        assert!(entry.ptr_eq(logger.root()));
        assert!(rebound.ptr_eq(&entry));
        assert!(tagged.ptr_eq(&entry));
        assert!(Logger::nul().root().ptr_eq(logger.root()));
    }
}
