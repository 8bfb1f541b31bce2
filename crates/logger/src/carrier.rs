//! Logger-in-context carrier.
//!
//! A [`Logger`] travels through a call tree inside the [`Context`] value; there
//! is no global fallback. Looking up a context with no bound logger yields
//! `None`.

use crate::{Entry, Logger};
use ctxlog_shared::{Context, ContextKey};

struct LoggerKey;

impl ContextKey for LoggerKey {
    type Value = Logger;
}

/// A child of `context` carrying `logger`.
#[must_use]
pub fn bind(context: &Context, logger: Logger) -> Context {
    context.with_value::<LoggerKey>(logger)
}

/// The logger bound nearest to `context`.
#[must_use]
pub fn logger_from(context: &Context) -> Option<Logger> {
    context.value::<LoggerKey>().cloned()
}

/// An entry derived for `context` from its bound logger.
///
/// Every call runs the enrichment pipeline.
#[must_use]
pub fn entry_from(context: &Context) -> Option<Entry> {
    context
        .value::<LoggerKey>()
        .map(|logger| logger.with_context(context))
}

/// Carrier operations as [`Context`] methods.
pub trait ContextLoggerExt {
    /// See [`bind`].
    #[must_use]
    fn with_logger(&self, logger: Logger) -> Context;

    /// See [`logger_from`].
    fn logger(&self) -> Option<Logger>;

    /// See [`entry_from`].
    fn log(&self) -> Option<Entry>;
}

impl ContextLoggerExt for Context {
    fn with_logger(&self, logger: Logger) -> Context {
        bind(self, logger)
    }

    fn logger(&self) -> Option<Logger> {
        logger_from(self)
    }

    fn log(&self) -> Option<Entry> {
        entry_from(self)
    }
}
