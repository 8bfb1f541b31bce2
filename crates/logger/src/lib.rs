//! # ctxlog-logger
//!
//! The logging core: [`Logger`] and [`Entry`] bind a [`Context`] to an
//! [`Adapter`], derive enriched entries through an ordered enrichment
//! [`Registry`], and recover the context attached to logged errors.
//!
//! ```
//! use ctxlog_logger::{Logger, Registry, correlation_id_enrichment, infof};
//! use ctxlog_shared::{Context, CorrelationId};
//!
//! let registry = Registry::new();
//! registry.register(correlation_id_enrichment());
//! let logger = Logger::builder(ctxlog_logger::NulAdapter::shared())
//!     .registry(registry)
//!     .build();
//!
//! let request = Context::background().with_correlation_id(CorrelationId::new_request_id());
//! let entry = logger.with_context(&request).with_field("route", "/upload");
//! infof!(entry, "stored {} bytes", 512);
//! ```
//!
//! This crate depends on `ports` and `shared`.
//!
//! [`Context`]: ctxlog_shared::Context
//! [`Adapter`]: ctxlog_ports::Adapter

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![cfg_attr(test, allow(clippy::expect_used, reason = "tests assert via expect"))]
#![cfg_attr(test, allow(clippy::indexing_slicing, reason = "tests index recorded calls"))]

pub mod carrier;
pub mod enrichment;
pub mod entry;
pub mod exit;
pub mod logger;
pub mod macros;
pub mod nul;

#[doc(hidden)]
pub use macros::__private;

pub use carrier::{ContextLoggerExt, bind, entry_from, logger_from};
pub use enrichment::{
    CORRELATION_ID_FIELD, EnrichmentFn, Registry, correlation_id_enrichment, register_enrichment,
};
pub use entry::{Enricher, Entry};
pub use exit::{ExitHook, reset_exit_hook, set_exit_hook};
pub use logger::{Logger, LoggerBuilder};
pub use nul::NulAdapter;

/// Returns the logger crate version.
#[must_use]
pub const fn logger_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
