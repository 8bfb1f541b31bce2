//! # ctxlog-shared
//!
//! Foundational types used by every other ctxlog crate:
//!
//! - [`Context`]: the immutable value chain a log entry is bound to
//! - [`attach`] / [`recover`]: carry a context inside an error value
//! - [`ErrorEnvelope`]: structured errors for the construction surfaces
//! - secret-key detection for field redaction
//!
//! This crate has no workspace dependencies.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![cfg_attr(test, allow(clippy::expect_used, reason = "tests assert via expect"))]

pub mod context;
pub mod error_context;
pub mod errors;
pub mod redaction;

pub use context::{Context, ContextKey, CorrelationId, CorrelationIdKey};
pub use error_context::{AttachContext, BoxError, ContextError, attach, recover};
pub use errors::{ErrorCode, ErrorEnvelope, ErrorKind, ErrorMetadata};
pub use redaction::{REDACTED, is_secret_key};

/// Returns the shared crate version.
#[must_use]
pub const fn shared_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_crate_version_is_set() {
        assert!(!shared_crate_version().is_empty());
    }
}
