//! # ctxlog-testkit
//!
//! Test doubles for the logging core: a recording [`Adapter`](ctxlog_ports::Adapter),
//! an exit-hook recorder, and context fixtures.
//! This crate depends on `ports` and `shared`.

pub mod errors;
pub mod exit;
pub mod recording;

pub use errors::{error_in, plain_error, request_context};
pub use exit::{ExitCall, ExitRecorder};
pub use recording::{Emission, RecordingAdapter};

/// Returns the testkit crate version.
#[must_use]
pub const fn testkit_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
