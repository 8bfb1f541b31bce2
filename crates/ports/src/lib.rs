//! # ctxlog-ports
//!
//! Port contracts for the ctxlog hexagonal architecture.
//!
//! This crate defines the boundary between the logging core and concrete
//! backends: the [`Level`] enumeration and the [`Adapter`] trait. It depends
//! only on `shared`.

/// Returns the ports crate version.
#[must_use]
pub const fn ports_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub mod adapter;
pub mod level;

pub use adapter::*;
pub use level::*;
