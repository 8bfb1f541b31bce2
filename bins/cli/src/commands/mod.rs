//! CLI command handlers.

pub mod config;
pub mod emit;

pub use config::{ConfigOutput, run_config};
pub use emit::{EmitArgs, run_emit};
