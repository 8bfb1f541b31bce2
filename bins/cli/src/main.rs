//! CLI binary entrypoint.

mod commands;
mod error;

use clap::{Parser, Subcommand};
use commands::{ConfigOutput, EmitArgs, run_config, run_emit};
use ctxlog_ports::Level;
use error::{CliError, ExitCode};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "ctxlog",
    version,
    about = "Context-enriched logging CLI",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Emit one line through the configured adapter.
    Emit(EmitArgs),
    /// Print the effective logging configuration.
    Config {
        /// Optional config file path (JSON/TOML).
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output serialization.
        #[arg(long, value_enum, default_value_t)]
        output: ConfigOutput,
    },
}

pub(crate) struct CliOutput {
    stdout: String,
    exit_code: ExitCode,
}

impl CliOutput {
    const fn empty() -> Self {
        Self {
            stdout: String::new(),
            exit_code: ExitCode::Ok,
        }
    }

    const fn stdout(stdout: String) -> Self {
        Self {
            stdout,
            exit_code: ExitCode::Ok,
        }
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    match run(&cli.command) {
        Ok(output) => match write_output(&output) {
            Ok(()) => std::process::ExitCode::from(output.exit_code.as_u8()),
            Err(error) => exit_with_error(&error),
        },
        Err(error) => exit_with_error(&error),
    }
}

fn exit_with_error(error: &CliError) -> std::process::ExitCode {
    let _ = writeln!(io::stderr(), "error: {error}");
    std::process::ExitCode::from(error.exit_code().as_u8())
}

fn run(command: &Commands) -> Result<CliOutput, CliError> {
    match command {
        Commands::Emit(args) => run_emit(args),
        Commands::Config { config, output } => run_config(config.as_deref(), *output),
    }
}

/// Install a stderr `tracing` subscriber; `RUST_LOG` overrides `level`.
pub(crate) fn init_tracing(level: Level) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing_directive(level)));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
    if let Err(error) = installed {
        let _ = writeln!(io::stderr(), "tracing subscriber not installed: {error}");
    }
}

const fn tracing_directive(level: Level) -> &'static str {
    match level {
        Level::Fatal | Level::Error => "error",
        Level::Warn => "warn",
        Level::Info => "info",
        Level::Debug => "debug",
        Level::Trace => "trace",
    }
}

fn write_output(output: &CliOutput) -> Result<(), CliError> {
    let mut stdout = io::stdout();
    stdout.write_all(output.stdout.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
