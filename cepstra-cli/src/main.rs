//! CLI entry point for the cepstra report converter.
//!
//! Parses command-line arguments with clap, streams the input report into
//! the output file, echoes word names to stdout, and maps errors to exit
//! codes. Logging is initialised first so every later step can emit
//! structured diagnostics via `tracing` on stderr.

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use cepstra_cli::{
    cli::{Cli, CliError, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, field};

/// Parse CLI arguments, run the conversion, and flush the word echo.
fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let mut status = io::stdout().lock();
    run_cli(cli, &mut status).context("failed to convert report")?;
    status.flush().context("failed to flush word echo")?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        let code = err.downcast_ref::<CliError>().and_then(CliError::code);
        let message = format!("{err:#}");
        error!(
            error = %message,
            code = code.map(field::display),
            "conversion failed"
        );
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[expect(
    clippy::print_stderr,
    reason = "Emit one-off diagnostic before tracing is initialized"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
