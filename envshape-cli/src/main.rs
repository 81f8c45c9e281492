//! CLI entrypoint for `envshape`.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use envshape::EnvRecord;
use envshape::template::FileSink;
use envshape_cli::cli::Args;
use envshape_cli::commands;
use envshape_cli::error::CliError;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the tracing filter directives.
const LOG_ENV: &str = "ENVSHAPE_LOG";

fn main() -> ExitCode {
    let Err(err) = run() else {
        return ExitCode::SUCCESS;
    };
    if writeln!(io::stderr().lock(), "envshape: {err}").is_err() {
        return ExitCode::from(2);
    }
    ExitCode::FAILURE
}

fn run() -> Result<(), CliError> {
    let args = Args::parse();
    init_tracing()?;

    let env = EnvRecord::from_process_env();
    let mut stdout = io::stdout().lock();
    commands::run(&args, &env, &mut FileSink, &mut stdout)
}

fn init_tracing() -> Result<(), CliError> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
