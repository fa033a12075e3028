#![deny(missing_docs)]

//! # Specguard CLI
//!
//! Detects breaking changes between two OpenAPI documents.
//!
//! Supported Commands:
//! - `compare`: Prints the findings and fails when there are any.
//! - `serve`: Exposes the comparison over HTTP (feature `server`).

use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::error;

use crate::error::CliResult;
use crate::logging::LogFormat;

mod compare;
mod error;
#[cfg(feature = "client")]
mod fetch;
mod logging;
#[cfg(feature = "server")]
mod serve;

#[derive(Parser, Debug)]
#[clap(author, version, about = "OpenAPI breaking-change detector")]
struct Cli {
    /// Format of the log lines written to stderr.
    #[clap(long, global = true, value_enum, env = "SPECGUARD_LOG_FORMAT", default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compare two documents and report breaking changes.
    Compare(compare::CompareArgs),
    /// Serve comparisons over HTTP.
    #[cfg(feature = "server")]
    Serve(serve::ServeArgs),
}

fn run(cli: &Cli) -> CliResult<ExitCode> {
    match &cli.command {
        Commands::Compare(args) => {
            let fetcher = compare::default_fetcher(Duration::from_secs(args.timeout_secs));
            compare::execute(args, &*fetcher)
        }
        #[cfg(feature = "server")]
        Commands::Serve(args) => {
            let fetcher = compare::default_fetcher(Duration::from_secs(args.timeout_secs));
            serve::execute(args, fetcher.into())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Maps the outcome of a run to the process exit code.
///
/// Failures are reported once, through the log on stderr.
fn finish(outcome: CliResult<ExitCode>) -> ExitCode {
    match outcome {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "specguard failed");
            ExitCode::from(2)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.log_format);
    finish(run(&cli))
}
