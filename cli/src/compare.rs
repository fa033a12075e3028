#![deny(missing_docs)]

//! # Compare Command
//!
//! Fetches two documents, prints the breaking changes between them and
//! turns the outcome into an exit code.

use std::io::Write;
use std::process::ExitCode;
use std::time::Duration;

use specguard_core::{compare_sources, DifferenceCase, DocumentFetcher, SourceLocator};
use tracing::info;

use crate::error::CliResult;

/// Output format of the findings.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// A JSON array of findings.
    Json,
    /// One finding per line.
    Text,
}

/// Arguments for the compare command.
#[derive(clap::Args, Debug, Clone)]
pub struct CompareArgs {
    /// The baseline document (URL or file path).
    #[clap(long, env = "SPECGUARD_OLD")]
    pub old: String,

    /// The candidate document (URL or file path).
    #[clap(long, env = "SPECGUARD_NEW")]
    pub new: String,

    /// How findings are printed on stdout.
    #[clap(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Timeout for each HTTP fetch, in seconds.
    #[clap(long, env = "SPECGUARD_TIMEOUT", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Exit successfully even when breaking changes are found.
    #[clap(long)]
    pub no_fail: bool,
}

/// The fetcher available in this build.
pub fn default_fetcher(timeout: Duration) -> Box<dyn DocumentFetcher + Send + Sync> {
    #[cfg(feature = "client")]
    {
        Box::new(crate::fetch::HttpFetcher::new(timeout))
    }
    #[cfg(not(feature = "client"))]
    {
        let _ = timeout;
        Box::new(specguard_core::FileFetcher)
    }
}

/// Writes findings in the requested format.
pub fn render(
    cases: &[DifferenceCase],
    format: OutputFormat,
    out: &mut impl Write,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, cases)?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            if cases.is_empty() {
                writeln!(out, "No breaking changes detected.")?;
            }
            for case in cases {
                writeln!(out, "{}", case)?;
            }
        }
    }
    Ok(())
}

/// Executes the comparison.
///
/// # Arguments
///
/// * `args` - Command arguments.
/// * `fetcher` - Retrieves both documents.
pub fn execute(args: &CompareArgs, fetcher: &(dyn DocumentFetcher + Sync)) -> CliResult<ExitCode> {
    let old: SourceLocator = args.old.parse()?;
    let new: SourceLocator = args.new.parse()?;

    let cases = compare_sources(fetcher, &old, &new)?;
    info!(%old, %new, findings = cases.len(), "compare finished");

    let stdout = std::io::stdout();
    render(&cases, args.format, &mut stdout.lock())?;

    if cases.is_empty() || args.no_fail {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
