//! Command implementations for the seasonal chunker CLI
//!
//! Each command is implemented in its own module:
//! - `extract`: Full extraction with window file output
//! - `inspect`: Per-window verdict report without output
//! - `shared`: Logging, configuration loading and reporting helpers

pub mod extract;
pub mod inspect;
pub mod shared;

use tokio_util::sync::CancellationToken;

use crate::Result;
use crate::app::models::ExtractionSummary;
use crate::cli::args::Commands;

/// Dispatch to the subcommand handler
pub async fn run(
    command: Commands,
    cancellation_token: CancellationToken,
) -> Result<ExtractionSummary> {
    match command {
        Commands::Extract(extract_args) => {
            extract::run_extract(extract_args, cancellation_token).await
        }
        Commands::Inspect(inspect_args) => inspect::run_inspect(inspect_args).await,
    }
}
