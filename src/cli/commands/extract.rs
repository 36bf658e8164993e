//! Extract command implementation

use colored::*;
use tokio::task;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::shared::{create_progress_bar, load_configuration, print_summary};
use crate::app::models::ExtractionSummary;
use crate::app::services::extractor::SeasonalChunkExtractor;
use crate::cli::args::ExtractArgs;
use crate::{Error, Result};

/// Run the extract command
///
/// Cancelling `cancellation_token` stops new window files from being started;
/// the run then reports `ProcessingInterrupted`.
pub async fn run_extract(
    args: ExtractArgs,
    cancellation_token: CancellationToken,
) -> Result<ExtractionSummary> {
    args.input.validate()?;

    let config = load_configuration(&args.input, |config| args.apply_overrides(config))?;
    info!(
        "Extracting months {:?} from {} in windows of {} readings",
        config.extraction.season_months,
        args.input.source.display(),
        config.extraction.window_length
    );

    let extractor = SeasonalChunkExtractor::new(&args.input.source, config)?
        .with_cancellation(cancellation_token);

    if args.dry_run {
        return dry_run(extractor).await;
    }

    let summary = if args.sequential {
        task::spawn_blocking(move || extractor.extract())
            .await
            .map_err(|e| {
                Error::processing_interrupted(format!("Extraction task failed: {}", e))
            })??
    } else {
        let progress = args
            .show_progress()
            .then(|| create_progress_bar("Writing windows"));
        let summary = extractor.extract_concurrent(progress.clone()).await?;
        if let Some(pb) = progress {
            pb.finish_with_message("Done");
        }
        summary
    };

    if !args.input.quiet {
        print_summary("Extraction complete", &summary, true);
        let files = &summary.files_written;
        if let (Some(first), Some(last)) = (files.first(), files.last()) {
            println!(
                "  {} {} .. {}",
                "Output:".bright_cyan(),
                first.display(),
                last.display()
            );
        }
    }

    Ok(summary)
}

/// Plan the extraction and list the files it would create
async fn dry_run(extractor: SeasonalChunkExtractor) -> Result<ExtractionSummary> {
    let planner = extractor.clone();
    let plan = task::spawn_blocking(move || planner.plan())
        .await
        .map_err(|e| Error::processing_interrupted(format!("Planning task failed: {}", e)))??;

    println!("{}", "Dry run: no files will be written".yellow().bold());
    for window in &plan.windows {
        println!(
            "  {} ({} readings)",
            extractor.config().output.window_path(window.index).display(),
            window.readings.len()
        );
    }
    print_summary("Dry run summary", &plan.summary, false);

    Ok(plan.summary)
}
