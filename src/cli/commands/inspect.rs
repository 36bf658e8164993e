//! Inspect command implementation
//!
//! Runs the planning half of an extraction and reports every window's
//! verdict. Nothing is written to the output directory.

use colored::*;
use serde::Serialize;
use tokio::task;

use super::shared::{load_configuration, print_summary};
use crate::app::models::{ExtractionSummary, WindowReport, WindowVerdict};
use crate::app::services::extractor::SeasonalChunkExtractor;
use crate::cli::args::{InspectArgs, OutputFormat};
use crate::{Error, Result};

/// JSON document produced by `inspect --format json`
#[derive(Debug, Serialize)]
pub struct InspectReport<'a> {
    pub summary: &'a ExtractionSummary,
    pub windows: &'a [WindowReport],
}

/// Run the inspect command
pub async fn run_inspect(args: InspectArgs) -> Result<ExtractionSummary> {
    args.input.validate()?;

    let config = load_configuration(&args.input, |config| args.input.apply_overrides(config))?;
    let extractor = SeasonalChunkExtractor::new(&args.input.source, config)?;

    let plan = task::spawn_blocking(move || extractor.plan())
        .await
        .map_err(|e| Error::processing_interrupted(format!("Planning task failed: {}", e)))??;

    match args.output_format {
        OutputFormat::Json => {
            let report = InspectReport {
                summary: &plan.summary,
                windows: &plan.reports,
            };
            let json = serde_json::to_string_pretty(&report).map_err(|e| {
                Error::io("Failed to serialize inspect report", std::io::Error::other(e))
            })?;
            println!("{}", json);
        }
        OutputFormat::Human => {
            println!("{}", "Windows".bright_blue().bold());
            for report in &plan.reports {
                println!("  {}", format_report_line(report));
            }
            print_summary("Inspection summary", &plan.summary, false);
        }
    }

    Ok(plan.summary)
}

/// One table row: ordinal, time span, length and verdict
pub fn format_report_line(report: &WindowReport) -> String {
    let span = match (report.start, report.end) {
        (Some(start), Some(end)) => format!(
            "{} .. {}",
            start.format("%Y-%m-%d %H:%M"),
            end.format("%Y-%m-%d %H:%M")
        ),
        _ => "empty".to_string(),
    };

    let verdict = match &report.verdict {
        WindowVerdict::Retained { index } => format!("retained as #{}", index).green().to_string(),
        WindowVerdict::Rejected { rejection } => {
            format!("rejected: {}", rejection).red().to_string()
        }
    };

    format!(
        "#{:<4} {}  {:>6} readings  {}",
        report.ordinal, span, report.len, verdict
    )
}
