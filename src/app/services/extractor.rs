//! Seasonal chunk extraction pipeline
//!
//! Orchestrates the complete run: stream-parse the load file, keep in-season
//! readings, align to the first day boundary, partition into fixed-length
//! windows, drop invalid windows and write the rest with dense indices.
//!
//! Everything up to the first write is done before any file is created:
//! a malformed row or a missing day boundary therefore aborts the run with
//! no output at all.

use indicatif::ProgressBar;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::task;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::app::models::{ExtractionPlan, ExtractionSummary, Reading};
use crate::app::services::load_parser::LoadCsvReader;
use crate::app::services::season_filter::{Alignment, SeasonFilter, align_to_day_boundary};
use crate::app::services::window_writer::WindowWriter;
use crate::app::services::windowing::{WindowPartitioner, WindowValidator};
use crate::config::Config;
use crate::{Error, Result};

/// Extracts day-aligned seasonal windows from one load file
#[derive(Debug, Clone)]
pub struct SeasonalChunkExtractor {
    source: PathBuf,
    config: Config,
    cancellation_token: CancellationToken,
}

impl SeasonalChunkExtractor {
    /// Create an extractor; the configuration is validated up front
    pub fn new(source: impl Into<PathBuf>, config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            source: source.into(),
            config,
            cancellation_token: CancellationToken::new(),
        })
    }

    /// Stop starting new window files once `token` is cancelled
    ///
    /// Files being written when the token fires are completed, then the
    /// run's files are removed according to `output.cleanup_on_error`.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = token;
        self
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse, filter, align, partition and validate without writing anything
    pub fn plan(&self) -> Result<ExtractionPlan> {
        let start_time = Instant::now();
        let extraction = &self.config.extraction;
        let mut summary = ExtractionSummary::new(&self.source);

        let mut reader = LoadCsvReader::open(&self.source, extraction)?;
        let filter = SeasonFilter::from_config(extraction);

        let aligned: Vec<Reading> = {
            let mut season = filter.filter(reader.by_ref());
            match align_to_day_boundary(&mut season)? {
                Alignment::Aligned { discarded } => {
                    summary.discarded_before_alignment = discarded;
                    season.collect::<Result<Vec<_>>>()?
                }
                Alignment::NoSeasonData => {
                    info!(
                        "No readings in season months {:?}; nothing to extract",
                        extraction.season_months
                    );
                    Vec::new()
                }
                Alignment::NoBoundary { discarded } => {
                    return Err(Error::alignment(
                        self.source.display().to_string(),
                        discarded,
                    ));
                }
            }
        };

        summary.rows_read = reader.rows_read();
        summary.aligned_readings = aligned.len() as u64;
        summary.season_readings = summary.discarded_before_alignment + summary.aligned_readings;
        debug!(
            "{} rows read, {} in season, {} aligned",
            summary.rows_read, summary.season_readings, summary.aligned_readings
        );

        let validator = WindowValidator::new(extraction.window_length);
        let partitioner = WindowPartitioner::new(aligned.into_iter(), extraction.window_length);
        let (windows, reports) = validator.select(partitioner, &mut summary);

        info!(
            "{} of {} windows retained ({} missing data, {} gaps, {} incomplete)",
            summary.windows_retained,
            summary.windows_considered,
            summary.rejected_missing_data,
            summary.rejected_gap,
            summary.rejected_incomplete
        );

        summary.processing_time_ms = start_time.elapsed().as_millis() as u64;
        Ok(ExtractionPlan {
            windows,
            reports,
            summary,
        })
    }

    /// Run the full extraction, writing window files sequentially
    pub fn extract(&self) -> Result<ExtractionSummary> {
        let start_time = Instant::now();
        let plan = self.plan()?;
        self.check_cancelled()?;

        self.config.ensure_output_directory()?;
        let writer = self.writer();
        let files = writer.write_all(&plan.windows, &self.cancellation_token)?;

        let mut summary = plan.summary;
        summary.files_written = files;
        summary.processing_time_ms = start_time.elapsed().as_millis() as u64;
        Ok(summary)
    }

    /// Run the full extraction, writing window files concurrently
    ///
    /// Parsing runs on a blocking thread; writes are bounded by
    /// `performance.workers`. Output is identical to [`Self::extract`].
    pub async fn extract_concurrent(
        &self,
        progress: Option<ProgressBar>,
    ) -> Result<ExtractionSummary> {
        let start_time = Instant::now();

        let planner = self.clone();
        let plan = task::spawn_blocking(move || planner.plan())
            .await
            .map_err(|e| {
                Error::processing_interrupted(format!("Extraction task failed: {}", e))
            })??;
        self.check_cancelled()?;

        self.config.ensure_output_directory()?;
        if let Some(pb) = &progress {
            pb.set_length(plan.windows.len() as u64);
        }

        let writer = Arc::new(self.writer());
        let files = writer
            .write_all_concurrent(
                plan.windows,
                self.config.performance.workers,
                progress,
                self.cancellation_token.clone(),
            )
            .await?;

        let mut summary = plan.summary;
        summary.files_written = files;
        summary.processing_time_ms = start_time.elapsed().as_millis() as u64;
        Ok(summary)
    }

    fn check_cancelled(&self) -> Result<()> {
        if self.cancellation_token.is_cancelled() {
            return Err(Error::processing_interrupted(
                "Cancelled before any window file was written",
            ));
        }
        Ok(())
    }

    fn writer(&self) -> WindowWriter {
        WindowWriter::new(self.config.output.clone(), self.config.extraction.scale)
    }
}
