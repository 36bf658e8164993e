//! Window file writer
//!
//! Indices are fixed before any file is written, so the sequential and the
//! concurrent path produce identical output regardless of completion order.

use futures::stream::{self, StreamExt};
use indicatif::ProgressBar;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::format::write_readings;
use crate::app::models::RetainedWindow;
use crate::config::OutputConfig;
use crate::{Error, Result};

/// Writes retained windows to `<directory>/<template with index>`
#[derive(Debug, Clone)]
pub struct WindowWriter {
    output: OutputConfig,
    scale: f64,
}

impl WindowWriter {
    pub fn new(output: OutputConfig, scale: f64) -> Self {
        Self { output, scale }
    }

    /// Target path for a window
    pub fn path_for(&self, window: &RetainedWindow) -> PathBuf {
        self.output.window_path(window.index)
    }

    /// Write one window file and return its path
    ///
    /// A partially written file is removed before the error is returned.
    pub fn write(&self, window: &RetainedWindow) -> Result<PathBuf> {
        let path = self.path_for(window);
        let file = self.create(&path)?;

        let mut out = BufWriter::new(file);
        let written =
            write_readings(&mut out, &window.readings, self.scale).and_then(|_| out.flush());

        if let Err(e) = written {
            if let Err(remove_err) = std::fs::remove_file(&path) {
                warn!("Could not remove partial file {}: {}", path.display(), remove_err);
            }
            return Err(Error::io(
                format!("Failed to write window file {}", path.display()),
                e,
            ));
        }

        debug!(
            "Wrote window {} ({} readings) to {}",
            window.index,
            window.readings.len(),
            path.display()
        );
        Ok(path)
    }

    /// Write windows one after another in index order
    ///
    /// `cancel` is checked before each window; a window already being
    /// written is finished first.
    pub fn write_all(
        &self,
        windows: &[RetainedWindow],
        cancel: &CancellationToken,
    ) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(windows.len());

        for window in windows {
            if cancel.is_cancelled() {
                self.cleanup(&written);
                return Err(interrupted(written.len(), windows.len()));
            }
            match self.write(window) {
                Ok(path) => written.push(path),
                Err(e) => {
                    self.cleanup(&written);
                    return Err(e);
                }
            }
        }

        info!("Wrote {} window files", written.len());
        Ok(written)
    }

    /// Write windows with at most `workers` files in flight
    ///
    /// All writes are allowed to settle before an error is reported, so a
    /// failed or cancelled run never leaves a writer running behind the
    /// cleanup. Once `cancel` fires no further window is started.
    pub async fn write_all_concurrent(
        self: Arc<Self>,
        windows: Vec<RetainedWindow>,
        workers: usize,
        progress: Option<ProgressBar>,
        cancel: CancellationToken,
    ) -> Result<Vec<PathBuf>> {
        let workers = workers.max(1);
        let total = windows.len();

        let results: Vec<(usize, Option<Result<PathBuf>>)> = stream::iter(windows)
            .map(|window| {
                let writer = Arc::clone(&self);
                let progress = progress.clone();
                let cancel = cancel.clone();
                async move {
                    let index = window.index;
                    if cancel.is_cancelled() {
                        return (index, None);
                    }
                    let result = task::spawn_blocking(move || writer.write(&window))
                        .await
                        .unwrap_or_else(|e| {
                            Err(Error::io(
                                format!("Write task for window {} failed", index),
                                std::io::Error::other(e.to_string()),
                            ))
                        });
                    if let Some(pb) = &progress {
                        pb.inc(1);
                    }
                    (index, Some(result))
                }
            })
            .buffer_unordered(workers)
            .collect()
            .await;

        let mut results = results;
        results.sort_by_key(|(index, _)| *index);

        let mut written = Vec::with_capacity(results.len());
        let mut first_error = None;
        let mut skipped = 0usize;
        for (_, result) in results {
            match result {
                Some(Ok(path)) => written.push(path),
                Some(Err(e)) if first_error.is_none() => first_error = Some(e),
                Some(Err(e)) => debug!("Additional write failure: {}", e),
                None => skipped += 1,
            }
        }

        if let Some(e) = first_error {
            self.cleanup(&written);
            return Err(e);
        }
        if skipped > 0 {
            self.cleanup(&written);
            return Err(interrupted(written.len(), total));
        }

        info!(
            "Wrote {} window files with {} workers",
            written.len(),
            workers
        );
        Ok(written)
    }

    fn create(&self, path: &Path) -> Result<File> {
        let opened = if self.output.overwrite_existing {
            File::create(path)
        } else {
            OpenOptions::new().write(true).create_new(true).open(path)
        };

        opened.map_err(|e| {
            let message = if e.kind() == std::io::ErrorKind::AlreadyExists {
                format!(
                    "Output file {} already exists (use --force to overwrite)",
                    path.display()
                )
            } else {
                format!("Failed to create window file {}", path.display())
            };
            Error::io(message, e)
        })
    }

    /// Remove files written by this run if the policy asks for it
    fn cleanup(&self, written: &[PathBuf]) {
        if !self.output.cleanup_on_error {
            warn!(
                "Leaving {} window files from the failed run in place",
                written.len()
            );
            return;
        }

        for path in written {
            if let Err(e) = std::fs::remove_file(path) {
                warn!("Could not remove {}: {}", path.display(), e);
            }
        }
        info!("Removed {} window files from the failed run", written.len());
    }
}

fn interrupted(completed: usize, total: usize) -> Error {
    Error::processing_interrupted(format!(
        "Cancelled after {} of {} window files",
        completed, total
    ))
}
