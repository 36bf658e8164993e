//! Window validation and dense index assignment

use tracing::{debug, trace};

use crate::app::models::{
    ExtractionSummary, RetainedWindow, Window, WindowRejection, WindowReport, WindowVerdict,
};

/// Decides which windows are emitted
#[derive(Debug, Clone, Copy)]
pub struct WindowValidator {
    window_length: usize,
}

impl WindowValidator {
    pub fn new(window_length: usize) -> Self {
        Self { window_length }
    }

    /// Reason to drop `window`, or `None` if it may be emitted
    ///
    /// A window is kept only if it holds exactly `window_length` readings,
    /// none of them carries the sentinel, and its first-to-last span is
    /// exactly `window_length - 1` minutes.
    pub fn check(&self, window: &Window) -> Option<WindowRejection> {
        if window.len() != self.window_length {
            return Some(WindowRejection::Incomplete {
                len: window.len(),
                expected: self.window_length,
            });
        }

        if let Some(offset) = window.readings.iter().position(|r| r.has_missing_data()) {
            return Some(WindowRejection::MissingData { offset });
        }

        let expected = self.window_length as i64 - 1;
        let elapsed_minutes = window.elapsed_minutes().unwrap_or_default();
        if elapsed_minutes != expected {
            return Some(WindowRejection::Gap {
                elapsed_minutes,
                expected,
            });
        }

        None
    }

    /// Validate windows in order, numbering the retained ones 1, 2, 3, ...
    ///
    /// Rejected windows consume no index, so output numbering is gap-free.
    pub fn select<I>(
        &self,
        windows: I,
        summary: &mut ExtractionSummary,
    ) -> (Vec<RetainedWindow>, Vec<WindowReport>)
    where
        I: IntoIterator<Item = Window>,
    {
        let mut retained = Vec::new();
        let mut reports = Vec::new();

        for window in windows {
            summary.windows_considered += 1;
            let (start, end, len) = (window.start(), window.end(), window.len());

            let verdict = match self.check(&window) {
                Some(rejection) => {
                    debug!("Dropping window {}: {}", window.ordinal, rejection);
                    summary.record_rejection(&rejection);
                    WindowVerdict::Rejected { rejection }
                }
                None => {
                    let index = retained.len() + 1;
                    trace!("Window {} retained as index {}", window.ordinal, index);
                    retained.push(RetainedWindow {
                        index,
                        ordinal: window.ordinal,
                        readings: window.readings,
                    });
                    WindowVerdict::Retained { index }
                }
            };

            reports.push(WindowReport {
                ordinal: window.ordinal,
                start,
                end,
                len,
                verdict,
            });
        }

        summary.windows_retained = retained.len();
        (retained, reports)
    }
}
