//! Data models for seasonal load extraction
//!
//! This module contains the core data structures for representing timestamped
//! load readings, the fixed-length windows they are partitioned into, and the
//! verdicts and statistics produced while deciding which windows to emit.

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::constants::DAY_BOUNDARY_HMS;

// =============================================================================
// Reading
// =============================================================================

/// A single power measurement, or the marker that it was not recorded
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PowerValue {
    /// Value as recorded in source units
    Measured(f64),
    /// Source carried the missing-data sentinel
    Missing,
}

impl PowerValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, PowerValue::Missing)
    }

    /// Recorded value, if any
    pub fn value(&self) -> Option<f64> {
        match self {
            PowerValue::Measured(v) => Some(*v),
            PowerValue::Missing => None,
        }
    }

    /// Recorded value multiplied by `scale`, if any
    pub fn scaled(&self, scale: f64) -> Option<f64> {
        self.value().map(|v| v * scale)
    }
}

/// One timestamped active/reactive power sample
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    /// Local wall-clock time of the sample
    pub timestamp: NaiveDateTime,

    /// Active power in source units
    pub active_power: PowerValue,

    /// Reactive power in source units
    pub reactive_power: PowerValue,

    /// 1-based line number in the source file
    pub line: u64,
}

impl Reading {
    pub fn new(
        timestamp: NaiveDateTime,
        active_power: PowerValue,
        reactive_power: PowerValue,
        line: u64,
    ) -> Self {
        Self {
            timestamp,
            active_power,
            reactive_power,
            line,
        }
    }

    /// Calendar month (1-12) of the sample
    pub fn month(&self) -> u32 {
        self.timestamp.month()
    }

    /// True for the last minute of a day (23:59:00)
    pub fn is_day_boundary(&self) -> bool {
        let t = self.timestamp.time();
        (t.hour(), t.minute(), t.second()) == DAY_BOUNDARY_HMS && t.nanosecond() == 0
    }

    /// True at exactly midnight
    pub fn is_midnight(&self) -> bool {
        self.timestamp.num_seconds_from_midnight() == 0
    }

    /// True if either power field carries the sentinel
    pub fn has_missing_data(&self) -> bool {
        self.active_power.is_missing() || self.reactive_power.is_missing()
    }

    /// Whole minutes from `earlier` to this reading, truncated toward zero
    pub fn minutes_since(&self, earlier: &Reading) -> i64 {
        (self.timestamp - earlier.timestamp).num_seconds() / 60
    }
}

// =============================================================================
// Windows
// =============================================================================

/// A fixed-size run of consecutive readings cut from the aligned stream
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    /// 0-based position among all windows, retained or not
    pub ordinal: usize,
    pub readings: Vec<Reading>,
}

impl Window {
    pub fn new(ordinal: usize, readings: Vec<Reading>) -> Self {
        Self { ordinal, readings }
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn start(&self) -> Option<NaiveDateTime> {
        self.readings.first().map(|r| r.timestamp)
    }

    pub fn end(&self) -> Option<NaiveDateTime> {
        self.readings.last().map(|r| r.timestamp)
    }

    /// Minutes between first and last reading
    pub fn elapsed_minutes(&self) -> Option<i64> {
        match (self.readings.first(), self.readings.last()) {
            (Some(first), Some(last)) => Some(last.minutes_since(first)),
            _ => None,
        }
    }
}

/// Why a window was excluded from output
///
/// Rejections are silent: they are counted and reported, never raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum WindowRejection {
    /// Fewer readings than the window length (trailing remainder)
    Incomplete { len: usize, expected: usize },
    /// A reading at `offset` carries the missing-data sentinel
    MissingData { offset: usize },
    /// First-to-last span does not match the window length
    Gap { elapsed_minutes: i64, expected: i64 },
}

impl fmt::Display for WindowRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowRejection::Incomplete { len, expected } => {
                write!(f, "incomplete ({} of {} readings)", len, expected)
            }
            WindowRejection::MissingData { offset } => {
                write!(f, "missing data at offset {}", offset)
            }
            WindowRejection::Gap {
                elapsed_minutes,
                expected,
            } => write!(
                f,
                "gap (spans {} minutes, expected {})",
                elapsed_minutes, expected
            ),
        }
    }
}

/// A window that passed validation, with its dense 1-based output index
#[derive(Debug, Clone, PartialEq)]
pub struct RetainedWindow {
    pub index: usize,
    pub ordinal: usize,
    pub readings: Vec<Reading>,
}

/// Outcome of validating one window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum WindowVerdict {
    Retained { index: usize },
    Rejected { rejection: WindowRejection },
}

/// Per-window line of an extraction plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowReport {
    pub ordinal: usize,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub len: usize,
    pub verdict: WindowVerdict,
}

impl WindowReport {
    pub fn is_retained(&self) -> bool {
        matches!(self.verdict, WindowVerdict::Retained { .. })
    }
}

// =============================================================================
// Statistics
// =============================================================================

/// Counters and outputs of one extraction run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionSummary {
    /// Source file
    pub source: PathBuf,

    /// Data rows parsed (header excluded)
    pub rows_read: u64,

    /// Rows whose month is in the season
    pub season_readings: u64,

    /// Season readings dropped while searching for the day boundary (boundary included)
    pub discarded_before_alignment: u64,

    /// Season readings from the alignment point onward
    pub aligned_readings: u64,

    /// Windows cut from the aligned stream, including the trailing remainder
    pub windows_considered: usize,

    /// Windows that passed validation
    pub windows_retained: usize,

    pub rejected_incomplete: usize,
    pub rejected_missing_data: usize,
    pub rejected_gap: usize,

    /// Files created by this run, in index order
    pub files_written: Vec<PathBuf>,

    /// Wall-clock duration of the run
    pub processing_time_ms: u64,
}

impl ExtractionSummary {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            ..Default::default()
        }
    }

    /// Count a rejected window under its reason
    pub fn record_rejection(&mut self, rejection: &WindowRejection) {
        match rejection {
            WindowRejection::Incomplete { .. } => self.rejected_incomplete += 1,
            WindowRejection::MissingData { .. } => self.rejected_missing_data += 1,
            WindowRejection::Gap { .. } => self.rejected_gap += 1,
        }
    }

    pub fn windows_rejected(&self) -> usize {
        self.rejected_incomplete + self.rejected_missing_data + self.rejected_gap
    }
}

/// Retained windows plus the per-window verdicts that produced them
#[derive(Debug, Clone)]
pub struct ExtractionPlan {
    pub windows: Vec<RetainedWindow>,
    pub reports: Vec<WindowReport>,
    pub summary: ExtractionSummary,
}
