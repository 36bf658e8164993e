//! Test utilities for load file parsing
//!
//! Provides a builder for synthetic minute-resolution load files shaped like
//! the household power consumption export, shared by the other service tests.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::config::ExtractionConfig;


/// Header row of the raw export
pub const TEST_HEADER: &str =
    "Date;Time;Global_active_power;Global_reactive_power;Voltage;Global_intensity";

/// Timestamp helper
pub fn ts(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

/// Render one data row in source format
pub fn format_row(timestamp: NaiveDateTime, active: &str, reactive: &str) -> String {
    format!(
        "{};{};{};{};240.120;4.600",
        timestamp.format("%d/%m/%Y"),
        timestamp.format("%H:%M:%S"),
        active,
        reactive
    )
}

/// Builder for synthetic load files
#[derive(Debug, Clone, Default)]
pub struct LoadFileBuilder {
    rows: Vec<(NaiveDateTime, String, String)>,
}

impl LoadFileBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `count` consecutive one-minute rows starting at `start`
    ///
    /// Active power cycles through `1000.5, 1001.5, ...` and reactive power
    /// is fixed at `250`, both in source units.
    pub fn minutes(mut self, start: NaiveDateTime, count: usize) -> Self {
        for i in 0..count {
            let timestamp = start + Duration::minutes(i as i64);
            let active = format!("{:.1}", 1000.5 + (i % 100) as f64);
            self.rows.push((timestamp, active, "250".to_string()));
        }
        self
    }

    /// Append one row with explicit raw values
    pub fn row(mut self, timestamp: NaiveDateTime, active: &str, reactive: &str) -> Self {
        self.rows.push((timestamp, active.to_string(), reactive.to_string()));
        self
    }

    /// Replace the active power of every row at `timestamp` with the sentinel
    pub fn missing_active(mut self, timestamp: NaiveDateTime) -> Self {
        for row in self.rows.iter_mut().filter(|r| r.0 == timestamp) {
            row.1 = "?".to_string();
        }
        self
    }

    /// Replace the reactive power of every row at `timestamp` with the sentinel
    pub fn missing_reactive(mut self, timestamp: NaiveDateTime) -> Self {
        for row in self.rows.iter_mut().filter(|r| r.0 == timestamp) {
            row.2 = "?".to_string();
        }
        self
    }

    /// Drop every row at `timestamp`
    pub fn remove(mut self, timestamp: NaiveDateTime) -> Self {
        self.rows.retain(|r| r.0 != timestamp);
        self
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// File content including the header row
    pub fn build(&self) -> String {
        let mut content = String::with_capacity(self.rows.len() * 48);
        content.push_str(TEST_HEADER);
        content.push('\n');
        for (timestamp, active, reactive) in &self.rows {
            content.push_str(&format_row(*timestamp, active, reactive));
            content.push('\n');
        }
        content
    }

    /// Write the file into `dir` and return its path
    pub fn write_to(&self, dir: &Path) -> PathBuf {
        let path = dir.join("loads_orig.txt");
        std::fs::write(&path, self.build()).unwrap();
        path
    }
}

/// Helper to create a temporary file with given content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file
}

/// Extraction config with a short window for fast tests
pub fn short_window_config(window_length: usize) -> ExtractionConfig {
    ExtractionConfig {
        window_length,
        ..Default::default()
    }
}
