//! Shared fixtures for end-to-end extraction tests

#![allow(dead_code)]

use chrono::{Duration, NaiveDate, NaiveDateTime};
use seasonal_chunker::Config;
use std::path::{Path, PathBuf};

pub const HEADER: &str =
    "Date;Time;Global_active_power;Global_reactive_power;Voltage;Global_intensity;Sub_metering_1;Sub_metering_2;Sub_metering_3";

pub fn ts(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

/// Synthetic household load export, one row per minute
#[derive(Debug, Default)]
pub struct LoadFile {
    rows: Vec<String>,
}

impl LoadFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// `count` consecutive minutes from `start`
    ///
    /// Active power is `1000.5 + (i % 100)` and reactive power `250`, where
    /// `i` counts from zero within this block.
    pub fn minutes(mut self, start: NaiveDateTime, count: usize) -> Self {
        for i in 0..count {
            let timestamp = start + Duration::minutes(i as i64);
            let active = format!("{:.3}", 1000.5 + (i % 100) as f64);
            self.rows.push(row(timestamp, &active, "250.000"));
        }
        self
    }

    /// Replace the active power at `timestamp` with the sentinel
    pub fn missing_at(mut self, timestamp: NaiveDateTime) -> Self {
        let prefix = row_prefix(timestamp);
        for line in self.rows.iter_mut().filter(|l| l.starts_with(&prefix)) {
            *line = row(timestamp, "?", "?");
        }
        self
    }

    /// Drop the row at `timestamp`
    pub fn without(mut self, timestamp: NaiveDateTime) -> Self {
        let prefix = row_prefix(timestamp);
        self.rows.retain(|l| !l.starts_with(&prefix));
        self
    }

    /// Replace the row at `timestamp` with arbitrary text
    pub fn corrupt_at(mut self, timestamp: NaiveDateTime, text: &str) -> Self {
        let prefix = row_prefix(timestamp);
        for line in self.rows.iter_mut().filter(|l| l.starts_with(&prefix)) {
            *line = text.to_string();
        }
        self
    }

    /// 1-based file line of the row at `timestamp` (header is line 1)
    pub fn line_of(&self, timestamp: NaiveDateTime) -> Option<u64> {
        let prefix = row_prefix(timestamp);
        self.rows
            .iter()
            .position(|l| l.starts_with(&prefix))
            .map(|i| i as u64 + 2)
    }

    pub fn write_to(&self, dir: &Path) -> PathBuf {
        let path = dir.join("loads_orig.txt");
        let mut content = String::with_capacity((self.rows.len() + 1) * 64);
        content.push_str(HEADER);
        content.push('\n');
        for line in &self.rows {
            content.push_str(line);
            content.push('\n');
        }
        std::fs::write(&path, content).unwrap();
        path
    }
}

fn row_prefix(timestamp: NaiveDateTime) -> String {
    format!(
        "{};{};",
        timestamp.format("%d/%m/%Y"),
        timestamp.format("%H:%M:%S")
    )
}

fn row(timestamp: NaiveDateTime, active: &str, reactive: &str) -> String {
    format!(
        "{}{};{};234.840;18.400;0.000;1.000;17.000",
        row_prefix(timestamp),
        active,
        reactive
    )
}

/// Default configuration writing into `output_dir`
pub fn config_for(output_dir: &Path, window_length: usize) -> Config {
    let mut config = Config::default();
    config.extraction.window_length = window_length;
    config.output.directory = output_dir.to_path_buf();
    config.performance.workers = 4;
    config
}

/// Sorted `load_*.txt` file names in `dir`
pub fn output_files(dir: &Path) -> Vec<String> {
    if !dir.exists() {
        return Vec::new();
    }
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.starts_with("load_") && n.ends_with(".txt"))
        .collect();
    names.sort();
    names
}

pub fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}
