//! Tests for window file output

use std::path::Path;

use crate::app::models::RetainedWindow;
use crate::app::services::load_parser::tests::ts;
use crate::app::services::windowing::tests::consecutive_readings;
use crate::config::OutputConfig;


/// Retained window with `count` consecutive readings
pub fn retained(index: usize, count: usize) -> RetainedWindow {
    RetainedWindow {
        index,
        ordinal: index - 1,
        readings: consecutive_readings(ts(2007, 1, 2, 0, 0), count),
    }
}

/// Output config pointing at `dir`
pub fn output_in(dir: &Path) -> OutputConfig {
    OutputConfig {
        directory: dir.to_path_buf(),
        ..Default::default()
    }
}
