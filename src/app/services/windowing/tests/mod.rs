//! Test utilities for windowing

use chrono::{Duration, NaiveDateTime};

use crate::app::models::{PowerValue, Reading, Window};

mod validation_tests;

/// `count` consecutive measured readings starting at `start`
pub fn consecutive_readings(start: NaiveDateTime, count: usize) -> Vec<Reading> {
    (0..count)
        .map(|i| {
            Reading::new(
                start + Duration::minutes(i as i64),
                PowerValue::Measured(1000.0 + i as f64),
                PowerValue::Measured(100.0),
                i as u64 + 2,
            )
        })
        .collect()
}

/// A window over `count` consecutive readings
pub fn window_at(ordinal: usize, start: NaiveDateTime, count: usize) -> Window {
    Window::new(ordinal, consecutive_readings(start, count))
}
