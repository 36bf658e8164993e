//! Tests for window validation and dense numbering

use super::*;
use crate::app::models::{ExtractionSummary, WindowRejection, WindowVerdict};
use crate::app::services::load_parser::tests::ts;
use crate::app::services::windowing::WindowValidator;

#[test]
fn test_complete_window_passes() {
    let validator = WindowValidator::new(60);
    let window = window_at(0, ts(2007, 1, 2, 0, 0), 60);
    assert_eq!(validator.check(&window), None);
}

#[test]
fn test_short_window_is_incomplete() {
    let validator = WindowValidator::new(60);
    let window = window_at(3, ts(2007, 1, 2, 0, 0), 59);
    assert_eq!(
        validator.check(&window),
        Some(WindowRejection::Incomplete {
            len: 59,
            expected: 60
        })
    );
}

#[test]
fn test_missing_active_or_reactive_rejects() {
    let validator = WindowValidator::new(60);

    let mut window = window_at(0, ts(2007, 1, 2, 0, 0), 60);
    window.readings[17].active_power = PowerValue::Missing;
    assert_eq!(
        validator.check(&window),
        Some(WindowRejection::MissingData { offset: 17 })
    );

    let mut window = window_at(0, ts(2007, 1, 2, 0, 0), 60);
    window.readings[59].reactive_power = PowerValue::Missing;
    assert_eq!(
        validator.check(&window),
        Some(WindowRejection::MissingData { offset: 59 })
    );
}

#[test]
fn test_gap_with_full_count_rejects() {
    // 60 readings but one minute skipped: span is 60 minutes, not 59
    let validator = WindowValidator::new(60);
    let mut readings = consecutive_readings(ts(2007, 1, 2, 0, 0), 61);
    readings.remove(30);
    let window = Window::new(0, readings);

    assert_eq!(window.len(), 60);
    assert_eq!(
        validator.check(&window),
        Some(WindowRejection::Gap {
            elapsed_minutes: 60,
            expected: 59
        })
    );
}

#[test]
fn test_duplicate_timestamp_rejects() {
    let validator = WindowValidator::new(60);
    let mut readings = consecutive_readings(ts(2007, 1, 2, 0, 0), 59);
    let duplicate = readings[10].clone();
    readings.insert(11, duplicate);
    let window = Window::new(0, readings);

    assert!(matches!(
        validator.check(&window),
        Some(WindowRejection::Gap {
            elapsed_minutes: 58,
            ..
        })
    ));
}

#[test]
fn test_season_jump_rejects() {
    // Last February minutes followed by the next December
    let validator = WindowValidator::new(4);
    let mut readings = consecutive_readings(ts(2007, 2, 28, 23, 58), 2);
    readings.extend(consecutive_readings(ts(2007, 12, 1, 0, 0), 2));
    let window = Window::new(0, readings);

    assert!(matches!(
        validator.check(&window),
        Some(WindowRejection::Gap { .. })
    ));
}

#[test]
fn test_select_assigns_dense_indices() {
    let validator = WindowValidator::new(10);
    let mut bad = window_at(1, ts(2007, 1, 2, 0, 10), 10);
    bad.readings[0].reactive_power = PowerValue::Missing;

    let windows = vec![
        window_at(0, ts(2007, 1, 2, 0, 0), 10),
        bad,
        window_at(2, ts(2007, 1, 2, 0, 20), 10),
        window_at(3, ts(2007, 1, 2, 0, 30), 4),
    ];

    let mut summary = ExtractionSummary::default();
    let (retained, reports) = validator.select(windows, &mut summary);

    assert_eq!(
        retained.iter().map(|w| (w.index, w.ordinal)).collect::<Vec<_>>(),
        vec![(1, 0), (2, 2)]
    );
    assert_eq!(reports.len(), 4);
    assert_eq!(
        reports[1].verdict,
        WindowVerdict::Rejected {
            rejection: WindowRejection::MissingData { offset: 0 }
        }
    );
    assert_eq!(reports[2].verdict, WindowVerdict::Retained { index: 2 });
    assert!(!reports[3].is_retained());

    assert_eq!(summary.windows_considered, 4);
    assert_eq!(summary.windows_retained, 2);
    assert_eq!(summary.rejected_missing_data, 1);
    assert_eq!(summary.rejected_incomplete, 1);
    assert_eq!(summary.rejected_gap, 0);
}

#[test]
fn test_window_length_one() {
    let validator = WindowValidator::new(1);
    let window = window_at(0, ts(2007, 1, 2, 0, 0), 1);
    assert_eq!(validator.check(&window), None);
}
