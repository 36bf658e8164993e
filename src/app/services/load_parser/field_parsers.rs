//! Field parsing utilities for load records
//!
//! Each helper returns a plain message on failure; the reader attaches the
//! file name and line number when it turns the message into an error.

use chrono::NaiveDateTime;
use csv::StringRecord;

use crate::app::models::{PowerValue, Reading};
use crate::constants::{MIN_SOURCE_FIELDS, SOURCE_DATETIME_FORMAT, columns};

/// Parse the date (DD/MM/YYYY) and time (HH:MM:SS) columns into one timestamp
pub fn parse_timestamp(date: &str, time: &str) -> Result<NaiveDateTime, String> {
    let joined = format!("{} {}", date, time);
    NaiveDateTime::parse_from_str(&joined, SOURCE_DATETIME_FORMAT).map_err(|e| {
        format!(
            "Invalid date/time '{}' (expected 'DD/MM/YYYY HH:MM:SS'): {}",
            joined, e
        )
    })
}

/// Parse a power field, mapping the sentinel to [`PowerValue::Missing`]
pub fn parse_power(raw: &str, sentinel: &str, field_name: &str) -> Result<PowerValue, String> {
    if raw == sentinel {
        return Ok(PowerValue::Missing);
    }

    raw.parse::<f64>()
        .map(PowerValue::Measured)
        .map_err(|e| format!("Invalid {} value '{}': {}", field_name, raw, e))
}

/// Build a reading from one data record
pub fn parse_reading(record: &StringRecord, sentinel: &str, line: u64) -> Result<Reading, String> {
    if record.len() < MIN_SOURCE_FIELDS {
        return Err(format!(
            "Expected at least {} fields, found {}",
            MIN_SOURCE_FIELDS,
            record.len()
        ));
    }

    let field = |index: usize| record.get(index).unwrap_or_default();

    let timestamp = parse_timestamp(field(columns::DATE), field(columns::TIME))?;
    let active_power = parse_power(field(columns::ACTIVE_POWER), sentinel, "active power")?;
    let reactive_power = parse_power(field(columns::REACTIVE_POWER), sentinel, "reactive power")?;

    Ok(Reading::new(timestamp, active_power, reactive_power, line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_timestamp() {
        let ts = parse_timestamp("16/12/2006", "17:24:00").unwrap();
        assert_eq!((ts.day(), ts.month(), ts.year()), (16, 12, 2006));
        assert_eq!((ts.hour(), ts.minute(), ts.second()), (17, 24, 0));
    }

    #[test]
    fn test_parse_timestamp_unpadded_day() {
        let ts = parse_timestamp("1/1/2007", "00:00:00").unwrap();
        assert_eq!((ts.day(), ts.month()), (1, 1));
    }

    #[test]
    fn test_parse_timestamp_invalid() {
        assert!(parse_timestamp("2006-12-16", "17:24:00").is_err());
        assert!(parse_timestamp("31/02/2007", "00:00:00").is_err());
        assert!(parse_timestamp("16/12/2006", "25:00:00").is_err());
    }

    #[test]
    fn test_parse_power() {
        assert_eq!(
            parse_power("4.216", "?", "active power").unwrap(),
            PowerValue::Measured(4.216)
        );
        assert_eq!(
            parse_power("?", "?", "active power").unwrap(),
            PowerValue::Missing
        );
        assert!(parse_power("abc", "?", "active power").is_err());
        assert!(parse_power("", "?", "active power").is_err());
    }

    #[test]
    fn test_parse_power_custom_sentinel() {
        assert_eq!(
            parse_power("NA", "NA", "reactive power").unwrap(),
            PowerValue::Missing
        );
        assert!(parse_power("?", "NA", "reactive power").is_err());
    }

    #[test]
    fn test_parse_reading_ignores_extra_columns() {
        let record = StringRecord::from(vec![
            "16/12/2006",
            "17:24:00",
            "4.216",
            "0.418",
            "234.840",
            "18.400",
        ]);
        let reading = parse_reading(&record, "?", 2).unwrap();
        assert_eq!(reading.active_power, PowerValue::Measured(4.216));
        assert_eq!(reading.reactive_power, PowerValue::Measured(0.418));
        assert_eq!(reading.line, 2);
    }

    #[test]
    fn test_parse_reading_too_few_fields() {
        let record = StringRecord::from(vec!["16/12/2006", "17:24:00", "4.216"]);
        let err = parse_reading(&record, "?", 7).unwrap_err();
        assert!(err.contains("at least 4 fields"));
    }
}
