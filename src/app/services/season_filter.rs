//! Season restriction and day-boundary alignment
//!
//! The season filter keeps readings whose calendar month is in the configured
//! set. Alignment then discards filtered readings up to and including the
//! first one stamped 23:59:00, so the retained stream starts at midnight and
//! every later window begins on a day boundary.

use std::collections::BTreeSet;
use tracing::debug;

use crate::Result;
use crate::app::models::Reading;
use crate::config::ExtractionConfig;

/// Month-based season predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonFilter {
    months: BTreeSet<u32>,
}

impl SeasonFilter {
    pub fn new(months: impl IntoIterator<Item = u32>) -> Self {
        Self {
            months: months.into_iter().collect(),
        }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new(config.season_months.iter().copied())
    }

    /// True if the reading's month is in season
    pub fn contains(&self, reading: &Reading) -> bool {
        self.months.contains(&reading.month())
    }

    /// Lazily keep in-season readings, preserving order and passing errors through
    pub fn filter<'a, I>(&'a self, readings: I) -> impl Iterator<Item = Result<Reading>> + 'a
    where
        I: Iterator<Item = Result<Reading>> + 'a,
    {
        readings.filter(move |item| match item {
            Ok(reading) => self.contains(reading),
            Err(_) => true,
        })
    }
}

/// Result of scanning for the first day boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// Boundary found; the next reading starts the aligned stream
    Aligned { discarded: u64 },
    /// The filtered stream was empty
    NoSeasonData,
    /// Readings were seen but none at 23:59:00
    NoBoundary { discarded: u64 },
}

/// Consume `stream` up to and including the first 23:59:00 reading
///
/// On [`Alignment::Aligned`] the iterator is left positioned on the first
/// reading of the aligned stream.
pub fn align_to_day_boundary<I>(stream: &mut I) -> Result<Alignment>
where
    I: Iterator<Item = Result<Reading>>,
{
    let mut discarded = 0u64;

    for item in stream {
        let reading = item?;
        discarded += 1;
        if reading.is_day_boundary() {
            debug!(
                "Day boundary at {} (line {}), {} readings discarded",
                reading.timestamp, reading.line, discarded
            );
            return Ok(Alignment::Aligned { discarded });
        }
    }

    if discarded == 0 {
        Ok(Alignment::NoSeasonData)
    } else {
        Ok(Alignment::NoBoundary { discarded })
    }
}
