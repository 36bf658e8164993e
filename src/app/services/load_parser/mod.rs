//! Streaming parser for semicolon-delimited household load files
//!
//! This module turns the raw load export into a lazy sequence of
//! [`Reading`](crate::app::models::Reading)s in file order. Nothing is
//! buffered beyond the current record, so downstream stages decide how
//! much of the file to materialize.
//!
//! ## Architecture
//!
//! - [`parser`] - Record iteration, header skipping and error positioning
//! - [`field_parsers`] - Date/time and power field conversion
//!
//! ## Usage
//!
//! ```rust,no_run
//! use seasonal_chunker::app::services::load_parser::LoadCsvReader;
//! use seasonal_chunker::config::ExtractionConfig;
//!
//! # fn example() -> seasonal_chunker::Result<()> {
//! let reader = LoadCsvReader::open("loads_orig.txt".as_ref(), &ExtractionConfig::default())?;
//! for reading in reader {
//!     let reading = reading?;
//!     println!("{} {:?}", reading.timestamp, reading.active_power);
//! }
//! # Ok(())
//! # }
//! ```

pub mod field_parsers;
pub mod parser;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use parser::LoadCsvReader;
