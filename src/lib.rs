//! Seasonal Chunker Library
//!
//! A Rust library for turning minute-resolution household load measurements
//! into weekly load profiles for time-series power-flow simulation.
//!
//! This library provides tools for:
//! - Streaming semicolon-delimited load CSV files into timestamped readings
//! - Restricting readings to a configured season and aligning them to midnight
//! - Partitioning the aligned stream into fixed-length windows
//! - Dropping incomplete, gapped or missing-data windows without error
//! - Writing densely numbered per-window profile files

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod extractor;
        pub mod load_parser;
        pub mod season_filter;
        pub mod window_writer;
        pub mod windowing;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{ExtractionSummary, PowerValue, Reading, RetainedWindow, WindowRejection};
pub use app::services::extractor::SeasonalChunkExtractor;
pub use config::Config;

/// Result type alias for the seasonal chunker
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for load extraction operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed source row
    #[error("Parse error in file '{file}' at line {line}: {message}")]
    Parse {
        file: String,
        line: u64,
        message: String,
    },

    /// Season data present but never reaches a 23:59 day boundary
    #[error(
        "Alignment error in file '{file}': {season_readings} in-season readings but no 23:59:00 day boundary"
    )]
    Alignment { file: String, season_readings: u64 },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a parse error for a specific source line
    pub fn parse(file: impl Into<String>, line: u64, message: impl Into<String>) -> Self {
        Self::Parse {
            file: file.into(),
            line,
            message: message.into(),
        }
    }

    /// Create an alignment error
    pub fn alignment(file: impl Into<String>, season_readings: u64) -> Self {
        Self::Alignment {
            file: file.into(),
            season_readings,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }

    /// Whether this error aborts a run before any output could be produced
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::Parse { .. } | Self::Alignment { .. })
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Self::Configuration {
            message: format!("Invalid configuration file: {}", error),
        }
    }
}
