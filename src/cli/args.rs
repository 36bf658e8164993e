//! Command-line argument definitions for the seasonal chunker
//!
//! This module defines the complete CLI interface using clap derive API.
//! Every extraction parameter is optional on the command line; values not
//! given fall back to the configuration file, then to built-in defaults.

use crate::config::Config;
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::str::FromStr;

/// CLI arguments for the seasonal load chunker
///
/// Splits a minute-resolution household load export into day-aligned,
/// season-filtered weekly load profiles for time-series power-flow studies.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "seasonal_chunker",
    version,
    about = "Split household load CSV data into season-filtered weekly load profiles",
    long_about = "Reads a semicolon-delimited minute-resolution load file, keeps only the configured \
                  season months, aligns the data to midnight and cuts it into fixed-length windows. \
                  Windows with gaps or missing measurements are dropped; the rest are written as \
                  densely numbered profile files, one '<minute> <P>+<Q>j' line per reading."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Extract seasonal windows and write one profile file per retained window
    Extract(ExtractArgs),
    /// Report which windows would be retained or rejected, without writing
    Inspect(InspectArgs),
}

/// Source and extraction options shared by all subcommands
#[derive(Debug, Clone, clap::Args)]
pub struct SourceOptions {
    /// Raw load file (semicolon-delimited, one header row)
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Season months as a comma-separated list (numbers or names, e.g. 12,1,2 or dec,jan,feb)
    #[arg(short = 'm', long = "months", value_name = "LIST")]
    pub months: Option<MonthList>,

    /// Readings per window (default 10080, one week of minutes)
    #[arg(short = 'w', long = "window-length", value_name = "MINUTES")]
    pub window_length: Option<usize>,

    /// Factor applied to both power columns (default 0.001)
    #[arg(short = 's', long = "scale", value_name = "FACTOR", allow_negative_numbers = true)]
    pub scale: Option<f64>,

    /// Raw value marking a missing measurement (default '?')
    #[arg(long = "sentinel", value_name = "TEXT")]
    pub sentinel: Option<String>,

    /// Source field delimiter (default ';')
    #[arg(long = "delimiter", value_name = "CHAR")]
    pub delimiter: Option<char>,

    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// <config dir>/seasonal-chunker/config.toml
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Arguments for the extract command
#[derive(Debug, Clone, Parser)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub input: SourceOptions,

    /// Output directory for window files (created if missing)
    #[arg(short = 'o', long = "output", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Output filename template; {index} is replaced by the 1-based window number
    #[arg(short = 't', long = "template", value_name = "TEMPLATE")]
    pub template: Option<String>,

    /// Number of window files written concurrently
    #[arg(short = 'j', long = "workers", value_name = "COUNT")]
    pub workers: Option<usize>,

    /// Write window files one at a time, in index order
    #[arg(long = "sequential")]
    pub sequential: bool,

    /// Show what would be written without creating any files
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Overwrite existing window files
    #[arg(long = "force")]
    pub force_overwrite: bool,

    /// Keep files already written when a later write fails
    #[arg(long = "keep-partial")]
    pub keep_partial: bool,
}

/// Arguments for the inspect command
#[derive(Debug, Clone, Parser)]
pub struct InspectArgs {
    #[command(flatten)]
    pub input: SourceOptions,

    /// Report format
    #[arg(long = "format", value_enum, default_value = "human")]
    pub output_format: OutputFormat,
}

/// Output format options for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Human,
    /// JSON for scripting
    Json,
}

/// Wrapper for parsing comma-separated month lists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthList {
    pub months: Vec<u32>,
}

const MONTH_NAMES: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

impl FromStr for MonthList {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut months = Vec::new();

        for token in s.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let month = match token.parse::<u32>() {
                Ok(n) => n,
                Err(_) => {
                    let prefix: String = token.to_lowercase().chars().take(3).collect();
                    MONTH_NAMES
                        .iter()
                        .position(|name| *name == prefix)
                        .map(|i| i as u32 + 1)
                        .ok_or_else(|| {
                            Error::configuration(format!("Unknown month '{}'", token))
                        })?
                }
            };

            if !(1..=12).contains(&month) {
                return Err(Error::configuration(format!(
                    "Month {} out of range (1-12)",
                    month
                )));
            }
            if !months.contains(&month) {
                months.push(month);
            }
        }

        if months.is_empty() {
            return Err(Error::configuration("Month list cannot be empty"));
        }

        Ok(MonthList { months })
    }
}

impl SourceOptions {
    /// Log level requested by -v / -q, if any
    ///
    /// Without either flag the configured `[logging] level` applies.
    pub fn log_level_override(&self) -> Option<&'static str> {
        if self.quiet {
            return Some("error");
        }
        match self.verbose {
            0 => None,
            1 => Some("info"),
            2 => Some("debug"),
            _ => Some("trace"),
        }
    }

    /// Check paths before any work starts
    pub fn validate(&self) -> Result<()> {
        if !self.source.exists() {
            return Err(Error::configuration(format!(
                "Source file does not exist: {}",
                self.source.display()
            )));
        }
        if !self.source.is_file() {
            return Err(Error::configuration(format!(
                "Source path is not a file: {}",
                self.source.display()
            )));
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        Ok(())
    }

    /// Overlay extraction flags onto a loaded configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(months) = &self.months {
            config.extraction.season_months = months.months.clone();
        }
        if let Some(window_length) = self.window_length {
            config.extraction.window_length = window_length;
        }
        if let Some(scale) = self.scale {
            config.extraction.scale = scale;
        }
        if let Some(sentinel) = &self.sentinel {
            config.extraction.missing_sentinel = sentinel.clone();
        }
        if let Some(delimiter) = self.delimiter {
            config.extraction.delimiter = delimiter;
        }
        if let Some(level) = self.log_level_override() {
            config.logging.level = level.to_string();
        }
    }
}

impl ExtractArgs {
    /// Overlay output and performance flags onto a loaded configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        self.input.apply_overrides(config);

        if let Some(output_dir) = &self.output_dir {
            config.output.directory = output_dir.clone();
        }
        if let Some(template) = &self.template {
            config.output.filename_template = template.clone();
        }
        if let Some(workers) = self.workers {
            config.performance.workers = workers;
        }
        if self.force_overwrite {
            config.output.overwrite_existing = true;
        }
        if self.keep_partial {
            config.output.cleanup_on_error = false;
        }
    }

    /// Whether a progress bar should be drawn
    pub fn show_progress(&self) -> bool {
        !self.input.quiet && !self.dry_run && !self.sequential
    }
}
