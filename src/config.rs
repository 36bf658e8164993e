//! Configuration management and validation.
//!
//! Provides configuration structures for extraction parameters, output
//! naming and write concurrency. Configuration is layered: built-in
//! defaults, then an optional TOML file, then CLI overrides.

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_FILENAME_TEMPLATE, DEFAULT_OUTPUT_DIR,
    DEFAULT_SCALE, DEFAULT_SEASON_MONTHS, INDEX_PLACEHOLDER, LOG_LEVELS, MAX_WORKERS,
    MISSING_SENTINEL, SOURCE_DELIMITER, WEEK_LENGTH,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Top-level configuration for a chunking run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub extraction: ExtractionConfig,
    pub output: OutputConfig,
    pub performance: PerformanceConfig,
    pub logging: LoggingConfig,
}

/// Parameters that decide which readings end up in which window
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Calendar months (1-12) that make up the target season
    pub season_months: Vec<u32>,

    /// Number of one-minute readings per window
    pub window_length: usize,

    /// Factor applied to both power columns when writing
    pub scale: f64,

    /// Raw field value that marks a missing measurement
    pub missing_sentinel: String,

    /// Source field delimiter
    pub delimiter: char,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            season_months: DEFAULT_SEASON_MONTHS.to_vec(),
            window_length: WEEK_LENGTH,
            scale: DEFAULT_SCALE,
            missing_sentinel: MISSING_SENTINEL.to_string(),
            delimiter: SOURCE_DELIMITER as char,
        }
    }
}

impl ExtractionConfig {
    /// Delimiter as the byte the CSV reader expects
    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter as u8
    }

    fn validate(&self) -> Result<()> {
        if self.season_months.is_empty() {
            return Err(Error::configuration("Season must contain at least one month"));
        }
        if let Some(month) = self.season_months.iter().find(|m| !(1..=12).contains(*m)) {
            return Err(Error::configuration(format!(
                "Invalid season month {}: months must be between 1 and 12",
                month
            )));
        }
        if self.window_length == 0 {
            return Err(Error::configuration(
                "Window length must be greater than 0".to_string(),
            ));
        }
        if !self.scale.is_finite() {
            return Err(Error::configuration(format!(
                "Scale factor must be finite, got {}",
                self.scale
            )));
        }
        if self.missing_sentinel.is_empty() {
            return Err(Error::configuration("Missing-data sentinel cannot be empty"));
        }
        if !self.delimiter.is_ascii() {
            return Err(Error::configuration(format!(
                "Delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            )));
        }
        Ok(())
    }
}

/// Where and how window files are written
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving the window files
    pub directory: PathBuf,

    /// Filename template; `{index}` is replaced by the 1-based window index
    pub filename_template: String,

    /// Replace files that already exist instead of failing
    pub overwrite_existing: bool,

    /// Remove files written by the current run when a write fails
    pub cleanup_on_error: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_OUTPUT_DIR),
            filename_template: DEFAULT_FILENAME_TEMPLATE.to_string(),
            overwrite_existing: false,
            cleanup_on_error: true,
        }
    }
}

impl OutputConfig {
    /// Full path of the file for a given window index
    pub fn window_path(&self, index: usize) -> PathBuf {
        self.directory.join(
            self.filename_template
                .replace(INDEX_PLACEHOLDER, &index.to_string()),
        )
    }

    fn validate(&self) -> Result<()> {
        if !self.filename_template.contains(INDEX_PLACEHOLDER) {
            return Err(Error::configuration(format!(
                "Filename template '{}' must contain {}",
                self.filename_template, INDEX_PLACEHOLDER
            )));
        }
        if self.filename_template.contains('/') || self.filename_template.contains('\\') {
            return Err(Error::configuration(format!(
                "Filename template '{}' must not contain path separators",
                self.filename_template
            )));
        }
        Ok(())
    }
}

/// Concurrency settings for the write phase
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Maximum number of window files written concurrently
    pub workers: usize,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            workers: num_cpus::get().clamp(1, MAX_WORKERS),
        }
    }
}

/// Default log verbosity; `-v`/`-q` and `RUST_LOG` take precedence
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level name (error, warn, info, debug, trace)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.level.as_str()) {
            return Err(Error::configuration(format!(
                "Invalid log level '{}': expected one of {}",
                self.level,
                LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }
}

impl Config {
    /// Default location of the user configuration file
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::configuration("Could not determine user config directory"))?;
        Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Parse configuration from TOML text, filling absent keys with defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load defaults, then overlay the given TOML file if any
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let config = match config_file {
            Some(path) => {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    Error::io(
                        format!("Failed to read config file {}", path.display()),
                        e,
                    )
                })?;
                debug!("Loaded config file {}", path.display());
                Self::from_toml_str(&content)?
            }
            None => Self::default(),
        };
        Ok(config)
    }

    /// Check all sections for consistency
    pub fn validate(&self) -> Result<()> {
        self.extraction.validate()?;
        self.output.validate()?;
        self.logging.validate()?;

        if self.performance.workers == 0 || self.performance.workers > MAX_WORKERS {
            return Err(Error::configuration(format!(
                "Number of workers must be between 1 and {}",
                MAX_WORKERS
            )));
        }

        Ok(())
    }

    /// Create the output directory if it doesn't exist
    pub fn ensure_output_directory(&self) -> Result<()> {
        let dir = &self.output.directory;
        if !dir.exists() {
            std::fs::create_dir_all(dir).map_err(|e| {
                Error::io(
                    format!("Failed to create output directory '{}'", dir.display()),
                    e,
                )
            })?;
            debug!("Created output directory {}", dir.display());
        }
        Ok(())
    }
}
