//! Application constants for the seasonal chunker
//!
//! This module contains the source format description, default extraction
//! parameters and output naming used throughout the application.

// =============================================================================
// Time Constants
// =============================================================================

/// Minutes in one day
pub const MINUTES_PER_DAY: usize = 60 * 24;

/// Minutes in one week, the default window length
pub const WEEK_LENGTH: usize = MINUTES_PER_DAY * 7;

/// Time of day that marks the last reading of a day (hour, minute, second)
pub const DAY_BOUNDARY_HMS: (u32, u32, u32) = (23, 59, 0);

// =============================================================================
// Source Format
// =============================================================================

/// Field delimiter in the raw load file
pub const SOURCE_DELIMITER: u8 = b';';

/// Date and time columns joined with a space (DD/MM/YYYY HH:MM:SS)
pub const SOURCE_DATETIME_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Minimum number of fields a data row must carry
pub const MIN_SOURCE_FIELDS: usize = 4;

/// Raw value marking a missing measurement
pub const MISSING_SENTINEL: &str = "?";

/// Standard column positions in the raw load file
pub mod columns {
    pub const DATE: usize = 0;
    pub const TIME: usize = 1;
    pub const ACTIVE_POWER: usize = 2;
    pub const REACTIVE_POWER: usize = 3;
}

// =============================================================================
// Extraction Defaults
// =============================================================================

/// Default season: December, January, February
pub const DEFAULT_SEASON_MONTHS: &[u32] = &[12, 1, 2];

/// Default scale applied to both power columns (kW to MW)
pub const DEFAULT_SCALE: f64 = 0.001;

// =============================================================================
// Output Defaults
// =============================================================================

/// Placeholder replaced by the 1-based window index in filename templates
pub const INDEX_PLACEHOLDER: &str = "{index}";

/// Default output filename template
pub const DEFAULT_FILENAME_TEMPLATE: &str = "load_{index}.txt";

/// Default output directory
pub const DEFAULT_OUTPUT_DIR: &str = "loads";

/// Decimal places for emitted power values
pub const OUTPUT_DECIMALS: usize = 6;

// =============================================================================
// Performance Defaults
// =============================================================================

/// Upper bound on concurrent window writers
pub const MAX_WORKERS: usize = 256;

/// Configuration directory name under the user config directory
pub const CONFIG_DIR_NAME: &str = "seasonal-chunker";

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Accepted `[logging] level` values, least to most verbose
pub const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];
