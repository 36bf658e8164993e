//! Shared components for CLI commands
//!
//! This module contains logging setup, layered configuration loading and the
//! summary report used by both subcommands.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::Result;
use crate::app::models::ExtractionSummary;
use crate::cli::args::SourceOptions;
use crate::config::{Config, LoggingConfig};

/// Set up structured logging
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn setup_logging(logging: &LoggingConfig, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = &logging.level;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("seasonal_chunker={}", log_level)));

    let initialized = if quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    match initialized {
        Ok(()) => debug!("Logging initialized at level: {}", log_level),
        Err(e) => debug!("Logging already initialized: {}", e),
    }
}

/// Config file to read: the explicit one, else the default path if it exists
pub fn resolve_config_file(options: &SourceOptions) -> Option<PathBuf> {
    match &options.config_file {
        Some(path) => Some(path.clone()),
        None => Config::default_config_path()
            .ok()
            .filter(|path| path.exists()),
    }
}

/// Load configuration using layered approach (defaults -> file -> args)
///
/// `apply` receives the file-level configuration and applies CLI overrides.
/// Logging is installed once the effective level is known.
pub fn load_configuration(
    options: &SourceOptions,
    apply: impl FnOnce(&mut Config),
) -> Result<Config> {
    let config_file = resolve_config_file(options);

    let mut config = Config::load_layered(config_file.as_deref())?;
    apply(&mut config);
    config.validate()?;

    setup_logging(&config.logging, options.quiet);
    match &config_file {
        Some(path) => info!("Using config file: {}", path.display()),
        None => info!("No config file found, using defaults"),
    }

    debug!("Loaded configuration: {:?}", config);
    Ok(config)
}

/// Create a progress bar with appropriate styling
pub fn create_progress_bar(message: &str) -> ProgressBar {
    let pb = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message(message.to_string());
    pb
}

/// Human-readable summary lines for a finished or planned run
pub fn summary_lines(summary: &ExtractionSummary, wrote_files: bool) -> Vec<String> {
    let mut lines = vec![
        format!("Source:               {}", summary.source.display()),
        format!("Rows read:            {}", summary.rows_read),
        format!("In-season readings:   {}", summary.season_readings),
        format!("Discarded (align):    {}", summary.discarded_before_alignment),
        format!("Windows considered:   {}", summary.windows_considered),
        format!("Windows retained:     {}", summary.windows_retained),
    ];

    if summary.windows_rejected() > 0 {
        lines.push(format!(
            "Windows rejected:     {} ({} missing data, {} gaps, {} incomplete)",
            summary.windows_rejected(),
            summary.rejected_missing_data,
            summary.rejected_gap,
            summary.rejected_incomplete
        ));
    }

    if wrote_files {
        lines.push(format!(
            "Files written:        {}",
            summary.files_written.len()
        ));
    }
    lines.push(format!("Time elapsed:         {}ms", summary.processing_time_ms));
    lines
}

/// Print the run summary to stdout
pub fn print_summary(title: &str, summary: &ExtractionSummary, wrote_files: bool) {
    println!("\n{}", title.bright_green().bold());
    for line in summary_lines(summary, wrote_files) {
        match line.split_once(':') {
            Some((label, value)) => println!("  {}{}", format!("{}:", label).bright_cyan(), value),
            None => println!("  {}", line),
        }
    }
}
