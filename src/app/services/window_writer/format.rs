//! Line encoding for window files
//!
//! Each line is `<offset> <active>+<reactive>j`: the 0-based minute offset
//! within the window, then active and reactive power (scaled) written as a
//! complex-number literal with six decimals, e.g. `0 1.234500+0.250000j`.
//! A negative reactive part renders as `+-0.250000j`.

use std::io::{self, Write};

use crate::app::models::Reading;
use crate::constants::OUTPUT_DECIMALS;

/// Format one output line (without the trailing newline)
pub fn format_line(offset: usize, active: f64, reactive: f64) -> String {
    format!(
        "{} {:.prec$}+{:.prec$}j",
        offset,
        active,
        reactive,
        prec = OUTPUT_DECIMALS
    )
}

/// Write all readings of a window, one line each, in offset order
pub fn write_readings<W: Write>(out: &mut W, readings: &[Reading], scale: f64) -> io::Result<()> {
    for (offset, reading) in readings.iter().enumerate() {
        let (Some(active), Some(reactive)) = (
            reading.active_power.scaled(scale),
            reading.reactive_power.scaled(scale),
        ) else {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Reading at {} (line {}) has no value to write",
                    reading.timestamp, reading.line
                ),
            ));
        };
        writeln!(out, "{}", format_line(offset, active, reactive))?;
    }
    Ok(())
}
