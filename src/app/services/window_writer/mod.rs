//! Per-window profile file output
//!
//! - [`format`] - Text encoding of one reading per line
//! - [`writer`] - File creation, overwrite policy, cleanup and concurrent dispatch

pub mod format;
pub mod writer;

#[cfg(test)]
mod tests;

pub use writer::WindowWriter;
