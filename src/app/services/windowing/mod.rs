//! Fixed-length windowing of the aligned reading stream
//!
//! - [`partition`] - Cuts the stream into consecutive, non-overlapping windows
//! - [`validation`] - Rejects incomplete, gapped or missing-data windows and
//!   numbers the survivors densely from 1

pub mod partition;
pub mod validation;

#[cfg(test)]
pub mod tests;

pub use partition::WindowPartitioner;
pub use validation::WindowValidator;
