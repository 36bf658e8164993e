//! Window partitioning
//!
//! Every window except possibly the last holds exactly `window_length`
//! readings. The trailing remainder is still produced so that validation
//! can reject it like any other window.

use crate::app::models::{Reading, Window};

/// Iterator adapter yielding consecutive windows from a reading stream
pub struct WindowPartitioner<I> {
    readings: I,
    window_length: usize,
    next_ordinal: usize,
}

impl<I> WindowPartitioner<I>
where
    I: Iterator<Item = Reading>,
{
    /// `window_length` must be non-zero; config validation guarantees it
    pub fn new(readings: I, window_length: usize) -> Self {
        Self {
            readings,
            window_length: window_length.max(1),
            next_ordinal: 0,
        }
    }
}

impl<I> Iterator for WindowPartitioner<I>
where
    I: Iterator<Item = Reading>,
{
    type Item = Window;

    fn next(&mut self) -> Option<Window> {
        let chunk: Vec<Reading> = self.readings.by_ref().take(self.window_length).collect();
        if chunk.is_empty() {
            return None;
        }

        let window = Window::new(self.next_ordinal, chunk);
        self.next_ordinal += 1;
        Some(window)
    }
}
