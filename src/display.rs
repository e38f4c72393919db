//! Fixed-capacity display frames.

use core::fmt;
use heapless::String;

/// Characters the faces' display area can hold.
pub const FRAME_LEN: usize = 10;

/// Display text for one redraw, built with `write!` and then blanked at the
/// blinking positions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    text: String<FRAME_LEN>,
}

impl Frame {
    /// Creates an empty frame.
    pub fn new() -> Self {
        Self {
            text: String::new(),
        }
    }

    /// Replaces the characters at `positions` with spaces.
    ///
    /// Positions past the end of the text are ignored.
    pub fn blank(&mut self, positions: &[usize]) {
        self.text = self
            .text
            .chars()
            .enumerate()
            .map(|(index, ch)| if positions.contains(&index) { ' ' } else { ch })
            .collect();
    }

    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Write for Frame {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.text.push_str(s).map_err(|_| fmt::Error)
    }
}
