//! Input buffer holding the stroke digits typed since the last commit.
//!
//! The buffer is append-only from the keypad's point of view: strokes are
//! added at the end, backspace removes the last one, and commit or escape
//! clears it. It only ever holds digits `1`-`9`.

use crate::error::InvalidKey;
use crate::stroke::{is_stroke_digit, StrokeCode};

/// Whether a composition is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BufferState {
    #[default]
    Empty,
    Composing,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    text: String,
}

impl InputBuffer {
    /// Create a new empty input buffer.
    pub fn new() -> Self {
        Self {
            text: String::new(),
        }
    }

    /// Get the raw stroke digits.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of strokes typed.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn state(&self) -> BufferState {
        if self.text.is_empty() {
            BufferState::Empty
        } else {
            BufferState::Composing
        }
    }

    /// Append one stroke digit. Anything outside `1`-`9` is rejected and the
    /// buffer is left unchanged.
    pub fn append_digit(&mut self, ch: char) -> Result<(), InvalidKey> {
        if !is_stroke_digit(ch) {
            return Err(InvalidKey(ch));
        }
        self.text.push(ch);
        Ok(())
    }

    /// Remove the last stroke. Returns true if one was removed.
    pub fn backspace(&mut self) -> bool {
        self.text.pop().is_some()
    }

    /// Clear the buffer.
    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// The buffer as a validated stroke code, or `None` when empty.
    pub fn as_code(&self) -> Option<StrokeCode> {
        StrokeCode::parse(&self.text).ok()
    }
}
