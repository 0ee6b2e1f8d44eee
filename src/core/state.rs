//! # Application State
//!
//! Everything the dispatcher owns, in one record. No terminal types here.
//!
//! ```text
//! App
//! ├── history: String               // append-only transcript
//! ├── phase: Phase                  // Initializing until the first resize
//! ├── input: InputState             // command line being edited
//! └── transcript: TranscriptState   // wrapped, scrollable view of history
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::input::InputState;
use crate::core::transcript::TranscriptState;

/// Rows reserved below the transcript for the separator and input line.
pub const INPUT_HEIGHT: u16 = 3;

/// Columns the input field gives up to the prompt and padding.
pub const INPUT_PADDING: u16 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No terminal size known yet.
    Initializing,
    Ready,
}

#[derive(Debug, Clone)]
pub struct App {
    pub history: String,
    pub phase: Phase,
    pub input: InputState,
    pub transcript: TranscriptState,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            history: String::new(),
            phase: Phase::Initializing,
            input: InputState::new(),
            transcript: TranscriptState::default(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.phase == Phase::Ready
    }

    /// Append a chunk to the history, terminated by exactly one line break,
    /// then refresh the transcript and pin it to the bottom.
    pub fn append(&mut self, chunk: &str) {
        if chunk.is_empty() {
            return;
        }
        self.history.push_str(chunk);
        if !chunk.ends_with('\n') {
            self.history.push('\n');
        }
        self.transcript.set_content(&self.history);
        self.transcript.goto_bottom();
    }
}
