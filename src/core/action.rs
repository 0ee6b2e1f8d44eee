//! # Actions
//!
//! Everything that can happen in shellpane becomes an `Action`.
//! User presses Enter? That's `Action::Key(Key::Enter)`.
//! A command finishes? That's `Action::CommandFinished { output }`.
//!
//! The `update()` function takes the current state and an action,
//! mutates the state, and returns an [`Effect`] for the event loop to carry
//! out. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Command results are not tied to the submission that produced them.
//! Whatever finishes first is appended first, so two overlapping jobs land
//! in the history in completion order.

use log::{debug, info};

use crate::core::state::{App, INPUT_HEIGHT, INPUT_PADDING, Phase};

/// Submissions that end the program instead of running a command.
pub const QUIT_COMMANDS: [&str; 2] = ["exit", "quit"];

/// Terminal-independent keys the dispatcher understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// Ctrl+C
    Interrupt,
    Enter,
    Char(char),
    Paste(String),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    WordLeft,
    WordRight,
    DeleteWordBack,
    DeleteToEnd,
    DeleteToStart,
    Up,
    Down,
    PageUp,
    PageDown,
    HalfPageUp,
    HalfPageDown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Key(Key),
    Resize { width: u16, height: u16 },
    CommandFinished { output: String },
}

/// What the event loop should do after an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    /// Launch a job for this command line.
    Spawn(String),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Key(Key::Interrupt) => {
            info!("Interrupt received, quitting");
            Effect::Quit
        }
        Action::Key(Key::Enter) => commit(app),
        Action::Key(key) => {
            app.input.apply(&key);
            if app.is_ready() {
                app.transcript.apply(&key);
            }
            Effect::None
        }
        Action::Resize { width, height } => {
            resize(app, width, height);
            Effect::None
        }
        Action::CommandFinished { output } => {
            debug!("Command finished ({} bytes of output)", output.len());
            app.append(&output);
            Effect::None
        }
    }
}

fn commit(app: &mut App) -> Effect {
    let line = app.input.value().to_string();
    if line.is_empty() {
        return Effect::None;
    }
    if QUIT_COMMANDS.contains(&line.as_str()) {
        info!("Quit command submitted: {line}");
        return Effect::Quit;
    }

    info!("Submitting command: {line}");
    app.append(&format!("> {line}\n"));
    app.input.clear();
    Effect::Spawn(line)
}

fn resize(app: &mut App, width: u16, height: u16) {
    let transcript_height = height.saturating_sub(INPUT_HEIGHT);
    app.input.set_width(width.saturating_sub(INPUT_PADDING));

    match app.phase {
        Phase::Initializing => {
            info!("First resize ({width}x{height}), ready");
            app.transcript.resize(width, transcript_height);
            app.transcript.set_content(&app.history);
            app.phase = Phase::Ready;
        }
        Phase::Ready => {
            debug!("Resize to {width}x{height}");
            app.transcript.resize(width, transcript_height);
        }
    }
}
