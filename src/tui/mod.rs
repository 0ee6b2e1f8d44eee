//! # TUI Adapter
//!
//! The ratatui-specific layer. Sets up the terminal, renders the UI,
//! and feeds terminal events and job results into `core::update`.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Queue
//!
//! Everything arrives on one `mpsc` channel that only the loop reads:
//!
//! ```text
//! reader thread ──Key/Resize──┐
//!                             ├──▶ rx ──▶ update() ──▶ Effect
//! job tasks ───CommandFinished┘
//! ```
//!
//! Jobs are never awaited by the loop. Several can be in flight at once and
//! their results are applied in the order they arrive.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call.

mod event;
mod ui;

pub use event::{Incoming, translate};
pub use ui::{SeparatorStyle, ViewConfig, draw_ui, separator};

use log::{info, warn};
use std::io::{self, stdout};
use std::sync::{Arc, mpsc};

use crossterm::cursor::SetCursorStyle;
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::exec::{CommandRunner, ShellRunner};

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> io::Result<Self> {
        execute!(
            stdout(),
            EnableBracketedPaste,
            SetCursorStyle::SteadyBlock // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape
        );
    }
}

/// Launch one job. Its result is posted to `tx` when the command finishes;
/// if the loop has gone away by then the result is dropped.
pub fn spawn_job(runner: Arc<dyn CommandRunner>, line: String, tx: mpsc::Sender<Incoming>) {
    info!("Spawning job: {line}");
    tokio::spawn(async move {
        let output = runner.run(&line).await;
        if tx.send(Action::CommandFinished { output }.into()).is_err() {
            warn!("Dropping result for {line:?}: event loop has exited");
        }
    });
}

/// Undo partial terminal setup when `result` is an error. `try_init` can fail
/// after raw mode or the alternate screen is already on.
fn restore_on_err<T>(result: io::Result<T>, restore: impl FnOnce()) -> io::Result<T> {
    if result.is_err() {
        restore();
    }
    result
}

/// Run the terminal UI until the user quits.
///
/// Returns an error only if the terminal itself fails.
pub fn run(config: ResolvedConfig) -> io::Result<()> {
    let runner: Arc<dyn CommandRunner> = Arc::new(ShellRunner::from_config(&config));
    let view = ViewConfig {
        separator: SeparatorStyle::from_index(config.separator_color),
        placeholder: config.placeholder.clone(),
    };

    let mut terminal = restore_on_err(ratatui::try_init(), ratatui::restore)?;
    let result = TerminalModeGuard::new().and_then(|_guard| {
        let (tx, rx) = mpsc::channel::<Incoming>();

        // crossterm only reports size changes, so the first layout comes from a query
        let (width, height) = crossterm::terminal::size()?;
        let _ = tx.send(Action::Resize { width, height }.into());

        let _reader = event::spawn_reader(tx.clone())?;
        event_loop(&mut terminal, &rx, &tx, runner, &view)
    });
    ratatui::restore();

    info!("Terminal restored");
    result
}

fn event_loop(
    terminal: &mut ratatui::DefaultTerminal,
    rx: &mpsc::Receiver<Incoming>,
    tx: &mpsc::Sender<Incoming>,
    runner: Arc<dyn CommandRunner>,
    view: &ViewConfig,
) -> io::Result<()> {
    let mut app = App::new();

    loop {
        terminal.draw(|f| draw_ui(f, &app, view))?;

        // Apply everything already queued before the next draw
        let first = rx.recv().map_err(|_| {
            io::Error::new(io::ErrorKind::BrokenPipe, "event queue closed")
        })?;
        for incoming in std::iter::once(first).chain(std::iter::from_fn(|| rx.try_recv().ok())) {
            let action = match incoming {
                Incoming::Action(action) => action,
                Incoming::ReadFailed(e) => return Err(e),
            };
            match update(&mut app, action) {
                Effect::None => {}
                Effect::Quit => return Ok(()),
                Effect::Spawn(line) => spawn_job(runner.clone(), line, tx.clone()),
            }
        }
    }
}
