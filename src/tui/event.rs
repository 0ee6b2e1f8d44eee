use std::io;
use std::sync::mpsc::Sender;
use std::thread;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, info};

use crate::core::action::{Action, Key};

/// Everything the event loop can receive on its single queue.
#[derive(Debug)]
pub enum Incoming {
    Action(Action),
    /// The terminal stopped delivering events.
    ReadFailed(io::Error),
}

impl From<Action> for Incoming {
    fn from(action: Action) -> Self {
        Incoming::Action(action)
    }
}

/// Translate a crossterm event into a core action.
pub fn translate(event: Event) -> Option<Action> {
    match event {
        Event::Key(key_event) => translate_key(key_event).map(Action::Key),
        Event::Resize(width, height) => Some(Action::Resize { width, height }),
        Event::Paste(text) => Some(Action::Key(Key::Paste(text))),
        _ => None,
    }
}

fn translate_key(key_event: KeyEvent) -> Option<Key> {
    if key_event.kind == KeyEventKind::Release {
        return None;
    }
    debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);

    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key_event.modifiers.contains(KeyModifiers::ALT);

    match (key_event.code, ctrl, alt) {
        (KeyCode::Char('c'), true, _) => Some(Key::Interrupt),
        // Readline-style editing
        (KeyCode::Char('a'), true, _) => Some(Key::Home),
        (KeyCode::Char('e'), true, _) => Some(Key::End),
        (KeyCode::Char('b'), true, _) => Some(Key::Left),
        (KeyCode::Char('f'), true, _) => Some(Key::Right),
        (KeyCode::Char('h'), true, _) => Some(Key::Backspace),
        (KeyCode::Char('d'), true, _) => Some(Key::Delete),
        (KeyCode::Char('w'), true, _) => Some(Key::DeleteWordBack),
        (KeyCode::Char('k'), true, _) => Some(Key::DeleteToEnd),
        (KeyCode::Char('u'), true, _) => Some(Key::DeleteToStart),
        (KeyCode::Char('b'), false, true) | (KeyCode::Left, true, _) | (KeyCode::Left, _, true) => {
            Some(Key::WordLeft)
        }
        (KeyCode::Char('f'), false, true)
        | (KeyCode::Right, true, _)
        | (KeyCode::Right, _, true) => Some(Key::WordRight),
        (KeyCode::Backspace, _, true) => Some(Key::DeleteWordBack),
        // Transcript scrolling
        (KeyCode::PageUp, true, _) => Some(Key::HalfPageUp),
        (KeyCode::PageDown, true, _) => Some(Key::HalfPageDown),
        (KeyCode::Up, _, _) => Some(Key::Up),
        (KeyCode::Down, _, _) => Some(Key::Down),
        (KeyCode::PageUp, _, _) => Some(Key::PageUp),
        (KeyCode::PageDown, _, _) => Some(Key::PageDown),
        // Regular key handling
        (KeyCode::Enter, _, _) => Some(Key::Enter),
        (KeyCode::Char(c), false, false) => Some(Key::Char(c)),
        (KeyCode::Backspace, _, _) => Some(Key::Backspace),
        (KeyCode::Delete, _, _) => Some(Key::Delete),
        (KeyCode::Left, _, _) => Some(Key::Left),
        (KeyCode::Right, _, _) => Some(Key::Right),
        (KeyCode::Home, _, _) => Some(Key::Home),
        (KeyCode::End, _, _) => Some(Key::End),
        _ => None,
    }
}

/// Read terminal events on a dedicated thread and post them to the loop's queue.
///
/// The thread ends when reading fails or the receiver is gone.
pub fn spawn_reader(tx: Sender<Incoming>) -> io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("terminal-events".to_string())
        .spawn(move || {
            loop {
                let incoming = match event::read() {
                    Ok(event) => match translate(event) {
                        Some(action) => Incoming::Action(action),
                        None => continue,
                    },
                    Err(e) => Incoming::ReadFailed(e),
                };
                let failed = matches!(incoming, Incoming::ReadFailed(_));
                if tx.send(incoming).is_err() || failed {
                    info!("Terminal event reader stopping");
                    return;
                }
            }
        })
}
