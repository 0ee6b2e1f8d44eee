//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::core::action::{Action, Key, update};
use crate::core::state::App;
use crate::exec::CommandRunner;

/// Creates an App that has already received an 80x24 resize.
pub fn ready_app() -> App {
    let mut app = App::new();
    update(&mut app, Action::Resize { width: 80, height: 24 });
    app
}

/// Feeds each char of `text` to the dispatcher as a key press.
pub fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        update(app, Action::Key(Key::Char(c)));
    }
}

/// A runner that answers from a script instead of spawning processes.
/// Each command maps to (delay, output); unknown commands echo themselves.
#[derive(Default)]
pub struct ScriptedRunner {
    script: HashMap<String, (Duration, String)>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, command: &str, delay_ms: u64, output: &str) -> Self {
        self.script.insert(
            command.to_string(),
            (Duration::from_millis(delay_ms), output.to_string()),
        );
        self
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, line: &str) -> String {
        match self.script.get(line) {
            Some((delay, output)) => {
                tokio::time::sleep(*delay).await;
                output.clone()
            }
            None => format!("{line}\n"),
        }
    }
}
