//! # Core Application Logic
//!
//! This module contains shellpane's state machine.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • App (session state)  │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No terminal I/O.       │
//!                    └───────────┬─────────────┘
//!                                │ Effect::Spawn
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │ ◀── Action::Command ──── │    exec    │
//!     │  Adapter   │       Finished           │  (sh -c)   │
//!     │ (ratatui)  │                          │            │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all session state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`input`]: The command line being edited
//! - [`transcript`]: The scrollable projection of the history
//! - [`config`]: Settings file and overrides

pub mod action;
pub mod config;
pub mod input;
pub mod state;
pub mod transcript;
