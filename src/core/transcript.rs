//! # Transcript View
//!
//! Scrollable projection of the session history.
//!
//! `TranscriptState` does not own the history. It holds a wrapped copy of the
//! last text handed to [`TranscriptState::set_content`], and the dispatcher
//! must call that after every history mutation.
//!
//! ```text
//! history ──set_content()──▶ rows (wrapped to width)
//!                               │
//!                   offset ─────┤  visible_rows() = rows[offset..offset+height]
//! ```

use unicode_width::UnicodeWidthChar;

use crate::core::action::Key;

const TAB_WIDTH: usize = 8;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranscriptState {
    pub width: u16,
    pub height: u16,
    /// Index of the first visible row
    pub offset: usize,
    /// Raw text last passed to `set_content`, kept for re-wrapping on resize
    content: String,
    /// `content` hard-wrapped to `width`
    rows: Vec<String>,
}

impl TranscriptState {
    pub fn new(width: u16, height: u16) -> Self {
        let mut state = Self {
            width,
            height,
            ..Self::default()
        };
        state.rows = wrap(&state.content, width);
        state
    }

    /// Replace the rendered text. The scroll offset is clamped, not reset.
    pub fn set_content(&mut self, content: &str) {
        self.content.clear();
        self.content.push_str(content);
        self.rows = wrap(&self.content, self.width);
        self.clamp();
    }

    /// Update the geometry. A view sitting at the bottom stays there.
    pub fn resize(&mut self, width: u16, height: u16) {
        let was_at_bottom = self.at_bottom();
        self.width = width;
        self.height = height;
        self.rows = wrap(&self.content, width);
        if was_at_bottom {
            self.goto_bottom();
        } else {
            self.clamp();
        }
    }

    pub fn goto_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    pub fn at_bottom(&self) -> bool {
        self.offset >= self.max_offset()
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    fn max_offset(&self) -> usize {
        self.rows.len().saturating_sub(self.height as usize)
    }

    fn clamp(&mut self) {
        self.offset = self.offset.min(self.max_offset());
    }

    fn scroll_up(&mut self, n: usize) -> bool {
        let before = self.offset;
        self.offset = self.offset.saturating_sub(n);
        before != self.offset
    }

    fn scroll_down(&mut self, n: usize) -> bool {
        let before = self.offset;
        self.offset = (self.offset + n).min(self.max_offset());
        before != self.offset
    }

    /// Apply a scroll key. Returns `true` if the offset moved.
    pub fn apply(&mut self, key: &Key) -> bool {
        let page = (self.height as usize).max(1);
        let half = (page / 2).max(1);
        match key {
            Key::Up => self.scroll_up(1),
            Key::Down => self.scroll_down(1),
            Key::PageUp => self.scroll_up(page),
            Key::PageDown => self.scroll_down(page),
            Key::HalfPageUp => self.scroll_up(half),
            Key::HalfPageDown => self.scroll_down(half),
            _ => false,
        }
    }

    /// The rows inside the current window.
    pub fn visible_rows(&self) -> &[String] {
        let start = self.offset.min(self.rows.len());
        let end = (start + self.height as usize).min(self.rows.len());
        &self.rows[start..end]
    }
}

/// Split on line breaks and hard-wrap each line to `width` display columns.
/// Tabs expand to the next 8-column stop; other control characters are dropped.
/// A width of 0 disables wrapping.
fn wrap(text: &str, width: u16) -> Vec<String> {
    let width = width as usize;
    let mut rows = Vec::new();

    for line in text.split('\n') {
        let mut row = String::new();
        let mut col = 0usize;

        for c in line.chars() {
            if c == '\t' {
                let spaces = TAB_WIDTH - col % TAB_WIDTH;
                for _ in 0..spaces {
                    if width > 0 && col >= width {
                        rows.push(std::mem::take(&mut row));
                        col = 0;
                    }
                    row.push(' ');
                    col += 1;
                }
                continue;
            }
            if c.is_control() {
                continue;
            }
            let w = c.width().unwrap_or(0);
            if width > 0 && col + w > width && col > 0 {
                rows.push(std::mem::take(&mut row));
                col = 0;
            }
            row.push(c);
            col += w;
        }
        rows.push(row);
    }

    rows
}
