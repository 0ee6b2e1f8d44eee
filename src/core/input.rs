//! # Input Field
//!
//! Single-line command buffer with a hard character cap.
//!
//! `InputState` is a plain record. Editing happens through [`InputState::apply`],
//! which takes a [`Key`] and reports whether anything changed. Keys the field
//! does not understand (Enter, scroll keys) are ignored here; the dispatcher
//! decides what they mean.
//!
//! The cursor is a byte offset into `buffer`, always on a char boundary.

use unicode_width::UnicodeWidthChar;

use crate::core::action::Key;

/// Maximum number of characters the buffer may hold.
pub const CHAR_LIMIT: usize = 512;

/// Text shown before the buffer.
pub const PROMPT: &str = "> ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputState {
    pub buffer: String,
    /// Byte offset into `buffer` (0..=buffer.len())
    pub cursor: usize,
    /// Visible columns for the text, excluding the prompt
    pub width: u16,
    /// First visible char index when the text is wider than `width`
    pub scroll: usize,
    pub focused: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            width: 0,
            scroll: 0,
            focused: true,
        }
    }

    pub fn value(&self) -> &str {
        &self.buffer
    }

    pub fn char_count(&self) -> usize {
        self.buffer.chars().count()
    }

    /// Empty the buffer and reset the cursor (used after a commit).
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.scroll = 0;
    }

    pub fn set_width(&mut self, width: u16) {
        self.width = width;
        self.update_scroll();
    }

    /// Apply an editing key. Returns `true` if the buffer or cursor moved.
    pub fn apply(&mut self, key: &Key) -> bool {
        let changed = match key {
            Key::Char(c) => self.insert_str(&c.to_string()),
            Key::Paste(text) => self.insert_str(&sanitize_paste(text)),
            Key::Backspace => {
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.delete_range(prev, self.cursor)
            }
            Key::Delete => {
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.delete_range(self.cursor, next)
            }
            Key::Left => self.move_to(prev_char_boundary(&self.buffer, self.cursor)),
            Key::Right => self.move_to(next_char_boundary(&self.buffer, self.cursor)),
            Key::Home => self.move_to(0),
            Key::End => self.move_to(self.buffer.len()),
            Key::WordLeft => self.move_to(prev_word_boundary(&self.buffer, self.cursor)),
            Key::WordRight => self.move_to(next_word_boundary(&self.buffer, self.cursor)),
            Key::DeleteWordBack => {
                let start = prev_word_boundary(&self.buffer, self.cursor);
                self.delete_range(start, self.cursor)
            }
            Key::DeleteToEnd => self.delete_range(self.cursor, self.buffer.len()),
            Key::DeleteToStart => self.delete_range(0, self.cursor),
            _ => false,
        };
        if changed {
            self.update_scroll();
        }
        changed
    }

    /// Insert at the cursor, keeping at most `CHAR_LIMIT` chars in the buffer.
    /// Text that does not fit is dropped.
    fn insert_str(&mut self, text: &str) -> bool {
        let room = CHAR_LIMIT.saturating_sub(self.char_count());
        if room == 0 || text.is_empty() {
            return false;
        }
        let end = text
            .char_indices()
            .nth(room)
            .map(|(i, _)| i)
            .unwrap_or(text.len());
        let accepted = &text[..end];
        self.buffer.insert_str(self.cursor, accepted);
        self.cursor += accepted.len();
        true
    }

    fn delete_range(&mut self, start: usize, end: usize) -> bool {
        if start >= end {
            return false;
        }
        self.buffer.drain(start..end);
        self.cursor = start;
        true
    }

    fn move_to(&mut self, pos: usize) -> bool {
        if pos == self.cursor {
            return false;
        }
        self.cursor = pos;
        true
    }

    /// Cursor position counted in chars.
    pub fn cursor_col(&self) -> usize {
        self.buffer[..self.cursor].chars().count()
    }

    /// Keep the cursor inside the visible window. Widths are display columns,
    /// so a wide char takes two cells.
    fn update_scroll(&mut self) {
        let width = self.width as usize;
        if width == 0 {
            self.scroll = 0;
            return;
        }
        let chars: Vec<char> = self.buffer.chars().collect();
        let col = self.cursor_col();

        // The cursor cell itself needs a column after the text before it
        if col < self.scroll {
            self.scroll = col;
        }
        while self.scroll < col && display_width(&chars[self.scroll..col]) >= width {
            self.scroll += 1;
        }
        // Shrinking text (deletes) can leave empty space on the right
        while self.scroll > 0 && display_width(&chars[self.scroll - 1..]) < width {
            self.scroll -= 1;
        }
    }

    /// The slice of the buffer that fits in the field, and the cursor's
    /// display column relative to its start.
    pub fn visible(&self) -> (String, u16) {
        let width = self.width as usize;
        let chars: Vec<char> = self.buffer.chars().collect();
        let col = self.cursor_col();
        if width == 0 {
            return (self.buffer.clone(), display_width(&chars[..col]) as u16);
        }

        let mut text = String::new();
        let mut used = 0;
        for &c in &chars[self.scroll..] {
            let w = c.width().unwrap_or(0);
            if used + w > width {
                break;
            }
            text.push(c);
            used += w;
        }
        let cursor = display_width(&chars[self.scroll..col.max(self.scroll)]);
        (text, cursor as u16)
    }
}

fn display_width(chars: &[char]) -> usize {
    chars.iter().map(|c| c.width().unwrap_or(0)).sum()
}

/// Line breaks become spaces; other control characters are dropped.
fn sanitize_paste(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push(' ');
            }
            '\n' | '\t' => out.push(' '),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Skip non-word chars backwards, then word chars (readline `backward-word`).
fn prev_word_boundary(text: &str, pos: usize) -> usize {
    let mut chars = text[..pos].char_indices().rev().peekable();

    while chars.peek().is_some_and(|&(_, c)| !is_word_char(c)) {
        chars.next();
    }
    let mut boundary = chars.peek().map(|&(i, _)| i).unwrap_or(0);
    while let Some(&(i, c)) = chars.peek() {
        if !is_word_char(c) {
            break;
        }
        boundary = i;
        chars.next();
    }
    boundary
}

/// Skip non-word chars forwards, then word chars (readline `forward-word`).
fn next_word_boundary(text: &str, pos: usize) -> usize {
    let mut chars = text[pos..].char_indices().peekable();

    while chars.peek().is_some_and(|&(_, c)| !is_word_char(c)) {
        chars.next();
    }
    while chars.peek().is_some_and(|&(_, c)| is_word_char(c)) {
        chars.next();
    }
    chars.peek().map(|&(i, _)| pos + i).unwrap_or(text.len())
}
