use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use unicode_width::UnicodeWidthChar;

pub const DEFAULT_CHAR_LIMIT: usize = 64;
pub const BLINK_INTERVAL: Duration = Duration::from_millis(530);

/// Single-line, cursor-aware text field used for the task name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    value: Vec<char>,
    /// cursor position in chars, 0..=value.len()
    cursor: usize,
    char_limit: usize,
}

impl Default for TextInput {
    fn default() -> Self {
        Self::new()
    }
}

impl TextInput {
    pub fn new() -> Self {
        Self {
            value: Vec::new(),
            cursor: 0,
            char_limit: DEFAULT_CHAR_LIMIT,
        }
    }

    pub fn with_char_limit(mut self, limit: usize) -> Self {
        self.char_limit = limit;
        self.value.truncate(limit);
        self.cursor = self.cursor.min(self.value.len());
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.chars().take(self.char_limit).collect();
        self.cursor = self.value.len();
        self
    }

    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// The name a session would start with; None for blank input
    pub fn submission(&self) -> Option<String> {
        let value = self.value();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Display column of the cursor, accounting for wide glyphs
    pub fn cursor_column(&self) -> usize {
        self.value[..self.cursor]
            .iter()
            .map(|c| c.width().unwrap_or(0))
            .sum()
    }

    /// Applies an editing key. Returns true if the value or cursor changed.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Char('a') if ctrl => self.move_to(0),
            KeyCode::Char('e') if ctrl => self.move_to(self.value.len()),
            KeyCode::Char('u') if ctrl => {
                if self.cursor == 0 {
                    return false;
                }
                self.value.drain(..self.cursor);
                self.cursor = 0;
                true
            }
            KeyCode::Char('w') if ctrl => self.delete_word_backward(),
            KeyCode::Char(_) if ctrl || alt => false,
            KeyCode::Char(c) => self.insert(c),
            KeyCode::Backspace => {
                if self.cursor == 0 {
                    return false;
                }
                self.cursor -= 1;
                self.value.remove(self.cursor);
                true
            }
            KeyCode::Delete => {
                if self.cursor >= self.value.len() {
                    return false;
                }
                self.value.remove(self.cursor);
                true
            }
            KeyCode::Left => self.move_to(self.cursor.saturating_sub(1)),
            KeyCode::Right => self.move_to((self.cursor + 1).min(self.value.len())),
            KeyCode::Home => self.move_to(0),
            KeyCode::End => self.move_to(self.value.len()),
            _ => false,
        }
    }

    fn insert(&mut self, c: char) -> bool {
        if c.is_control() || self.value.len() >= self.char_limit {
            return false;
        }
        self.value.insert(self.cursor, c);
        self.cursor += 1;
        true
    }

    fn move_to(&mut self, pos: usize) -> bool {
        let changed = pos != self.cursor;
        self.cursor = pos;
        changed
    }

    fn delete_word_backward(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let mut start = self.cursor;
        while start > 0 && self.value[start - 1].is_whitespace() {
            start -= 1;
        }
        while start > 0 && !self.value[start - 1].is_whitespace() {
            start -= 1;
        }
        self.value.drain(start..self.cursor);
        self.cursor = start;
        true
    }
}

/// Cursor blink phase, derived from the time since the last keystroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorBlink {
    interval: Duration,
}

impl Default for CursorBlink {
    fn default() -> Self {
        Self::new(BLINK_INTERVAL)
    }
}

impl CursorBlink {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn visible(&self, since_reset: Duration) -> bool {
        if self.interval.is_zero() {
            return true;
        }
        (since_reset.as_nanos() / self.interval.as_nanos()) % 2 == 0
    }
}
