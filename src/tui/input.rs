//! Single-line text buffer with a cursor

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Cursor marker drawn inside input fields.
pub const CURSOR: char = '│';

/// Editable line shared by the picker filter and the prompt.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InputState {
    /// Current text
    pub buffer: String,

    /// Cursor position within `buffer` (byte offset)
    pub cursor: usize,
}

impl InputState {
    /// Create an input seeded with `content`, cursor at the end.
    #[must_use]
    pub fn with_text(content: &str) -> Self {
        Self {
            buffer: content.to_string(),
            cursor: content.len(),
        }
    }

    /// Clear the input buffer and reset cursor
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    /// Delete the previous word (like many shell/readline editors).
    ///
    /// This removes any whitespace immediately before the cursor, then removes
    /// the contiguous non-whitespace "word" segment.
    pub fn delete_word(&mut self) {
        if self.cursor == 0 {
            return;
        }

        let before = &self.buffer[..self.cursor];
        let word_end = before.trim_end().len();
        let start = before[..word_end]
            .char_indices()
            .rev()
            .find(|(_, ch)| ch.is_whitespace())
            .map_or(0, |(index, ch)| index + ch.len_utf8());

        self.buffer.drain(start..self.cursor);
        self.cursor = start;
    }

    /// Insert a character at the cursor position
    pub fn insert_char(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete the character before the cursor (backspace)
    pub fn backspace(&mut self) {
        if let Some((prev, _)) = self.buffer[..self.cursor].char_indices().next_back() {
            self.buffer.remove(prev);
            self.cursor = prev;
        }
    }

    /// Delete the character at the cursor (delete key)
    pub fn delete(&mut self) {
        if self.cursor < self.buffer.len() {
            self.buffer.remove(self.cursor);
        }
    }

    /// Move cursor left by one character
    pub fn cursor_left(&mut self) {
        self.cursor = self.buffer[..self.cursor]
            .char_indices()
            .next_back()
            .map_or(0, |(i, _)| i);
    }

    /// Move cursor right by one character
    pub fn cursor_right(&mut self) {
        self.cursor = self.buffer[self.cursor..]
            .char_indices()
            .nth(1)
            .map_or(self.buffer.len(), |(i, _)| self.cursor + i);
    }

    /// Text with the cursor marker inserted.
    #[must_use]
    pub fn text_with_cursor(&self) -> String {
        let (before, after) = self.buffer.split_at(self.cursor);
        format!("{before}{CURSOR}{after}")
    }

    /// Apply an editing key.
    ///
    /// Returns `true` if the buffer text changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let before = self.buffer.len();
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('w') if ctrl => self.delete_word(),
            KeyCode::Char('u') if ctrl => self.clear(),
            KeyCode::Char('a') if ctrl => self.cursor = 0,
            KeyCode::Char('e') if ctrl => self.cursor = self.buffer.len(),
            KeyCode::Char(c) if !ctrl => self.insert_char(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.cursor_left(),
            KeyCode::Right => self.cursor_right(),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.buffer.len(),
            _ => return false,
        }
        before != self.buffer.len()
    }
}
