//! Text input field handling.

use unicode_width::UnicodeWidthStr;
use zeroize::Zeroize;

/// State for a text input field.
///
/// The cursor counts characters, not bytes, so accented input (`ç`, `ã`)
/// edits cleanly.
#[derive(Clone, Debug, Default)]
pub struct TextInput {
    /// The current text content.
    content: String,
    /// Cursor position (character index).
    cursor: usize,
    /// Render as bullets instead of the real content.
    masked: bool,
}

impl TextInput {
    /// Creates a new empty text input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an input whose content is hidden when rendered.
    pub fn masked() -> Self {
        let mut input = Self::default();
        input.masked = true;
        input
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map_or(self.content.len(), |(i, _)| i)
    }

    fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    /// Inserts a character at the cursor position.
    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.content.insert(at, c);
        self.cursor += 1;
    }

    /// Deletes the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    /// Deletes the character at the cursor position (delete).
    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Returns the current content as a string slice.
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// What the field shows on screen.
    pub fn display(&self) -> String {
        if self.masked {
            "•".repeat(self.char_len())
        } else {
            self.content.clone()
        }
    }

    /// Terminal columns between the start of the field and the cursor.
    pub fn cursor_width(&self) -> usize {
        if self.masked {
            return self.cursor;
        }
        let end = self.byte_index(self.cursor);
        self.content[..end].width()
    }
}

impl Drop for TextInput {
    fn drop(&mut self) {
        if self.masked {
            self.content.zeroize();
        }
    }
}
