use crate::util::text::{display_col, next_grapheme_boundary, prev_grapheme_boundary};

/// Single-line editable text with a grapheme-aware cursor (byte offset)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    text: String,
    cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        TextInput::default()
    }

    /// Input holding `text` with the cursor at the end
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        TextInput { text, cursor }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Trimmed value as an owned string
    pub fn value(&self) -> String {
        self.text.trim().to_string()
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Cursor position in terminal cells
    pub fn cursor_col(&self) -> usize {
        display_col(&self.text, self.cursor)
    }

    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn insert_char(&mut self, c: char) {
        if c == '\n' || c == '\r' {
            return;
        }
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Insert pasted text; newlines become spaces
    pub fn insert_str(&mut self, s: &str) {
        let clean = s.replace(['\n', '\r'], " ");
        self.text.insert_str(self.cursor, &clean);
        self.cursor += clean.len();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.text, self.cursor) {
            self.text.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = next_grapheme_boundary(&self.text, self.cursor) {
            self.text.replace_range(self.cursor..next, "");
        }
    }

    pub fn left(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.text, self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn right(&mut self) {
        if let Some(next) = next_grapheme_boundary(&self.text, self.cursor) {
            self.cursor = next;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.text.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_and_cursor_movement() {
        let mut input = TextInput::new();
        for c in "helo".chars() {
            input.insert_char(c);
        }
        input.left();
        input.insert_char('l');
        assert_eq!(input.as_str(), "hello");
        input.home();
        input.delete();
        assert_eq!(input.as_str(), "ello");
        input.end();
        input.backspace();
        assert_eq!(input.as_str(), "ell");
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn backspace_removes_whole_grapheme() {
        let mut input = TextInput::with_text("cafe\u{0301}");
        input.backspace();
        assert_eq!(input.as_str(), "caf");
    }

    #[test]
    fn edges_are_noops() {
        let mut input = TextInput::new();
        input.backspace();
        input.delete();
        input.left();
        input.right();
        assert_eq!(input.as_str(), "");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn newlines_are_not_inserted() {
        let mut input = TextInput::new();
        input.insert_char('\n');
        input.insert_str("a\nb");
        assert_eq!(input.as_str(), "a b");
    }

    #[test]
    fn blank_and_trimmed_value() {
        assert!(TextInput::with_text("   ").is_blank());
        assert_eq!(TextInput::with_text("  x ").value(), "x");
        assert_eq!(TextInput::with_text("你好").cursor_col(), 4);
    }
}
