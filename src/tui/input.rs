//! Input field handling for the terminal user interface.

/// A text input field with cursor position and active state management.
///
/// The cursor is a character index, not a byte index: task titles and memos
/// are routinely non-ASCII, and byte-indexed editing would split a code
/// point mid-character.
#[derive(Clone, Default)]
pub struct InputField {
    pub value: String,
    pub cursor: usize,
    pub active: bool,
}

impl InputField {
    /// Create a new empty input field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an input field with initial text value, cursor at the end.
    pub fn with_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.chars().count(),
            active: false,
        }
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    /// Number of characters in the field.
    pub fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    /// Whether the field holds only whitespace.
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    /// Insert a character at the current cursor position.
    pub fn handle_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    pub fn handle_backspace(&mut self) {
        if self.cursor > 0 {
            let at = self.byte_index(self.cursor - 1);
            self.value.remove(at);
            self.cursor -= 1;
        }
    }

    /// Delete the character at the cursor position.
    pub fn handle_delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    /// Move cursor one position to the left.
    pub fn move_cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Move cursor one position to the right.
    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    /// Empty the field and reset the cursor.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_multibyte_text_without_splitting() {
        let mut field = InputField::with_value("물 주기");
        assert_eq!(field.cursor, 4);
        field.handle_backspace();
        assert_eq!(field.value, "물 주");
        field.handle_char('자');
        assert_eq!(field.value, "물 주자");
    }

    #[test]
    fn inserts_at_cursor() {
        let mut field = InputField::with_value("ab");
        field.move_cursor_left();
        field.handle_char('x');
        assert_eq!(field.value, "axb");
        assert_eq!(field.cursor, 2);
    }

    #[test]
    fn delete_removes_under_cursor() {
        let mut field = InputField::with_value("한글");
        field.cursor = 0;
        field.handle_delete();
        assert_eq!(field.value, "글");
    }

    #[test]
    fn blank_detection_ignores_whitespace() {
        assert!(InputField::with_value("   ").is_blank());
        assert!(!InputField::with_value(" a ").is_blank());
    }
}
