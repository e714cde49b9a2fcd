//! The plain-text buffer behind the script entry screen.

use crate::segments::char_to_byte_idx;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScriptInput {
    text: String,
    /// Caret position in chars.
    cursor: usize,
    preferred_column: Option<usize>,
}

impl ScriptInput {
    pub fn new(text: impl Into<String>) -> Self {
        let text = normalize_line_endings(&text.into());
        let cursor = text.chars().count();
        Self {
            text,
            cursor,
            preferred_column: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn insert_char(&mut self, ch: char) {
        let byte_idx = char_to_byte_idx(&self.text, self.cursor);
        self.text.insert(byte_idx, ch);
        self.cursor += 1;
        self.preferred_column = None;
    }

    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    /// Inserts pasted text, converting `\r\n` and lone `\r` to `\n`.
    pub fn insert_str(&mut self, pasted: &str) {
        let normalized = normalize_line_endings(pasted);
        let byte_idx = char_to_byte_idx(&self.text, self.cursor);
        self.text.insert_str(byte_idx, &normalized);
        self.cursor += normalized.chars().count();
        self.preferred_column = None;
    }

    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.remove_at_cursor();
        true
    }

    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.len() {
            return false;
        }
        self.remove_at_cursor();
        true
    }

    fn remove_at_cursor(&mut self) {
        let start = char_to_byte_idx(&self.text, self.cursor);
        let end = char_to_byte_idx(&self.text, self.cursor + 1);
        self.text.drain(start..end);
        self.preferred_column = None;
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
        self.preferred_column = None;
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.len());
        self.preferred_column = None;
    }

    pub fn move_home(&mut self) {
        let (line, _) = self.line_and_column();
        self.cursor = self.line_start_offset(line);
        self.preferred_column = None;
    }

    pub fn move_end(&mut self) {
        let (line, _) = self.line_and_column();
        self.cursor = self.line_start_offset(line) + self.line_length(line);
        self.preferred_column = None;
    }

    pub fn move_up(&mut self) {
        self.move_vertical(-1);
    }

    pub fn move_down(&mut self) {
        self.move_vertical(1);
    }

    fn move_vertical(&mut self, delta: isize) {
        let (line, column) = self.line_and_column();
        let target = line as isize + delta;
        if target < 0 || target as usize >= self.line_count() {
            return;
        }
        let target = target as usize;
        let column = *self.preferred_column.get_or_insert(column);
        self.cursor = self.line_start_offset(target) + column.min(self.line_length(target));
    }

    /// Logical (unwrapped) line and column of the caret.
    pub fn line_and_column(&self) -> (usize, usize) {
        let mut line = 0;
        let mut column = 0;
        for ch in self.text.chars().take(self.cursor) {
            if ch == '\n' {
                line += 1;
                column = 0;
            } else {
                column += 1;
            }
        }
        (line, column)
    }

    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }

    fn line_length(&self, line: usize) -> usize {
        self.lines()
            .nth(line)
            .map(|text| text.chars().count())
            .unwrap_or(0)
    }

    fn line_start_offset(&self, line: usize) -> usize {
        self.lines()
            .take(line)
            .map(|text| text.chars().count() + 1)
            .sum()
    }
}

fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}
