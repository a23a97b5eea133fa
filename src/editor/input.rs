use ropey::Rope;
use unicode_width::UnicodeWidthStr;

use crate::grid::Direction;

/// The live text of an inline cell input.
///
/// Single line, backed by a rope. The caret is a char index. The whole
/// value can be selected at once, the way an HTML input behaves after
/// `select()`: the next insertion replaces it, the next caret move
/// collapses it.
#[derive(Clone)]
pub struct InputBuffer {
    rope: Rope,
    caret: usize,
    all_selected: bool,
}

impl InputBuffer {
    /// A buffer holding `text` with every character selected. An empty
    /// buffer counts as selected too.
    pub fn selected(text: &str) -> Self {
        let rope = Rope::from_str(&single_line(text));
        let caret = rope.len_chars();
        Self {
            rope,
            caret,
            all_selected: true,
        }
    }

    /// A buffer holding only `seed`, caret after it.
    pub fn seeded(seed: char) -> Self {
        let mut buf = Self::selected("");
        buf.insert_char(seed);
        buf
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Caret position as a char index.
    pub const fn caret(&self) -> usize {
        self.caret
    }

    pub const fn is_all_selected(&self) -> bool {
        self.all_selected
    }

    /// Display columns between the start of the text and the caret.
    pub fn caret_column(&self) -> usize {
        self.rope.slice(..self.caret).to_string().width()
    }

    /// Insert a character at the caret, replacing a full selection.
    pub fn insert_char(&mut self, ch: char) {
        if ch == '\n' || ch == '\r' {
            return;
        }
        self.clear_selection_for_replace();
        self.rope.insert_char(self.caret, ch);
        self.caret += 1;
    }

    /// Delete the character before the caret (Backspace).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_back(&mut self) -> bool {
        if self.all_selected {
            return self.clear_selection_for_replace();
        }
        if self.caret == 0 {
            return false;
        }
        self.rope.remove(self.caret - 1..self.caret);
        self.caret -= 1;
        true
    }

    /// Delete the character at the caret (Delete).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_forward(&mut self) -> bool {
        if self.all_selected {
            return self.clear_selection_for_replace();
        }
        if self.caret >= self.rope.len_chars() {
            return false;
        }
        self.rope.remove(self.caret..=self.caret);
        true
    }

    /// Move the caret one character. Up and Down do nothing in a single-line
    /// input.
    pub fn move_caret(&mut self, direction: Direction) {
        match direction {
            Direction::Left => {
                if self.all_selected {
                    self.all_selected = false;
                    self.caret = 0;
                } else {
                    self.caret = self.caret.saturating_sub(1);
                }
            }
            Direction::Right => {
                if self.all_selected {
                    self.all_selected = false;
                    self.caret = self.rope.len_chars();
                } else {
                    self.caret = (self.caret + 1).min(self.rope.len_chars());
                }
            }
            Direction::Up | Direction::Down => {}
        }
    }

    pub const fn move_home(&mut self) {
        self.all_selected = false;
        self.caret = 0;
    }

    pub fn move_end(&mut self) {
        self.all_selected = false;
        self.caret = self.rope.len_chars();
    }

    fn clear_selection_for_replace(&mut self) -> bool {
        if !self.all_selected {
            return false;
        }
        self.all_selected = false;
        self.rope = Rope::new();
        self.caret = 0;
        true
    }
}

fn single_line(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}

impl std::fmt::Debug for InputBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputBuffer")
            .field("text", &self.text())
            .field("caret", &self.caret)
            .field("all_selected", &self.all_selected)
            .finish()
    }
}
