//! Single-line text editor for the filter box.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Default)]
pub struct LineInput {
    text: String,
    /// Cursor position in chars, not bytes.
    cursor: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    Edited,
    Moved,
    Submitted,
    Cleared,
    Ignored,
}

impl LineInput {
    pub fn read(&mut self, key: KeyEvent) -> InputOutcome {
        match key.code {
            KeyCode::Enter => InputOutcome::Submitted,
            KeyCode::Esc => {
                self.clear();
                InputOutcome::Cleared
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_to(self.cursor.saturating_sub(1)),
            KeyCode::Right => self.move_to(self.cursor + 1),
            KeyCode::Home => self.move_to(0),
            KeyCode::End => self.move_to(self.len()),
            KeyCode::Char(chr)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.text.insert(self.byte_pos(), chr);
                self.cursor += 1;
                InputOutcome::Edited
            }
            _ => InputOutcome::Ignored,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    fn backspace(&mut self) -> InputOutcome {
        if self.cursor == 0 {
            return InputOutcome::Ignored;
        }
        self.cursor -= 1;
        self.text.remove(self.byte_pos());
        InputOutcome::Edited
    }

    fn delete(&mut self) -> InputOutcome {
        if self.cursor >= self.len() {
            return InputOutcome::Ignored;
        }
        self.text.remove(self.byte_pos());
        InputOutcome::Edited
    }

    fn move_to(&mut self, pos: usize) -> InputOutcome {
        self.cursor = pos.min(self.len());
        InputOutcome::Moved
    }

    fn byte_pos(&self) -> usize {
        self.text
            .char_indices()
            .nth(self.cursor)
            .map(|(byte_idx, _)| byte_idx)
            .unwrap_or(self.text.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(input: &mut LineInput, s: &str) {
        for chr in s.chars() {
            input.read(key(KeyCode::Char(chr)));
        }
    }

    #[test]
    fn typing_appends_and_moves_cursor() {
        let mut input = LineInput::default();
        type_str(&mut input, "chess");
        assert_eq!(input.text(), "chess");
        assert_eq!(input.cursor(), 5);
    }

    #[test]
    fn inserts_at_cursor() {
        let mut input = LineInput::default();
        type_str(&mut input, "cess");
        input.read(key(KeyCode::Home));
        input.read(key(KeyCode::Right));
        type_str(&mut input, "h");
        assert_eq!(input.text(), "chess");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn backspace_removes_char_before_cursor() {
        let mut input = LineInput::default();
        type_str(&mut input, "chesss");
        input.read(key(KeyCode::Left));
        assert_eq!(input.read(key(KeyCode::Backspace)), InputOutcome::Edited);
        assert_eq!(input.text(), "chess");
        assert_eq!(input.cursor(), 4);
    }

    #[test]
    fn backspace_at_start_is_ignored() {
        let mut input = LineInput::default();
        type_str(&mut input, "a");
        input.read(key(KeyCode::Home));
        assert_eq!(input.read(key(KeyCode::Backspace)), InputOutcome::Ignored);
        assert_eq!(input.text(), "a");
    }

    #[test]
    fn delete_removes_char_under_cursor() {
        let mut input = LineInput::default();
        type_str(&mut input, "xchess");
        input.read(key(KeyCode::Home));
        input.read(key(KeyCode::Delete));
        assert_eq!(input.text(), "chess");
        assert_eq!(input.read(key(KeyCode::End)), InputOutcome::Moved);
        assert_eq!(input.read(key(KeyCode::Delete)), InputOutcome::Ignored);
    }

    #[test]
    fn handles_multibyte_chars() {
        let mut input = LineInput::default();
        type_str(&mut input, "Españ");
        input.read(key(KeyCode::Left));
        input.read(key(KeyCode::Backspace));
        assert_eq!(input.text(), "Espñ");
        type_str(&mut input, "a");
        assert_eq!(input.text(), "Españ");
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut input = LineInput::default();
        type_str(&mut input, "ab");
        input.read(key(KeyCode::Right));
        assert_eq!(input.cursor(), 2);
        input.read(key(KeyCode::Left));
        input.read(key(KeyCode::Left));
        input.read(key(KeyCode::Left));
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn escape_clears_and_enter_submits() {
        let mut input = LineInput::default();
        type_str(&mut input, "golf");
        assert_eq!(input.read(key(KeyCode::Enter)), InputOutcome::Submitted);
        assert_eq!(input.text(), "golf");
        assert_eq!(input.read(key(KeyCode::Esc)), InputOutcome::Cleared);
        assert_eq!(input.text(), "");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn control_chords_are_not_typed() {
        let mut input = LineInput::default();
        let outcome = input.read(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL));
        assert_eq!(outcome, InputOutcome::Ignored);
        assert_eq!(input.text(), "");
    }

    #[test]
    fn shifted_chars_are_typed() {
        let mut input = LineInput::default();
        input.read(KeyEvent::new(KeyCode::Char('U'), KeyModifiers::SHIFT));
        assert_eq!(input.text(), "U");
    }
}
