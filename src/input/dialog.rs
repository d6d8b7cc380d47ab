//! Modal single-line input sessions (filter, search, names, confirmations)

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::TextField;
use crate::state::snapshot::DialogSnapshot;

/// Lifecycle of an input session
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DialogState {
    Idle,
    Editing,
    Submitted,
    Canceled,
}

impl DialogState {
    pub fn is_finished(self) -> bool {
        matches!(self, DialogState::Submitted | DialogState::Canceled)
    }
}

/// Text buffer with a character cursor and a terminal state.
///
/// Edits are only accepted while `Editing`; once submitted or canceled the
/// session is frozen and the caller reads the outcome.
#[derive(Clone, Debug)]
pub struct InputDialogSession {
    prompt: String,
    text: String,
    cursor: usize,
    masked: bool,
    state: DialogState,
}

impl InputDialogSession {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            text: String::new(),
            cursor: 0,
            masked: false,
            state: DialogState::Idle,
        }
    }

    /// Pre-fill the buffer, cursor at the end
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self.cursor = TextField::char_len(&self.text);
        self
    }

    /// Render the buffer as a same-length mask
    #[cfg(test)]
    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    pub fn start(&mut self) {
        if self.state == DialogState::Idle {
            self.state = DialogState::Editing;
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> DialogState {
        self.state
    }

    fn editing(&self) -> bool {
        self.state == DialogState::Editing
    }

    /// Apply one key and return the resulting state
    pub fn handle_key(&mut self, key: KeyEvent) -> DialogState {
        if !self.editing() {
            return self.state;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Enter => self.submit(),
            KeyCode::Esc => self.cancel(),
            KeyCode::Char('c') if ctrl => self.cancel(),
            KeyCode::Char('a') if ctrl => self.home(),
            KeyCode::Char('e') if ctrl => self.end(),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.left(),
            KeyCode::Right => self.right(),
            KeyCode::Home => self.home(),
            KeyCode::End => self.end(),
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                self.insert(c)
            }
            _ => {}
        }
        self.state
    }

    pub fn insert(&mut self, c: char) {
        if self.editing() {
            TextField::insert_char(&mut self.text, &mut self.cursor, c);
        }
    }

    pub fn backspace(&mut self) {
        if self.editing() {
            TextField::backspace(&mut self.text, &mut self.cursor);
        }
    }

    pub fn delete(&mut self) {
        if self.editing() {
            TextField::delete(&mut self.text, self.cursor);
        }
    }

    pub fn left(&mut self) {
        if self.editing() {
            TextField::left(&mut self.cursor);
        }
    }

    pub fn right(&mut self) {
        if self.editing() {
            TextField::right(&self.text, &mut self.cursor);
        }
    }

    pub fn home(&mut self) {
        if self.editing() {
            TextField::home(&mut self.cursor);
        }
    }

    pub fn end(&mut self) {
        if self.editing() {
            TextField::end(&self.text, &mut self.cursor);
        }
    }

    pub fn submit(&mut self) {
        if self.editing() {
            self.state = DialogState::Submitted;
        }
    }

    pub fn cancel(&mut self) {
        if self.editing() {
            self.state = DialogState::Canceled;
        }
    }

    /// The true buffer contents, masked or not
    #[cfg(test)]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[cfg(test)]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Text to render: the buffer, or one '*' per character when masked
    pub fn display_text(&self) -> String {
        if self.masked {
            "*".repeat(TextField::char_len(&self.text))
        } else {
            self.text.clone()
        }
    }

    /// Submitted text, None when canceled or still open
    pub fn into_result(self) -> Option<String> {
        (self.state == DialogState::Submitted).then_some(self.text)
    }

    pub fn snapshot(&self) -> DialogSnapshot {
        DialogSnapshot {
            prompt: self.prompt.clone(),
            text: self.display_text(),
            cursor: self.cursor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(session: &mut InputDialogSession, text: &str) {
        for c in text.chars() {
            session.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_idle_ignores_edits() {
        let mut session = InputDialogSession::new("Filter:");
        assert_eq!(session.handle_key(key(KeyCode::Char('x'))), DialogState::Idle);
        session.submit();
        assert_eq!(session.state(), DialogState::Idle);
        assert_eq!(session.text(), "");
    }

    #[test]
    fn test_edit_and_submit() {
        let mut session = InputDialogSession::new("Search:");
        session.start();
        type_str(&mut session, "helo");
        session.handle_key(key(KeyCode::Left));
        session.handle_key(key(KeyCode::Char('l')));
        assert_eq!(session.text(), "hello");
        assert_eq!(session.cursor(), 4);

        session.handle_key(key(KeyCode::Home));
        session.handle_key(key(KeyCode::Delete));
        session.handle_key(key(KeyCode::End));
        session.handle_key(key(KeyCode::Backspace));
        assert_eq!(session.text(), "ell");

        assert_eq!(session.handle_key(key(KeyCode::Enter)), DialogState::Submitted);
        type_str(&mut session, "zz");
        assert_eq!(session.into_result(), Some("ell".to_string()));
    }

    #[test]
    fn test_cancel_discards() {
        let mut session = InputDialogSession::new("Filter:").with_text("old");
        session.start();
        assert_eq!(session.cursor(), 3);
        type_str(&mut session, "er");
        assert_eq!(session.handle_key(key(KeyCode::Esc)), DialogState::Canceled);
        assert!(session.state().is_finished());
        assert_eq!(session.into_result(), None);
    }

    #[test]
    fn test_cursor_clamped() {
        let mut session = InputDialogSession::new("Name:");
        session.start();
        session.left();
        assert_eq!(session.cursor(), 0);
        type_str(&mut session, "ab");
        session.right();
        assert_eq!(session.cursor(), 2);
    }

    #[test]
    fn test_masked_display() {
        let mut session = InputDialogSession::new("Password:").masked();
        session.start();
        type_str(&mut session, "sécret");
        assert_eq!(session.text(), "sécret");
        assert_eq!(session.display_text(), "******");
        let snap = session.snapshot();
        assert_eq!(snap.text, "******");
        assert_eq!(snap.cursor, 6);
    }

    #[test]
    fn test_control_keys() {
        let mut session = InputDialogSession::new("Name:").with_text("abc");
        session.start();
        session.handle_key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL));
        assert_eq!(session.cursor(), 0);
        assert_eq!(session.text(), "abc");
        let state = session.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(state, DialogState::Canceled);
    }
}
