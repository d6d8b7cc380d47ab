//! Key decoding into logical commands

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Logical command produced by a key press in normal mode
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,
    End,
    SelectUp,
    SelectDown,
    SelectPageUp,
    SelectPageDown,
    SelectToTop,
    SelectToBottom,
    ToggleSide,
    ToggleSelect,
    Activate,
    Cancel,
    Refresh,
    View,
    Edit,
    Copy,
    MakeDirectory,
    Delete,
    Filter,
    SearchNext,
    SearchPrev,
    RepeatSearchNext,
    RepeatSearchPrev,
    Quit,
}

impl Command {
    /// Map a key press; releases and unbound keys give None
    pub fn from_key(key: KeyEvent) -> Option<Command> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);

        if shift {
            match key.code {
                KeyCode::Up => return Some(Command::SelectUp),
                KeyCode::Down => return Some(Command::SelectDown),
                KeyCode::PageUp => return Some(Command::SelectPageUp),
                KeyCode::PageDown => return Some(Command::SelectPageDown),
                KeyCode::Home => return Some(Command::SelectToTop),
                KeyCode::End => return Some(Command::SelectToBottom),
                _ => {}
            }
        }

        if ctrl {
            return match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => Some(Command::Quit),
                KeyCode::Char('r') => Some(Command::Refresh),
                KeyCode::Char('f') => Some(Command::Filter),
                _ => None,
            };
        }

        let command = match key.code {
            KeyCode::Up => Command::Up,
            KeyCode::Down => Command::Down,
            KeyCode::Left => Command::Left,
            KeyCode::Right => Command::Right,
            KeyCode::PageUp => Command::PageUp,
            KeyCode::PageDown => Command::PageDown,
            KeyCode::Home => Command::Home,
            KeyCode::End => Command::End,
            KeyCode::Tab | KeyCode::BackTab => Command::ToggleSide,
            KeyCode::Char(' ') | KeyCode::Insert => Command::ToggleSelect,
            KeyCode::Enter => Command::Activate,
            KeyCode::Esc => Command::Cancel,
            KeyCode::F(3) => Command::View,
            KeyCode::F(4) => Command::Edit,
            KeyCode::F(5) => Command::Copy,
            KeyCode::F(7) => Command::MakeDirectory,
            KeyCode::F(8) | KeyCode::Delete => Command::Delete,
            KeyCode::F(10) => Command::Quit,
            KeyCode::Char('f') => Command::Filter,
            KeyCode::Char('/') => Command::SearchNext,
            KeyCode::Char('?') => Command::SearchPrev,
            KeyCode::Char('n') => Command::RepeatSearchNext,
            KeyCode::Char('N') => Command::RepeatSearchPrev,
            KeyCode::Char('v') => Command::View,
            KeyCode::Char('e') => Command::Edit,
            KeyCode::Char('c') => Command::Copy,
            KeyCode::Char('r') => Command::Refresh,
            KeyCode::Char('q') => Command::Quit,
            _ => return None,
        };
        Some(command)
    }
}
