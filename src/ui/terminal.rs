//! Crossterm-backed frontend

use std::io::{self, stdout, Stdout};
use std::panic;
use std::time::Duration;

use crossterm::{
    event::{Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use super::{render, Frontend, Theme, Viewport};
use crate::input::InputSource;
use crate::state::Snapshot;

/// Set up panic hook to restore terminal on panic
pub fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// Initialize the terminal for TUI mode
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

/// Restore terminal to normal mode
pub fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Frontend drawing with ratatui and reading keys through [`InputSource`]
pub struct TuiFrontend {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    input: InputSource,
    theme: Theme,
}

impl TuiFrontend {
    pub fn new(poll_interval: Duration) -> io::Result<Self> {
        let terminal = setup_terminal()?;
        Ok(Self {
            terminal,
            input: InputSource::terminal(poll_interval),
            theme: Theme::default(),
        })
    }
}

impl Frontend for TuiFrontend {
    fn viewport(&self) -> io::Result<Viewport> {
        let size = self.terminal.size()?;
        Ok(Viewport::from_size(size.width, size.height))
    }

    fn draw(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        let theme = &self.theme;
        self.terminal.draw(|frame| render(frame, snapshot, theme))?;
        Ok(())
    }

    fn next_key(&mut self) -> io::Result<Option<crossterm::event::KeyEvent>> {
        match self.input.next_event()? {
            Some(Event::Key(key)) if key.kind != KeyEventKind::Release => Ok(Some(key)),
            Some(Event::Resize(..)) => {
                self.terminal.autoresize()?;
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    fn suspend(&mut self) -> io::Result<()> {
        self.input.pause();
        restore_terminal()?;
        self.terminal.show_cursor()
    }

    fn resume(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen)?;
        self.terminal.clear()
    }

    fn interrupted(&self) -> bool {
        crate::signal::shutdown_requested()
    }
}
