//! UI components
//!
//! The application never touches the terminal directly: it hands a
//! [`Snapshot`] to a [`Frontend`] and asks it for keys.

pub mod dialog;
mod dialog_helpers;
pub mod panel;
pub mod status;
pub mod terminal;
pub mod theme;
pub mod viewer;

pub use dialog::InputDialog;
pub use panel::PanelWidget;
pub use status::StatusBar;
pub use theme::Theme;
pub use viewer::FileViewer;

use std::io;

use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use crate::state::{Side, Snapshot};

/// Usable sizes derived from the terminal size
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    /// Item rows inside one pane
    pub pane_rows: usize,
    /// Text columns inside one pane
    pub pane_cols: usize,
    /// Content rows of the full-screen viewer
    pub viewer_rows: usize,
}

impl Viewport {
    pub fn from_size(width: u16, height: u16) -> Self {
        let panes_height = height.saturating_sub(1);
        Self {
            pane_rows: (panes_height.saturating_sub(2) as usize).max(1),
            pane_cols: ((width / 2).saturating_sub(2) as usize).max(1),
            viewer_rows: FileViewer::content_height(Rect::new(0, 0, width, height)).max(1),
        }
    }
}

/// Terminal side of the application: drawing, keys, and handing the
/// terminal over to child processes.
pub trait Frontend {
    fn viewport(&self) -> io::Result<Viewport>;

    fn draw(&mut self, snapshot: &Snapshot) -> io::Result<()>;

    /// Next key press, or None when the poll interval passed without one
    fn next_key(&mut self) -> io::Result<Option<KeyEvent>>;

    /// Leave the TUI so an external program can use the terminal
    fn suspend(&mut self) -> io::Result<()>;

    fn resume(&mut self) -> io::Result<()>;

    /// Whether an OS shutdown signal arrived
    fn interrupted(&self) -> bool;
}

/// Screen areas: left pane, right pane, status line
fn layout(area: Rect) -> (Rect, Rect, Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(area.width / 2), Constraint::Min(0)])
        .split(rows[0]);
    (panes[0], panes[1], rows[1])
}

/// Draw one frame from a snapshot
pub fn render(frame: &mut Frame, snapshot: &Snapshot, theme: &Theme) {
    let area = frame.area();

    if let Some(view) = &snapshot.viewer {
        frame.render_widget(FileViewer::new(view, theme), area);
        return;
    }

    let (left, right, status) = layout(area);
    frame.render_widget(PanelWidget::new(snapshot.pane(Side::Left), theme), left);
    frame.render_widget(PanelWidget::new(snapshot.pane(Side::Right), theme), right);
    frame.render_widget(StatusBar::new(&snapshot.status, theme), status);

    if let Some(dialog) = &snapshot.dialog {
        frame.render_widget(InputDialog::new(dialog, theme), area);
        if let Some(position) = InputDialog::cursor_position(area, dialog) {
            frame.set_cursor_position(position);
        }
    }
}
