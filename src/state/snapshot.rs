//! Read-only view of the state handed to the renderer

use super::Side;

/// One visible pane row
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowSnapshot {
    /// Display line, already shifted by the horizontal offset
    pub text: String,
    pub selected: bool,
    pub cursor: bool,
    pub is_container: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaneSnapshot {
    pub title: String,
    pub filter: String,
    pub rows: Vec<RowSnapshot>,
    pub active: bool,
    /// Selected count, shown in the border when non-zero
    pub selected: usize,
    pub total: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DialogSnapshot {
    pub prompt: String,
    pub text: String,
    /// Cursor position in characters within `text`
    pub cursor: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewerSnapshot {
    pub title: String,
    pub lines: Vec<String>,
    pub scroll: usize,
    pub total: usize,
}

/// Everything needed to draw one frame
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub panes: [PaneSnapshot; 2],
    pub status: String,
    pub dialog: Option<DialogSnapshot>,
    pub viewer: Option<ViewerSnapshot>,
}

impl Snapshot {
    pub fn pane(&self, side: Side) -> &PaneSnapshot {
        &self.panes[side.index()]
    }
}
