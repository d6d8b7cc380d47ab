//! Navigation, selection, filtering and search over the two panes

use crate::repo::Item;

use super::pane::PaneView;
use super::snapshot::{DialogSnapshot, PaneSnapshot, RowSnapshot, Snapshot, ViewerSnapshot};
use super::status::StatusLog;
use super::Side;

/// Browsing state for both panes.
///
/// Every operation is total: on an empty pane movement and selection are
/// no-ops. Navigation and selection act on the active pane.
#[derive(Debug, Clone)]
pub struct Model {
    panes: [PaneView; 2],
    active: Side,
    /// Visible item rows per pane
    rows: usize,
    /// Visible text columns per pane
    cols: usize,
    pub status: StatusLog,
    pub last_search: String,
}

impl Model {
    pub fn new(status_history: usize) -> Self {
        Self {
            panes: [PaneView::new(), PaneView::new()],
            active: Side::Left,
            rows: 1,
            cols: 1,
            status: StatusLog::new(status_history),
            last_search: String::new(),
        }
    }

    pub fn active(&self) -> Side {
        self.active
    }

    pub fn pane(&self, side: Side) -> &PaneView {
        &self.panes[side.index()]
    }

    pub fn pane_mut(&mut self, side: Side) -> &mut PaneView {
        &mut self.panes[side.index()]
    }

    pub fn active_pane(&self) -> &PaneView {
        self.pane(self.active)
    }

    fn active_pane_mut(&mut self) -> &mut PaneView {
        let side = self.active;
        self.pane_mut(side)
    }

    #[cfg(test)]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Update the viewport and re-clamp both panes to it
    pub fn set_viewport(&mut self, rows: usize, cols: usize) {
        self.rows = rows.max(1);
        self.cols = cols.max(1);
        let rows = self.rows;
        for pane in &mut self.panes {
            let filter = pane.filter().to_string();
            pane.set_filter(&filter, rows);
        }
    }

    /// Rows moved by a page key
    fn page(&self) -> isize {
        (self.rows.saturating_sub(1)).max(1) as isize
    }

    pub fn set_items(&mut self, side: Side, items: Vec<Item>) {
        let rows = self.rows;
        self.pane_mut(side).set_items(items, rows);
    }

    pub fn set_filter(&mut self, side: Side, text: &str) {
        let rows = self.rows;
        self.pane_mut(side).set_filter(text, rows);
    }

    fn move_active(&mut self, delta: isize) {
        let rows = self.rows;
        self.active_pane_mut().move_by(delta, rows);
    }

    pub fn nav_up(&mut self) {
        self.move_active(-1);
    }

    pub fn nav_down(&mut self) {
        self.move_active(1);
    }

    pub fn nav_pg_up(&mut self) {
        self.move_active(-self.page());
    }

    pub fn nav_pg_down(&mut self) {
        self.move_active(self.page());
    }

    pub fn nav_top(&mut self) {
        let len = self.active_pane().len() as isize;
        self.move_active(-len);
    }

    pub fn nav_bottom(&mut self) {
        let len = self.active_pane().len() as isize;
        self.move_active(len);
    }

    pub fn toggle_current(&mut self) -> bool {
        self.active_pane_mut().toggle_current()
    }

    /// Toggle the current row, then step up
    pub fn select_and_move_up(&mut self) {
        self.toggle_current();
        self.nav_up();
    }

    /// Toggle the current row, then step down
    pub fn select_and_move_down(&mut self) {
        self.toggle_current();
        self.nav_down();
    }

    fn select_to(&mut self, boundary: isize) {
        let cursor = self.active_pane().cursor() as isize;
        self.active_pane_mut().select_range(cursor, boundary);
    }

    pub fn sel_pg_up(&mut self) {
        let cursor = self.active_pane().cursor() as isize;
        self.select_to(cursor - self.page());
    }

    pub fn sel_pg_down(&mut self) {
        let cursor = self.active_pane().cursor() as isize;
        self.select_to(cursor + self.page());
    }

    pub fn sel_to_top(&mut self) {
        self.select_to(0);
    }

    pub fn sel_to_bottom(&mut self) {
        let last = self.active_pane().len() as isize - 1;
        self.select_to(last);
    }

    /// Remember `text` and move to the next match below the cursor
    pub fn search_next(&mut self, text: &str) -> bool {
        self.last_search = text.to_string();
        let rows = self.rows;
        self.active_pane_mut().search(text, true, rows)
    }

    /// Remember `text` and move to the previous match above the cursor
    pub fn search_prev(&mut self, text: &str) -> bool {
        self.last_search = text.to_string();
        let rows = self.rows;
        self.active_pane_mut().search(text, false, rows)
    }

    pub fn toggle_side(&mut self) {
        self.active = self.active.other();
    }

    pub fn selected_or_current(&self, side: Side) -> Vec<Item> {
        self.pane(side).selected_or_current()
    }

    pub fn scroll_left(&mut self) {
        let (rows, cols) = (self.rows, self.cols);
        self.active_pane_mut().scroll_horizontal(-1, rows, cols);
    }

    pub fn scroll_right(&mut self) {
        let (rows, cols) = (self.rows, self.cols);
        self.active_pane_mut().scroll_horizontal(1, rows, cols);
    }

    /// Put the cursor of `side` on the row showing `location`
    pub fn position_on(&mut self, side: Side, location: &crate::repo::ItemConfig) -> bool {
        let rows = self.rows;
        self.pane_mut(side).position_on(location, rows)
    }

    fn pane_snapshot(&self, side: Side) -> PaneSnapshot {
        let pane = self.pane(side);
        let end = (pane.top() + self.rows).min(pane.len());
        let rows = (pane.top()..end)
            .filter_map(|row| pane.item_at(row).map(|item| (row, item)))
            .map(|(row, item)| RowSnapshot {
                text: item.display_line().chars().skip(pane.hscroll()).collect(),
                selected: item.selected,
                cursor: row == pane.cursor(),
                is_container: item.item_type().is_container(),
            })
            .collect();
        PaneSnapshot {
            title: pane.title.clone(),
            filter: pane.filter().to_string(),
            rows,
            active: side == self.active,
            selected: pane.selected_count(),
            total: pane.len(),
        }
    }

    /// Frame for the renderer
    pub fn snapshot(
        &self,
        dialog: Option<DialogSnapshot>,
        viewer: Option<ViewerSnapshot>,
    ) -> Snapshot {
        Snapshot {
            panes: [
                self.pane_snapshot(Side::Left),
                self.pane_snapshot(Side::Right),
            ],
            status: self.status.last().unwrap_or_default().to_string(),
            dialog,
            viewer,
        }
    }
}
