//! Pane data structures and logic

use crate::repo::{Item, ItemConfig};

/// One side's browsing state.
///
/// `filtered` holds indices into `items` in display order; the cursor and
/// window top index into `filtered`. Selection lives on the items
/// themselves, so it survives filter changes.
#[derive(Debug, Clone, Default)]
pub struct PaneView {
    items: Vec<Item>,
    filter: String,
    filtered: Vec<usize>,
    cursor: usize,
    top: usize,
    hscroll: usize,
    /// Location being shown; panes without one ignore selection
    pub location: Option<ItemConfig>,
    /// Border title
    pub title: String,
}

impl PaneView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the listing, keeping the filter and the cursor row
    pub fn set_items(&mut self, items: Vec<Item>, rows: usize) {
        self.items = items;
        self.apply_filter();
        self.clamp(rows);
    }

    pub fn set_filter(&mut self, filter: &str, rows: usize) {
        self.filter = filter.to_string();
        self.apply_filter();
        self.clamp(rows);
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    fn apply_filter(&mut self) {
        if self.filter.is_empty() {
            self.filtered = (0..self.items.len()).collect();
            return;
        }
        let needle = self.filter.to_lowercase();
        self.filtered = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| {
                item.is_parent_link() || item.display_line().to_lowercase().contains(&needle)
            })
            .map(|(idx, _)| idx)
            .collect();
    }

    /// Pull cursor and window back inside the filtered view
    fn clamp(&mut self, rows: usize) {
        if self.filtered.is_empty() {
            self.cursor = 0;
            self.top = 0;
            return;
        }
        self.cursor = self.cursor.min(self.filtered.len() - 1);
        self.top = self.top.min(self.cursor);
        self.adjust_window(rows);
    }

    /// Ensure the window keeps the cursor row visible
    fn adjust_window(&mut self, rows: usize) {
        let rows = rows.max(1);
        if self.cursor < self.top {
            self.top = self.cursor;
        } else if self.cursor >= self.top + rows {
            self.top = self.cursor + 1 - rows;
        }
    }

    /// Number of rows in the filtered view
    pub fn len(&self) -> usize {
        self.filtered.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn top(&self) -> usize {
        self.top
    }

    pub fn hscroll(&self) -> usize {
        self.hscroll
    }

    /// Every item, ignoring the filter
    #[cfg(test)]
    pub fn all_items(&self) -> &[Item] {
        &self.items
    }

    /// Item at a display row
    pub fn item_at(&self, row: usize) -> Option<&Item> {
        self.filtered.get(row).and_then(|&idx| self.items.get(idx))
    }

    /// Item under the cursor, None when the view is empty
    pub fn current(&self) -> Option<&Item> {
        self.item_at(self.cursor)
    }

    /// Filtered items in display order
    pub fn visible_items(&self) -> impl Iterator<Item = &Item> {
        self.filtered.iter().filter_map(|&idx| self.items.get(idx))
    }

    pub fn is_selectable(&self) -> bool {
        self.location.is_some()
    }

    /// Move the cursor by a signed number of rows, clamped to the view
    pub fn move_by(&mut self, delta: isize, rows: usize) {
        if self.filtered.is_empty() {
            return;
        }
        let last = self.filtered.len() as isize - 1;
        self.cursor = (self.cursor as isize).saturating_add(delta).clamp(0, last) as usize;
        self.adjust_window(rows);
    }

    /// Flip the current item's selection. Returns false if nothing changed.
    pub fn toggle_current(&mut self) -> bool {
        if !self.is_selectable() {
            return false;
        }
        let Some(&idx) = self.filtered.get(self.cursor) else {
            return false;
        };
        let item = &mut self.items[idx];
        item.selected = !item.selected;
        true
    }

    /// Assign the negation of the cursor item's selection to every row
    /// between `from` and `to` (inclusive, any order, clamped to the view).
    pub fn select_range(&mut self, from: isize, to: isize) {
        if !self.is_selectable() || self.filtered.is_empty() {
            return;
        }
        let Some(value) = self.current().map(|item| !item.selected) else {
            return;
        };
        let last = self.filtered.len() as isize - 1;
        let lo = from.min(to).clamp(0, last) as usize;
        let hi = from.max(to).clamp(0, last) as usize;
        for &idx in &self.filtered[lo..=hi] {
            self.items[idx].selected = value;
        }
    }

    /// Selected rows of the view, or the current row alone. The ".." entry
    /// is never an operand.
    pub fn selected_or_current(&self) -> Vec<Item> {
        let selected: Vec<Item> = self
            .visible_items()
            .filter(|item| item.selected && !item.is_parent_link())
            .cloned()
            .collect();
        if !selected.is_empty() {
            return selected;
        }
        self.current()
            .filter(|item| !item.is_parent_link())
            .cloned()
            .into_iter()
            .collect()
    }

    pub fn selected_count(&self) -> usize {
        self.visible_items()
            .filter(|item| item.selected && !item.is_parent_link())
            .count()
    }

    /// Move to the next (or previous) row whose display line contains
    /// `text`, case-insensitively. The scan starts next to the cursor and
    /// never wraps. Returns whether the cursor moved.
    pub fn search(&mut self, text: &str, forward: bool, rows: usize) -> bool {
        if text.is_empty() || self.filtered.is_empty() {
            return false;
        }
        let needle = text.to_lowercase();
        let matches = |row: &usize| {
            self.item_at(*row)
                .is_some_and(|item| item.display_line().to_lowercase().contains(&needle))
        };
        let found = if forward {
            (self.cursor + 1..self.filtered.len()).find(matches)
        } else {
            (0..self.cursor).rev().find(matches)
        };
        match found {
            Some(row) if row != self.cursor => {
                self.cursor = row;
                self.adjust_window(rows);
                true
            }
            _ => false,
        }
    }

    /// Put the cursor on the row showing `location`, if present
    pub fn position_on(&mut self, location: &ItemConfig, rows: usize) -> bool {
        let Some(row) = (0..self.filtered.len())
            .find(|&row| self.item_at(row).is_some_and(|item| &item.config == location))
        else {
            return false;
        };
        self.cursor = row;
        self.adjust_window(rows);
        true
    }

    /// Shift the horizontal offset, bounded by the longest visible line
    pub fn scroll_horizontal(&mut self, delta: isize, rows: usize, cols: usize) {
        let widest = (self.top..(self.top + rows.max(1)).min(self.filtered.len()))
            .filter_map(|row| self.item_at(row))
            .map(|item| item.display_line().chars().count())
            .max()
            .unwrap_or(0);
        let max = widest.saturating_sub(cols) as isize;
        self.hscroll = (self.hscroll as isize).saturating_add(delta).clamp(0, max.max(0)) as usize;
    }

    /// Reset per-location state before showing a new location
    pub fn reset_position(&mut self) {
        self.cursor = 0;
        self.top = 0;
        self.hscroll = 0;
    }
}
