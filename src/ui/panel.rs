//! Pane widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

use super::Theme;
use crate::state::snapshot::PaneSnapshot;

/// Renders one pane snapshot inside a bordered block
pub struct PanelWidget<'a> {
    pane: &'a PaneSnapshot,
    theme: &'a Theme,
}

impl<'a> PanelWidget<'a> {
    pub fn new(pane: &'a PaneSnapshot, theme: &'a Theme) -> Self {
        Self { pane, theme }
    }

    fn footer(&self) -> String {
        let mut parts = Vec::new();
        if !self.pane.filter.is_empty() {
            parts.push(format!("filter: {}", self.pane.filter));
        }
        if self.pane.selected > 0 {
            parts.push(format!("{} selected", self.pane.selected));
        }
        parts.push(format!("{} items", self.pane.total));
        format!(" {} ", parts.join(" | "))
    }
}

impl Widget for PanelWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bg = self.theme.panel_background;
        let border_color = if self.pane.active {
            self.theme.panel_border_active
        } else {
            self.theme.panel_border_inactive
        };
        let title_style = if self.pane.active {
            Style::default().fg(ratatui::style::Color::White).bg(self.theme.panel_header_bg)
        } else {
            Style::default().fg(self.theme.panel_header).bg(bg)
        };

        let block = Block::default()
            .title(Line::from(Span::styled(format!(" {} ", self.pane.title), title_style)))
            .title_bottom(Line::from(self.footer()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color).bg(bg))
            .style(Style::default().bg(bg));
        let inner = block.inner(area);
        block.render(area, buf);

        for (offset, row) in self.pane.rows.iter().enumerate() {
            let y = inner.y + offset as u16;
            if y >= inner.y + inner.height {
                break;
            }
            let fg = if row.selected {
                self.theme.file_selected
            } else if row.is_container {
                self.theme.file_directory
            } else {
                self.theme.file_normal
            };
            let mut style = Style::default().fg(fg).bg(bg);
            if row.selected {
                style = style.add_modifier(Modifier::BOLD);
            }
            if row.cursor && self.pane.active {
                style = style.bg(self.theme.cursor_bg);
                if !row.selected {
                    style = style.fg(self.theme.cursor_fg);
                }
                for x in inner.x..inner.x + inner.width {
                    buf[(x, y)].set_style(style);
                }
            }
            buf.set_stringn(inner.x, y, &row.text, inner.width as usize, style);
        }
    }
}
