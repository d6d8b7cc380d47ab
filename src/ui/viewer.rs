//! File viewer widget

use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

use super::Theme;
use crate::state::snapshot::ViewerSnapshot;

/// Full-screen read-only view of a fetched file
pub struct FileViewer<'a> {
    view: &'a ViewerSnapshot,
    theme: &'a Theme,
}

impl<'a> FileViewer<'a> {
    pub fn new(view: &'a ViewerSnapshot, theme: &'a Theme) -> Self {
        Self { view, theme }
    }

    pub fn content_height(area: Rect) -> usize {
        area.height.saturating_sub(2) as usize // -1 header, -1 footer
    }
}

impl Widget for FileViewer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 {
            return;
        }
        let width = area.width as usize;
        let header = Style::default()
            .bg(self.theme.viewer_header_bg)
            .fg(self.theme.viewer_header_fg);
        let content = Style::default()
            .bg(self.theme.viewer_content_bg)
            .fg(self.theme.viewer_content_fg);

        for y in area.y..area.y + area.height {
            let style = if y == area.y || y == area.y + area.height - 1 {
                header
            } else {
                content
            };
            for x in area.x..area.x + area.width {
                buf[(x, y)].set_char(' ').set_style(style);
            }
        }

        buf.set_stringn(area.x + 1, area.y, &self.view.title, width.saturating_sub(2), header);

        let height = Self::content_height(area);
        for (offset, line) in self.view.lines.iter().enumerate() {
            if offset >= height {
                break;
            }
            // Tabs would desync cell widths
            let line = line.replace('\t', "    ");
            buf.set_stringn(area.x, area.y + 1 + offset as u16, &line, width, content);
        }

        let last = (self.view.scroll + height).min(self.view.total);
        let footer = format!(
            " Lines {}-{} of {}   Esc/q/F3 close ",
            (self.view.scroll + 1).min(self.view.total),
            last,
            self.view.total
        );
        buf.set_stringn(area.x, area.y + area.height - 1, &footer, width, header);
    }
}
