//! Status line widget

use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

use super::Theme;

/// One-line bar showing the newest status message
pub struct StatusBar<'a> {
    message: &'a str,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(message: &'a str, theme: &'a Theme) -> Self {
        Self { message, theme }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 {
            return;
        }
        let style = Style::default().bg(self.theme.status_bg).fg(self.theme.status_fg);
        for x in area.x..area.x + area.width {
            buf[(x, area.y)].set_char(' ').set_style(style);
        }
        let hint = " F3 View  F4 Edit  F5 Copy  F7 Mkdir  F8 Delete  F10 Quit ";
        let width = area.width as usize;
        let hint_len = hint.chars().count();
        let message_width = if width > hint_len + 10 {
            buf.set_string(area.x + (width - hint_len) as u16, area.y, hint, style);
            width - hint_len
        } else {
            width
        };
        buf.set_stringn(area.x + 1, area.y, self.message, message_width.saturating_sub(1), style);
    }
}
