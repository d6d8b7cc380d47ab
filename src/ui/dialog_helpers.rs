//! Dialog rendering helper utilities.

use ratatui::{buffer::Buffer, layout::Rect, style::Style};

/// Helper functions for dialog rendering.
pub struct DialogRenderer;

impl DialogRenderer {
    /// Calculate centered dialog position and return the dialog area.
    /// Returns None if the area is too small.
    pub fn center_dialog(area: Rect, width: u16, height: u16, min_width: u16) -> Option<Rect> {
        if area.width < min_width || area.height < height {
            return None;
        }

        let dialog_width = width.min(area.width.saturating_sub(4));
        let x = area.x + (area.width.saturating_sub(dialog_width)) / 2;
        let y = area.y + (area.height.saturating_sub(height)) / 2;

        Some(Rect {
            x,
            y,
            width: dialog_width,
            height,
        })
    }

    /// Fill dialog area with background color.
    pub fn fill_background(area: Rect, buf: &mut Buffer, style: Style) {
        for row in area.y..area.y + area.height {
            for col in area.x..area.x + area.width {
                buf[(col, row)].set_char(' ').set_style(style);
            }
        }
    }

    /// Draw dialog border using box-drawing characters.
    pub fn draw_border(area: Rect, buf: &mut Buffer, style: Style) {
        if area.width < 2 || area.height < 2 {
            return;
        }
        let right = area.x + area.width - 1;
        let bottom = area.y + area.height - 1;

        buf[(area.x, area.y)].set_char('┌').set_style(style);
        buf[(right, area.y)].set_char('┐').set_style(style);
        buf[(area.x, bottom)].set_char('└').set_style(style);
        buf[(right, bottom)].set_char('┘').set_style(style);
        for col in area.x + 1..right {
            buf[(col, area.y)].set_char('─').set_style(style);
            buf[(col, bottom)].set_char('─').set_style(style);
        }
        for row in area.y + 1..bottom {
            buf[(area.x, row)].set_char('│').set_style(style);
            buf[(right, row)].set_char('│').set_style(style);
        }
    }

    /// Draw centered title on the top border.
    pub fn draw_title(area: Rect, buf: &mut Buffer, title: &str, style: Style) {
        let len = title.chars().count() as u16;
        let title_x = area.x + (area.width.saturating_sub(len)) / 2;
        buf.set_stringn(title_x, area.y, title, area.width as usize, style);
    }

    /// First character shown in an input field of `width` so the cursor
    /// stays visible
    pub fn input_scroll(cursor: usize, width: usize) -> usize {
        let width = width.max(1);
        (cursor + 1).saturating_sub(width)
    }

    /// Draw an input field scrolled to keep the cursor visible.
    pub fn draw_input_field(
        buf: &mut Buffer,
        x: u16,
        y: u16,
        width: usize,
        text: &str,
        cursor: usize,
        style: Style,
    ) {
        for col in x..x + width as u16 {
            buf[(col, y)].set_char(' ').set_style(style);
        }
        let skip = Self::input_scroll(cursor, width);
        let visible: String = text.chars().skip(skip).take(width).collect();
        buf.set_string(x, y, &visible, style);
    }

    /// Draw help text centered at the bottom of dialog.
    pub fn draw_help(area: Rect, buf: &mut Buffer, text: &str, style: Style) {
        let len = text.chars().count() as u16;
        let help_x = area.x + (area.width.saturating_sub(len)) / 2;
        buf.set_stringn(help_x, area.y + area.height - 2, text, area.width as usize, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_dialog() {
        let area = Rect { x: 0, y: 0, width: 80, height: 24 };
        let result = DialogRenderer::center_dialog(area, 40, 10, 20);
        assert!(result.is_some());
        let dialog = result.unwrap();
        assert_eq!(dialog.width, 40);
        assert_eq!(dialog.height, 10);
        assert_eq!(dialog.x, 20); // (80 - 40) / 2
        assert_eq!(dialog.y, 7);  // (24 - 10) / 2
    }

    #[test]
    fn test_center_dialog_too_small() {
        let area = Rect { x: 0, y: 0, width: 15, height: 24 };
        let result = DialogRenderer::center_dialog(area, 40, 10, 20);
        assert!(result.is_none());
    }

    #[test]
    fn test_input_scroll_follows_cursor() {
        assert_eq!(DialogRenderer::input_scroll(3, 10), 0);
        assert_eq!(DialogRenderer::input_scroll(9, 10), 0);
        assert_eq!(DialogRenderer::input_scroll(10, 10), 1);
        assert_eq!(DialogRenderer::input_scroll(25, 10), 16);
    }

    #[test]
    fn test_draw_input_field_shows_tail() {
        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);
        DialogRenderer::draw_input_field(&mut buf, 0, 0, 5, "abcdefgh", 8, Style::default());
        let line: String = (0..5).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert_eq!(line, "efgh ");
    }
}
