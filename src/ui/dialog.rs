//! Modal input dialog overlay

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use super::dialog_helpers::DialogRenderer;
use super::Theme;
use crate::state::snapshot::DialogSnapshot;

const DIALOG_WIDTH: u16 = 60;
const DIALOG_HEIGHT: u16 = 7;
const MIN_WIDTH: u16 = 20;

/// Row of the input field relative to the dialog top
const INPUT_ROW: u16 = 3;

/// Centered single-line input box
pub struct InputDialog<'a> {
    dialog: &'a DialogSnapshot,
    theme: &'a Theme,
}

impl<'a> InputDialog<'a> {
    pub fn new(dialog: &'a DialogSnapshot, theme: &'a Theme) -> Self {
        Self { dialog, theme }
    }

    fn area(screen: Rect) -> Option<Rect> {
        DialogRenderer::center_dialog(screen, DIALOG_WIDTH, DIALOG_HEIGHT, MIN_WIDTH)
    }

    fn input_width(dialog_area: Rect) -> usize {
        dialog_area.width.saturating_sub(4) as usize
    }

    /// Terminal cursor position inside the input field
    pub fn cursor_position(screen: Rect, dialog: &DialogSnapshot) -> Option<(u16, u16)> {
        let area = Self::area(screen)?;
        let width = Self::input_width(area);
        let skip = DialogRenderer::input_scroll(dialog.cursor, width);
        Some((area.x + 2 + (dialog.cursor - skip) as u16, area.y + INPUT_ROW))
    }
}

impl Widget for InputDialog<'_> {
    fn render(self, screen: Rect, buf: &mut Buffer) {
        let Some(area) = Self::area(screen) else {
            return;
        };
        let bg = Style::default().bg(self.theme.dialog_bg).fg(self.theme.file_normal);
        DialogRenderer::fill_background(area, buf, bg);
        DialogRenderer::draw_border(area, buf, bg.fg(self.theme.dialog_border));
        DialogRenderer::draw_title(
            area,
            buf,
            " Input ",
            bg.fg(self.theme.dialog_title).add_modifier(Modifier::BOLD),
        );

        let content_x = area.x + 2;
        let width = Self::input_width(area);
        buf.set_stringn(content_x, area.y + 2, &self.dialog.prompt, width, bg);
        DialogRenderer::draw_input_field(
            buf,
            content_x,
            area.y + INPUT_ROW,
            width,
            &self.dialog.text,
            self.dialog.cursor,
            Style::default()
                .bg(self.theme.dialog_input_bg)
                .fg(self.theme.dialog_input_fg),
        );
        DialogRenderer::draw_help(area, buf, "Enter confirm  Esc cancel", bg);
    }
}
