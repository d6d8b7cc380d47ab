//! Colors used by the widgets

use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct Theme {
    // Panes
    pub panel_border_active: Color,
    pub panel_border_inactive: Color,
    pub panel_header: Color,
    pub panel_header_bg: Color,
    pub panel_background: Color,

    // Rows
    pub file_normal: Color,
    pub file_directory: Color,
    pub file_selected: Color,
    pub cursor_bg: Color,
    pub cursor_fg: Color,

    // Status line
    pub status_bg: Color,
    pub status_fg: Color,

    // Viewer
    pub viewer_header_bg: Color,
    pub viewer_header_fg: Color,
    pub viewer_content_bg: Color,
    pub viewer_content_fg: Color,

    // Dialogs
    pub dialog_bg: Color,
    pub dialog_border: Color,
    pub dialog_title: Color,
    pub dialog_input_bg: Color,
    pub dialog_input_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        let teal = Color::Rgb(0, 150, 136);
        let gold = Color::Rgb(200, 170, 100);
        let light_gray = Color::Rgb(171, 178, 191);
        let charcoal = Color::Rgb(58, 58, 58);

        Self {
            panel_border_active: teal,
            panel_border_inactive: Color::Rgb(160, 160, 160),
            panel_header: gold,
            panel_header_bg: Color::Rgb(95, 135, 135),
            panel_background: charcoal,

            file_normal: Color::Rgb(220, 220, 220),
            file_directory: Color::Rgb(171, 175, 135),
            file_selected: Color::Rgb(255, 220, 80),
            cursor_bg: Color::Rgb(0, 95, 95),
            cursor_fg: Color::Rgb(220, 220, 220),

            status_bg: Color::Rgb(45, 45, 45),
            status_fg: light_gray,

            viewer_header_bg: teal,
            viewer_header_fg: Color::Black,
            viewer_content_bg: charcoal,
            viewer_content_fg: light_gray,

            dialog_bg: Color::Rgb(40, 50, 60),
            dialog_border: teal,
            dialog_title: gold,
            dialog_input_bg: Color::Rgb(0, 95, 95),
            dialog_input_fg: Color::White,
        }
    }
}
