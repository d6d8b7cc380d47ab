use super::snapshot::ViewerSnapshot;

/// Content shown by the file viewer
#[derive(Clone, Debug)]
pub struct ViewerState {
    pub title: String,
    pub lines: Vec<String>,
    pub scroll: usize,
}

impl ViewerState {
    /// Decode fetched bytes (lossy UTF-8) into lines
    pub fn from_bytes(title: impl Into<String>, data: &[u8]) -> Self {
        Self {
            title: title.into(),
            lines: String::from_utf8_lossy(data).lines().map(String::from).collect(),
            scroll: 0,
        }
    }

    fn max_scroll(&self, rows: usize) -> usize {
        self.lines.len().saturating_sub(rows)
    }

    /// Scroll by a signed number of lines, keeping the last page full
    pub fn scroll_by(&mut self, delta: isize, rows: usize) {
        let max = self.max_scroll(rows) as isize;
        self.scroll = (self.scroll as isize).saturating_add(delta).clamp(0, max) as usize;
    }

    pub fn snapshot(&self, rows: usize) -> ViewerSnapshot {
        ViewerSnapshot {
            title: self.title.clone(),
            lines: self.lines.iter().skip(self.scroll).take(rows).cloned().collect(),
            scroll: self.scroll,
            total: self.lines.len(),
        }
    }
}

/// Application mode
#[derive(Clone, Debug, Default)]
pub enum Mode {
    #[default]
    Normal,
    Viewing(ViewerState),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_clamps_to_last_page() {
        let data = (0..10).map(|i| format!("line {}\n", i)).collect::<String>();
        let mut viewer = ViewerState::from_bytes("/f", data.as_bytes());
        assert_eq!(viewer.lines.len(), 10);
        viewer.scroll_by(100, 4);
        assert_eq!(viewer.scroll, 6);
        viewer.scroll_by(-2, 4);
        let snap = viewer.snapshot(4);
        assert_eq!(snap.lines, vec!["line 4", "line 5", "line 6", "line 7"]);
        viewer.scroll_by(-100, 4);
        assert_eq!(viewer.scroll, 0);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let viewer = ViewerState::from_bytes("/bin", &[0x66, 0xff, 0x0a, 0x67]);
        assert_eq!(viewer.lines, vec!["f\u{fffd}", "g"]);
    }
}
