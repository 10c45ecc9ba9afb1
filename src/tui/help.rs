//! Help overlay for the timeline viewer.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use super::ui::centered_rect;
use crate::theme::Theme;

/// Help text lines for the help overlay.
pub const HELP_LINES: &[&str] = &[
    "",
    "  Scrubbing",
    "    Click/drag   Seek on the timeline",
    "    <-/->        Seek -/+ nudge step",
    "    Home/End     Go to start / end",
    "",
    "  Asset",
    "    n            Load a different source",
    "",
    "  General",
    "    ?            Show this help",
    "    q/Esc        Quit",
    "",
    "  Press any key to close",
];

pub struct HelpOverlay<'a> {
    theme: &'a Theme,
}

impl<'a> HelpOverlay<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl Widget for HelpOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(60, 70, area);
        Clear.render(popup, buf);

        let lines: Vec<Line> = HELP_LINES.iter().map(|l| Line::from(*l)).collect();
        Paragraph::new(lines)
            .style(self.theme.text_style())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Help ")
                    .title_style(self.theme.accent_bold_style()),
            )
            .render(popup, buf);
    }
}
