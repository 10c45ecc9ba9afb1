//! Frame layout for the timeline viewer.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::help::HelpOverlay;
use super::state::ViewState;
use crate::media::MediaAsset;
use crate::theme::Theme;
use crate::timeline::{HeaderStatus, TimelineWidget, MIN_TIMELINE_HEIGHT};

/// Draw one frame. Returns the screen cells of the scrubbable track.
pub fn render<A: MediaAsset>(frame: &mut Frame, state: &ViewState<A>, theme: &Theme) -> Rect {
    let [panel, timeline] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(MIN_TIMELINE_HEIGHT),
    ])
    .areas(frame.area());

    let lines: Vec<Line> = state
        .summary_lines()
        .into_iter()
        .map(Line::from)
        .chain(std::iter::once(Line::from("")))
        .chain(std::iter::once(Line::styled(
            "Press ? for help",
            theme.text_secondary_style(),
        )))
        .collect();
    frame.render_widget(
        Paragraph::new(lines)
            .style(theme.text_style())
            .block(Block::default().borders(Borders::ALL).title(" Asset ")),
        panel,
    );

    let status = state.header_status();
    let header = status.as_ref().map(|(text, warning)| {
        if *warning {
            HeaderStatus::Warning(text)
        } else {
            HeaderStatus::Info(text)
        }
    });
    let widget = TimelineWidget::new(state.waveform(), state.scheduler().thumbnails(), theme)
        .current_time(state.current_time)
        .duration(state.duration())
        .status(header);
    frame.render_widget(widget, timeline);

    if state.show_help {
        frame.render_widget(HelpOverlay::new(theme), frame.area());
    }

    TimelineWidget::track_area(timeline)
}

/// Create a centered layout with the given constraints.
///
/// Returns the center area that can be used for content.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical_layout[1])[1]
}
