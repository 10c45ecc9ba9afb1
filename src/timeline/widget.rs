//! Timeline widget
//!
//! Paints the header timecode, time ruler, waveform track, thumbnail track,
//! playhead and footer into a ratatui buffer. Geometry comes from
//! `TimelineLayout`; this module only maps fractions onto cells.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::layout::{column_of, TileContent, TimelineLayout};
use super::{format_timecode, Waveform};
use crate::sampler::ThumbnailSample;
use crate::theme::Theme;

/// Width of the track label column ("Aud", "Vid").
pub const GUTTER_WIDTH: u16 = 4;

/// Rows the widget needs inside its border.
const MIN_INNER_HEIGHT: u16 = 7;

/// Rows the widget needs including its border.
pub const MIN_TIMELINE_HEIGHT: u16 = MIN_INNER_HEIGHT + 2;

const PLACEHOLDER_LABEL: &str = "Video Track";
const LEGEND: &[(&str, &str)] = &[("←/→", "nudge"), ("drag", "scrub"), ("?", "help"), ("q", "quit")];

/// Eighth blocks, index 0 is empty.
const LEVELS: [&str; 9] = [" ", "▁", "▂", "▃", "▄", "▅", "▆", "▇", "█"];

/// Text shown at the right of the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStatus<'a> {
    Info(&'a str),
    Warning(&'a str),
}

/// Screen regions of the timeline inside its border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineAreas {
    pub header: Rect,
    pub ruler: Rect,
    pub waveform: Rect,
    pub video: Rect,
    pub footer: Rect,
    pub audio_label: Rect,
    pub video_label: Rect,
}

impl TimelineAreas {
    pub fn split(inner: Rect) -> Self {
        let [header, ruler_row, waveform_row, video_row, _, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(inner);

        let gutter = |row: Rect| {
            let [label, track] =
                Layout::horizontal([Constraint::Length(GUTTER_WIDTH), Constraint::Min(0)])
                    .areas(row);
            (label, track)
        };
        let (_, ruler) = gutter(ruler_row);
        let (audio_label, waveform) = gutter(waveform_row);
        let (video_label, video) = gutter(video_row);

        Self {
            header,
            ruler,
            waveform,
            video,
            footer,
            audio_label,
            video_label,
        }
    }

    /// Cells a pointer can scrub over: ruler through the video track.
    pub fn track(&self) -> Rect {
        self.ruler.union(self.waveform).union(self.video)
    }
}

/// The timeline for one asset.
pub struct TimelineWidget<'a> {
    waveform: &'a Waveform,
    thumbnails: &'a [ThumbnailSample],
    theme: &'a Theme,
    current_time: f64,
    duration: f64,
    status: Option<HeaderStatus<'a>>,
}

impl<'a> TimelineWidget<'a> {
    pub fn new(waveform: &'a Waveform, thumbnails: &'a [ThumbnailSample], theme: &'a Theme) -> Self {
        Self {
            waveform,
            thumbnails,
            theme,
            current_time: 0.0,
            duration: 0.0,
            status: None,
        }
    }

    pub fn current_time(mut self, secs: f64) -> Self {
        self.current_time = secs;
        self
    }

    pub fn duration(mut self, secs: f64) -> Self {
        self.duration = secs;
        self
    }

    pub fn status(mut self, status: Option<HeaderStatus<'a>>) -> Self {
        self.status = status;
        self
    }

    /// Scrubbable region when the widget is rendered into `area`.
    pub fn track_area(area: Rect) -> Rect {
        TimelineAreas::split(Self::block().inner(area)).track()
    }

    fn block() -> Block<'static> {
        Block::default().borders(Borders::ALL).title(" Timeline ")
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let timecode = Line::from(vec![
            Span::styled(format_timecode(self.current_time), self.theme.accent_bold_style()),
            Span::styled(
                format!(" / {}", format_timecode(self.duration)),
                self.theme.text_secondary_style(),
            ),
        ]);
        Paragraph::new(timecode).render(area, buf);

        if let Some(status) = self.status {
            let (text, style) = match status {
                HeaderStatus::Info(text) => (text, self.theme.text_secondary_style()),
                HeaderStatus::Warning(text) => (text, self.theme.error_style()),
            };
            Paragraph::new(Span::styled(text, style))
                .alignment(Alignment::Right)
                .render(area, buf);
        }
    }

    fn render_ruler(&self, area: Rect, layout: &TimelineLayout, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let line_style = self.theme.text_secondary_style();
        for x in area.left()..area.right() {
            buf.set_string(x, area.y, "─", line_style);
        }

        let columns: Vec<u16> = layout
            .markers
            .iter()
            .map(|m| column_of(m.fraction, area.width))
            .collect();
        for (i, (marker, &col)) in layout.markers.iter().zip(&columns).enumerate() {
            buf.set_string(area.x + col, area.y, "┬", line_style);

            let label = format_timecode(marker.time);
            let next = columns.get(i + 1).copied().unwrap_or(area.width);
            // Leave a gap before the next tick
            if col + 1 + (label.len() as u16) < next {
                buf.set_string(area.x + col + 1, area.y, &label, line_style);
            }
        }
    }

    fn render_waveform(&self, area: Rect, layout: &TimelineLayout, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let style = Style::default().fg(self.theme.waveform).bg(self.theme.track);
        let eighths = u32::from(area.height) * 8;

        for col in 0..area.width {
            let centre = (f64::from(col) + 0.5) / f64::from(area.width);
            let height = layout.bar_at(centre).map_or(0.0, |bar| bar.height);
            let mut level = (f64::from(height) * f64::from(eighths)).round() as u32;

            // Fill from the bottom row up
            for row in (0..area.height).rev() {
                let cell = level.min(8) as usize;
                level = level.saturating_sub(8);
                buf.set_string(area.x + col, area.y + row, LEVELS[cell], style);
            }
        }
    }

    fn render_video(&self, area: Rect, layout: &TimelineLayout, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let mut previous = None;
        for col in 0..area.width {
            let centre = (f64::from(col) + 0.5) / f64::from(area.width);
            let Some(tile) = layout.tile_at(centre) else {
                continue;
            };
            let (symbol, style) = match tile.content {
                TileContent::Thumbnail(index) => {
                    let [r, g, b] = self
                        .thumbnails
                        .get(index)
                        .map_or([0, 0, 0], |t| t.image.swatch());
                    let boundary = previous.is_some_and(|p| p != index);
                    previous = Some(index);
                    let style = Style::default()
                        .fg(self.theme.track)
                        .bg(Color::Rgb(r, g, b));
                    (if boundary { "▏" } else { " " }, style)
                }
                TileContent::Placeholder => (
                    " ",
                    Style::default()
                        .fg(self.theme.text_secondary)
                        .bg(self.theme.placeholder),
                ),
            };
            for row in 0..area.height {
                buf.set_string(area.x + col, area.y + row, symbol, style);
            }
        }

        if self.thumbnails.is_empty() {
            let label_area = Rect { height: 1, ..area };
            Paragraph::new(PLACEHOLDER_LABEL)
                .style(
                    Style::default()
                        .fg(self.theme.text_primary)
                        .bg(self.theme.placeholder),
                )
                .alignment(Alignment::Center)
                .render(label_area, buf);
        }
    }

    fn render_playhead(&self, areas: &TimelineAreas, layout: &TimelineLayout, buf: &mut Buffer) {
        let track = areas.track();
        if track.width == 0 {
            return;
        }
        let x = track.x + column_of(layout.playhead, track.width);
        let style = Style::default().fg(self.theme.playhead);

        for y in areas.waveform.top()..areas.video.bottom() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_symbol("│").set_style(style);
            }
        }
        if areas.ruler.height > 0 {
            if let Some(cell) = buf.cell_mut((x, areas.ruler.y)) {
                cell.set_symbol("●").set_style(self.theme.playhead_style());
            }
        }
    }

    fn render_footer(&self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(Line::from(legend_spans(LEGEND, self.theme)))
            .alignment(Alignment::Right)
            .render(area, buf);
        Paragraph::new(Span::styled(
            format!("Duration: {}", format_timecode(self.duration)),
            self.theme.text_style(),
        ))
        .render(area, buf);
    }
}

impl Widget for TimelineWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Self::block().border_style(self.theme.text_secondary_style());
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.is_empty() {
            return;
        }

        let areas = TimelineAreas::split(inner);
        let layout = TimelineLayout::compute(
            self.waveform,
            self.thumbnails.len(),
            self.current_time,
            self.duration,
        );

        self.render_header(areas.header, buf);
        self.render_ruler(areas.ruler, &layout, buf);

        let label_style = self.theme.text_secondary_style();
        for (label, text) in [(areas.audio_label, "Aud"), (areas.video_label, "Vid")] {
            if !label.is_empty() {
                buf.set_stringn(label.x, label.y, text, usize::from(label.width), label_style);
            }
        }

        self.render_waveform(areas.waveform, &layout, buf);
        self.render_video(areas.video, &layout, buf);
        // Playhead sits above both tracks
        self.render_playhead(&areas, &layout, buf);
        self.render_footer(areas.footer, buf);
    }
}

/// Key hints: key in the accent colour, description dimmed, `" | "` between.
pub fn legend_spans(keys: &[(&str, &str)], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(keys.len() * 3);
    for (i, (key, desc)) in keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", theme.text_secondary_style()));
        }
        spans.push(Span::styled(
            key.to_string(),
            Style::default().fg(theme.accent),
        ));
        spans.push(Span::styled(
            format!(": {}", desc),
            theme.text_secondary_style(),
        ));
    }
    spans
}
