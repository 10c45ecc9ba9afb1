//! Timeline rendering
//!
//! Pure layout (`layout`) is kept apart from the ratatui widget (`widget`)
//! so positions can be tested without a terminal.

mod layout;
mod timecode;
mod waveform;
mod widget;

pub use layout::{
    column_of, marker_spacing, marker_times, playhead_fraction, Bar, Extent, Marker, Tile,
    TileContent, TimelineLayout,
};
pub use timecode::format_timecode;
pub use waveform::{
    SyntheticWaveform, Waveform, WaveformSource, DEFAULT_WAVEFORM_SAMPLES, MIN_AMPLITUDE,
};
pub use widget::{
    legend_spans, HeaderStatus, TimelineAreas, TimelineWidget, GUTTER_WIDTH, MIN_TIMELINE_HEIGHT,
};
