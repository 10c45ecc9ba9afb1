//! Event loop for the timeline viewer.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event;
use tracing::info;

use super::input::handle_event;
use super::session::TerminalSession;
use super::state::{InputResult, ViewState};
use super::ui;
use crate::config::Config;
use crate::media::SyntheticAsset;
use crate::theme::Theme;
use crate::timeline::{SyntheticWaveform, WaveformSource};

/// How long to wait for input before advancing sampling again.
const TICK: Duration = Duration::from_millis(16);

/// Run the viewer over `asset` until the user quits.
///
/// `n` swaps the asset between `initial_duration` and half of it, the way
/// a host reuses one element for a new file.
pub fn run_view(asset: SyntheticAsset, initial_duration: f64, config: &Config) -> io::Result<()> {
    let theme = Theme::from_name(config.tui.theme);
    let waveform = SyntheticWaveform::new().waveform(config.timeline.waveform_samples);
    let mut state = ViewState::new(asset, config, waveform);

    let mut session = TerminalSession::enter()?;
    let result = event_loop(&mut session, &mut state, &theme, initial_duration);
    state.shutdown();
    drop(session);
    result
}

fn event_loop(
    session: &mut TerminalSession,
    state: &mut ViewState<SyntheticAsset>,
    theme: &Theme,
    initial_duration: f64,
) -> io::Result<()> {
    loop {
        state.observe_duration();
        state.tick(Instant::now());

        if state.needs_render {
            let mut track = ratatui::layout::Rect::default();
            session
                .terminal()
                .draw(|frame| track = ui::render(frame, state, theme))?;
            state.set_track_area(track);
            state.needs_render = false;
        }

        if !event::poll(TICK)? {
            continue;
        }
        match handle_event(event::read()?, state) {
            InputResult::Continue => {}
            InputResult::Quit => return Ok(()),
            InputResult::Reload => {
                let next = next_duration(state.duration(), initial_duration);
                info!(duration = next, "loading new source");
                state.reset_position();
                state.cursor_mut().asset_mut().load(next);
            }
        }
    }
}

/// Alternate between the starting duration and half of it.
fn next_duration(current: f64, initial: f64) -> f64 {
    if current == initial {
        (initial / 2.0).max(1.0)
    } else {
        initial
    }
}
