//! Input handling for the timeline viewer.
//!
//! Presses go to the scrub controller only over the track. Moves and
//! releases are forwarded only while the controller's drag capture has
//! global listeners registered, wherever the pointer is.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};

use super::state::{InputResult, ViewState};
use crate::media::MediaAsset;
use crate::scrub::{ListenerKind, Point};

/// Handle any input event, dispatching to the appropriate handler.
pub fn handle_event<A: MediaAsset>(event: Event, state: &mut ViewState<A>) -> InputResult {
    match event {
        Event::Key(key) => handle_key_event(key, state),
        Event::Mouse(mouse) => {
            handle_mouse_event(mouse, state);
            InputResult::Continue
        }
        Event::Resize(_, _) => {
            state.needs_render = true;
            InputResult::Continue
        }
        Event::FocusLost => {
            if state.is_dragging() {
                state.controller.cancel();
                state.needs_render = true;
            }
            InputResult::Continue
        }
        _ => InputResult::Continue,
    }
}

/// Handle a key press.
pub fn handle_key_event<A: MediaAsset>(key: KeyEvent, state: &mut ViewState<A>) -> InputResult {
    if key.kind != KeyEventKind::Press {
        return InputResult::Continue;
    }

    // Any key closes help
    if state.show_help {
        state.show_help = false;
        state.needs_render = true;
        return InputResult::Continue;
    }

    match key.code {
        KeyCode::Esc if state.is_dragging() => {
            state.controller.cancel();
            state.needs_render = true;
        }
        KeyCode::Char('q') | KeyCode::Esc => return InputResult::Quit,
        KeyCode::Char('?') => {
            state.show_help = true;
            state.needs_render = true;
        }
        KeyCode::Char('n') => return InputResult::Reload,
        KeyCode::Left => {
            let request = state.controller.nudge(state.current_time, -state.nudge_secs);
            state.apply(request);
        }
        KeyCode::Right => {
            let request = state.controller.nudge(state.current_time, state.nudge_secs);
            state.apply(request);
        }
        KeyCode::Home => {
            let request = state.controller.nudge(0.0, 0.0);
            state.apply(request);
        }
        KeyCode::End => {
            let request = state.controller.nudge(state.duration(), 0.0);
            state.apply(request);
        }
        _ => {}
    }
    InputResult::Continue
}

/// Handle a mouse event.
pub fn handle_mouse_event<A: MediaAsset>(mouse: MouseEvent, state: &mut ViewState<A>) {
    let point = Point::new(f64::from(mouse.column), f64::from(mouse.row));

    let request = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => state.controller.pointer_down(point),
        MouseEventKind::Drag(_) | MouseEventKind::Moved
            if state.router.is_listening(ListenerKind::PointerMove) =>
        {
            state.controller.pointer_move(point)
        }
        MouseEventKind::Up(_) if state.router.is_listening(ListenerKind::PointerUp) => {
            state.controller.pointer_up();
            state.needs_render = true;
            None
        }
        _ => None,
    };

    if let Some(request) = request {
        state.apply(request);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::layout::Rect;

    use crate::config::Config;
    use crate::media::test_support::ManualAsset;
    use crate::timeline::Waveform;

    // Track cells 10..=40 on rows 2..=6, so 31 columns map onto 0..=60s
    const TRACK: Rect = Rect {
        x: 10,
        y: 2,
        width: 31,
        height: 5,
    };

    fn setup(duration: f64) -> ViewState<ManualAsset> {
        let mut state = ViewState::new(
            ManualAsset::new(duration),
            &Config::default(),
            Waveform::default(),
        );
        state.set_track_area(TRACK);
        // Duration known to the controller without starting a sampling run
        state.controller.set_duration(duration);
        state
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn press_on_track_seeks_and_starts_drag() {
        let mut state = setup(60.0);

        handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 25, 3), &mut state);

        assert_eq!(state.current_time, 30.0);
        assert!(state.is_dragging());
        assert_eq!(state.cursor().asset().position, 30.0);
        assert_eq!(state.router.listener_count(), 2);
    }

    #[test]
    fn press_outside_track_is_ignored() {
        let mut state = setup(60.0);

        handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 25, 10), &mut state);

        assert_eq!(state.current_time, 0.0);
        assert!(!state.is_dragging());
        assert!(state.cursor().asset().requests.is_empty());
    }

    #[test]
    fn moves_without_drag_are_not_forwarded() {
        let mut state = setup(60.0);

        handle_event(mouse(MouseEventKind::Moved, 25, 3), &mut state);
        handle_event(mouse(MouseEventKind::Drag(MouseButton::Left), 25, 3), &mut state);

        assert_eq!(state.current_time, 0.0);
    }

    #[test]
    fn drag_follows_pointer_off_track_and_release_detaches() {
        let mut state = setup(60.0);

        handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 10, 3), &mut state);
        handle_event(mouse(MouseEventKind::Drag(MouseButton::Left), 16, 20), &mut state);
        assert_eq!(state.current_time, 12.0);

        // Past the right edge clamps to the end
        handle_event(mouse(MouseEventKind::Drag(MouseButton::Left), 200, 0), &mut state);
        assert_eq!(state.current_time, 60.0);

        handle_event(mouse(MouseEventKind::Up(MouseButton::Left), 200, 0), &mut state);
        assert!(!state.is_dragging());
        assert_eq!(state.router.listener_count(), 0);

        handle_event(mouse(MouseEventKind::Moved, 10, 3), &mut state);
        assert_eq!(state.current_time, 60.0);
    }

    #[test]
    fn scrub_during_sampling_moves_playhead_but_queues_seek() {
        let mut state = setup(60.0);
        state.observe_duration();
        assert!(state.cursor().is_leased());

        handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 25, 3), &mut state);

        assert_eq!(state.current_time, 30.0);
        assert_eq!(state.cursor().queued_seek(), Some(30.0));
        assert!(state.cursor().asset().requests.is_empty());
    }

    #[test]
    fn arrow_keys_nudge_within_bounds() {
        let mut state = setup(60.0);

        handle_event(key(KeyCode::Right), &mut state);
        assert_eq!(state.current_time, 5.0);
        handle_event(key(KeyCode::Left), &mut state);
        handle_event(key(KeyCode::Left), &mut state);
        assert_eq!(state.current_time, 0.0);
    }

    #[test]
    fn home_and_end_jump_to_bounds() {
        let mut state = setup(60.0);
        state.observe_duration();

        handle_event(key(KeyCode::End), &mut state);
        assert_eq!(state.current_time, 60.0);
        handle_event(key(KeyCode::Home), &mut state);
        assert_eq!(state.current_time, 0.0);
    }

    #[test]
    fn esc_cancels_drag_before_quitting() {
        let mut state = setup(60.0);
        handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 25, 3), &mut state);

        assert_eq!(handle_event(key(KeyCode::Esc), &mut state), InputResult::Continue);
        assert!(!state.is_dragging());
        assert_eq!(handle_event(key(KeyCode::Esc), &mut state), InputResult::Quit);
    }

    #[test]
    fn help_swallows_next_key() {
        let mut state = setup(60.0);

        handle_event(key(KeyCode::Char('?')), &mut state);
        assert!(state.show_help);
        assert_eq!(handle_event(key(KeyCode::Char('q')), &mut state), InputResult::Continue);
        assert!(!state.show_help);
        assert_eq!(handle_event(key(KeyCode::Char('q')), &mut state), InputResult::Quit);
    }

    #[test]
    fn n_requests_reload() {
        let mut state = setup(60.0);
        assert_eq!(handle_event(key(KeyCode::Char('n')), &mut state), InputResult::Reload);
    }

    #[test]
    fn focus_loss_ends_drag() {
        let mut state = setup(60.0);
        handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 25, 3), &mut state);

        state.needs_render = false;

        handle_event(Event::FocusLost, &mut state);
        assert!(!state.is_dragging());
        assert_eq!(state.router.listener_count(), 0);
        assert!(state.needs_render);
    }

    #[test]
    fn focus_loss_without_drag_is_quiet() {
        let mut state = setup(60.0);
        state.needs_render = false;

        handle_event(Event::FocusLost, &mut state);
        assert!(!state.needs_render);
    }
}
