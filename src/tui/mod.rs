//! Interactive timeline viewer
//!
//! Hosts the timeline widget in a full-screen terminal UI:
//!
//! - `session`: raw mode / alternate screen / mouse capture guard
//! - `state`: asset, scheduler, scrub controller and displayed time
//! - `input`: keyboard and mouse routing
//! - `ui`: frame layout and the help overlay
//! - `app`: the event loop

mod app;
mod help;
mod input;
mod session;
mod state;
mod ui;

pub use app::run_view;
pub use input::handle_event;
pub use session::TerminalSession;
pub use state::{InputResult, ViewState};
pub use ui::{centered_rect, render};
