//! scrubline - scrubbable media timeline
//!
//! Library behind the `scrubline` binary: thumbnail sampling over a
//! host-owned media asset, drag-to-seek, and a terminal timeline renderer.

pub mod cli;
pub mod config;
pub mod cursor;
pub mod logging;
pub mod media;
pub mod sampler;
pub mod scrub;
pub mod theme;
pub mod timeline;
pub mod tui;

pub use config::Config;
