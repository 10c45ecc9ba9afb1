//! Theme configuration for the timeline and CLI output
//!
//! Centralizes colours for the ratatui timeline widget and the ANSI
//! escape codes used by plain command output.

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

/// Named theme presets selectable from config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Studio,
    Classic,
    Ocean,
}

/// Colours used by the timeline.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Primary text (timecode, labels)
    pub text_primary: Color,
    /// Dimmed text (footer, hints, ruler)
    pub text_secondary: Color,
    /// Accent for the timecode and key hints
    pub accent: Color,
    /// Waveform bars
    pub waveform: Color,
    /// Playhead marker
    pub playhead: Color,
    /// Track background
    pub track: Color,
    /// Placeholder tile shown before thumbnails exist
    pub placeholder: Color,
    /// Error/warning color
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::studio()
    }
}

impl Theme {
    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Studio => Self::studio(),
            ThemeName::Classic => Self::classic(),
            ThemeName::Ocean => Self::ocean(),
        }
    }

    /// Dark editing-suite look: blue waveform, white playhead.
    pub fn studio() -> Self {
        Self {
            text_primary: Color::Gray,
            text_secondary: Color::DarkGray,
            accent: Color::LightBlue,
            waveform: Color::LightBlue,
            playhead: Color::White,
            track: Color::Black,
            placeholder: Color::DarkGray,
            error: Color::Red,
        }
    }

    /// Classic terminal theme - white text, yellow accents.
    pub fn classic() -> Self {
        Self {
            text_primary: Color::White,
            text_secondary: Color::DarkGray,
            accent: Color::Yellow,
            waveform: Color::Green,
            playhead: Color::Yellow,
            track: Color::Reset,
            placeholder: Color::DarkGray,
            error: Color::Red,
        }
    }

    /// Cyan/blue theme.
    pub fn ocean() -> Self {
        Self {
            text_primary: Color::Cyan,
            text_secondary: Color::DarkGray,
            accent: Color::LightCyan,
            waveform: Color::Cyan,
            playhead: Color::LightCyan,
            track: Color::Reset,
            placeholder: Color::Blue,
            error: Color::Red,
        }
    }

    // Style helpers

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    pub fn text_secondary_style(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    pub fn accent_bold_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn playhead_style(&self) -> Style {
        Style::default()
            .fg(self.playhead)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    // ANSI color helpers for CLI output

    /// Format text with the accent color (for CLI output).
    pub fn accent_text(&self, text: &str) -> String {
        paint(self.accent, text)
    }

    /// Format text with the primary color (for CLI output).
    pub fn primary_text(&self, text: &str) -> String {
        paint(self.text_primary, text)
    }

    /// Format text with the secondary color (for CLI output).
    pub fn secondary_text(&self, text: &str) -> String {
        paint(self.text_secondary, text)
    }
}

/// ANSI reset sequence
const ANSI_RESET: &str = "\x1b[0m";

fn paint(color: Color, text: &str) -> String {
    if std::env::var_os("NO_COLOR").is_some() {
        return text.to_string();
    }
    format!("{}{}{}", color_to_ansi(color), text, ANSI_RESET)
}

/// Convert a ratatui Color to an ANSI escape code.
fn color_to_ansi(color: Color) -> &'static str {
    match color {
        Color::Black => "\x1b[30m",
        Color::Red => "\x1b[31m",
        Color::Green => "\x1b[32m",
        Color::Yellow => "\x1b[33m",
        Color::Blue => "\x1b[34m",
        Color::Cyan => "\x1b[36m",
        Color::Gray => "\x1b[37m",
        Color::DarkGray => "\x1b[90m",
        Color::LightBlue => "\x1b[94m",
        Color::LightCyan => "\x1b[96m",
        Color::White => "\x1b[97m",
        Color::Reset => "\x1b[0m",
        // RGB, indexed and unused named colours print uncoloured
        _ => "",
    }
}
