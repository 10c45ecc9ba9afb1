//! Media asset errors.

/// Errors raised by a media asset while capturing frames.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Media is not loaded yet (duration unknown)")]
    NotLoaded,

    #[error("Frame buffer is {actual} bytes, expected {expected} for {width}x{height} RGB")]
    BadFrameSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("Frame has zero width or height")]
    EmptyFrame,

    #[error("Frame capture failed: {0}")]
    Capture(String),
}
