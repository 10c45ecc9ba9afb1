//! Media asset contract
//!
//! The timeline never owns media. It talks to the host's asset through
//! the `MediaAsset` trait:
//!
//! - `seek`: relocation requests and their one-shot completion signals
//! - `frame`: raw frame snapshots and encoded thumbnails
//! - `synthetic`: an in-process test-pattern asset with a decoder thread

mod error;
mod frame;
mod seek;
pub mod synthetic;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::MediaError;
pub use frame::{EncodedImage, RawFrame};
pub use seek::{seek_pair, PendingSeek, SeekCompleter, SeekStatus, SeekTicket};
pub use synthetic::SyntheticAsset;

/// A playable, seekable media asset owned by the host.
///
/// The playback position is the one shared mutable resource: every
/// `request_seek` moves it for everyone reading `position`.
pub trait MediaAsset {
    /// Total length in seconds, `0.0` until known.
    fn duration(&self) -> f64;

    /// Most recently requested position in seconds.
    fn position(&self) -> f64;

    /// Ask the asset to relocate to `secs`.
    ///
    /// The returned handle fires once this exact relocation has taken
    /// effect and the displayed frame matches the new position.
    fn request_seek(&mut self, secs: f64) -> PendingSeek;

    /// Snapshot the currently displayed frame.
    fn capture_frame(&self) -> Result<RawFrame, MediaError>;
}

impl<A: MediaAsset + ?Sized> MediaAsset for Box<A> {
    fn duration(&self) -> f64 {
        (**self).duration()
    }

    fn position(&self) -> f64 {
        (**self).position()
    }

    fn request_seek(&mut self, secs: f64) -> PendingSeek {
        (**self).request_seek(secs)
    }

    fn capture_frame(&self) -> Result<RawFrame, MediaError> {
        (**self).capture_frame()
    }
}
