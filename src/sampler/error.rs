//! Sampling errors.

use std::time::Duration;

use crate::media::MediaError;

/// Errors that end a sampling run.
#[derive(Debug, thiserror::Error)]
pub enum SampleError {
    #[error("Seek to {offset}s did not complete within {timeout:?}")]
    Stalled { offset: f64, timeout: Duration },

    #[error("Sampling would take {count} thumbnails, more than the limit of {max}")]
    TooManySamples { count: usize, max: usize },

    #[error("Sampling cancelled")]
    Cancelled,

    #[error("Media asset went away while seeking to {offset}s")]
    AssetLost { offset: f64 },

    #[error("Failed to capture frame at {offset}s: {source}")]
    Capture {
        offset: f64,
        #[source]
        source: MediaError,
    },

    #[error("Failed to encode thumbnail: {0}")]
    Encode(#[from] image::ImageError),
}
