use anyhow::Result;
use image::Rgba;
use thiserror::Error;

/// Trait for background classification policies
/// Allows swapping between different chroma-key rules (near-white,
/// near-black, anything channel-based)
pub trait Classifier {
    /// Decide whether a pixel is background-colored
    ///
    /// Must be deterministic and free of side effects: the flood fill
    /// evaluates each coordinate at most once and relies on the answer
    /// being a pure function of the channel values.
    fn is_background(&self, pixel: Rgba<u8>) -> Result<bool>;
}

/// Errors from the flood-fill engine
#[derive(Debug, Error)]
pub enum FillError {
    /// The image has zero width or height; the fill was not attempted.
    #[error("image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    /// The classifier failed on the pixel at (x, y).
    ///
    /// The image is left in the partially cleared state reached so far.
    /// Callers needing atomicity should fill a copy and swap on success.
    #[error("classifier failed at ({x}, {y})")]
    Classifier {
        x: u32,
        y: u32,
        #[source]
        source: anyhow::Error,
    },

    /// The cooperative cancellation flag was raised mid-fill.
    ///
    /// Like a classifier failure, this leaves the image partially cleared.
    #[error("fill cancelled after clearing {cleared} pixels")]
    Cancelled { cleared: u64 },
}
