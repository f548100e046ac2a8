use vstab_frame::{FrameError, FrameInfo, PixelFormat};

use crate::parallel::ParallelError;

/// An error type for the transform module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum TransformError {
    /// Error when source and destination frames do not share format and size.
    #[error("Source frame ({src}) and destination frame ({dst}) do not match")]
    FrameMismatch {
        /// Descriptor of the source frame.
        src: FrameInfo,
        /// Descriptor of the destination frame.
        dst: FrameInfo,
    },

    /// Error when a frame layout is passed to the wrong driver.
    #[error("Pixel format {0} is not supported by the {1} transform")]
    UnsupportedLayout(PixelFormat, &'static str),

    /// Error when a non-identity transform would read and write the same frame.
    #[error("Cannot resample a frame in place, source and destination must differ")]
    AliasedFrames,

    /// Error when an interpolation mode name is not recognised.
    #[error("Unknown interpolation mode: {0}")]
    InvalidInterpolation(String),

    /// Error when the worker pool cannot be created.
    #[error(transparent)]
    ThreadPool(#[from] ParallelError),

    /// Error from the frame containers.
    #[error(transparent)]
    Frame(#[from] FrameError),
}
