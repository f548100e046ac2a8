use crate::format::FrameInfo;

/// An error type for the frame module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum FrameError {
    /// Error when the frame dimensions are zero or exceed the fixed-point range.
    #[error("Invalid frame size {0}x{1}, dimensions must be in 1..={2}")]
    InvalidSize(usize, usize, usize),

    /// Error when the number of plane buffers does not match the pixel format.
    #[error("Expected {expected} planes, got {actual}")]
    InvalidPlaneCount {
        /// Number of planes required by the pixel format.
        expected: usize,
        /// Number of planes supplied.
        actual: usize,
    },

    /// Error when a plane stride is shorter than one row of samples.
    #[error("Plane {plane}: stride {stride} is smaller than the row size {row_bytes}")]
    InvalidStride {
        /// Plane index.
        plane: usize,
        /// Supplied stride in bytes.
        stride: usize,
        /// Minimum row size in bytes.
        row_bytes: usize,
    },

    /// Error when a plane buffer cannot hold all rows.
    #[error("Plane {plane}: buffer length ({actual}) is smaller than required ({required})")]
    PlaneTooSmall {
        /// Plane index.
        plane: usize,
        /// Supplied buffer length in bytes.
        actual: usize,
        /// Required buffer length in bytes.
        required: usize,
    },

    /// Error when a channel index exceeds the samples per pixel.
    #[error("Channel index {0} is out of bounds for {1} channels")]
    ChannelIndexOutOfBounds(usize, usize),

    /// Error when two frames are expected to share a descriptor.
    #[error("Frame descriptors differ: {0} vs {1}")]
    InfoMismatch(FrameInfo, FrameInfo),

    /// Error when a pixel format name is not recognised.
    #[error("Unknown pixel format: {0}")]
    UnknownPixelFormat(String),
}
