#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the frame module.
pub mod error;

/// pixel formats and frame descriptors.
pub mod format;

/// owned frames and borrowed frame views.
pub mod frame;

/// plane views and pixel access.
pub mod plane;

pub use crate::error::FrameError;
pub use crate::format::{FrameInfo, PixelFormat, MAX_DIMENSION};
pub use crate::frame::{Frame, FrameMut, FrameRef};
pub use crate::plane::{pixel_channel, PlaneMut, PlaneRef, PlaneSize};
