#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// optional acceleration backends and the CPU fallback handle.
pub mod accel;

/// transform configuration.
pub mod config;

/// Error types for the transform module.
pub mod error;

/// fixed-point conversion and rounding primitives.
pub mod fixed;

/// utilities for interpolation.
pub mod interpolation;

/// row-parallel execution utilities.
pub mod parallel;

/// affine transform parameters.
pub mod transform;

/// frame transform entry points.
pub mod transformer;

/// affine warps of planar and packed frames.
pub mod warp;

pub use crate::accel::{AccelContext, AccelError, AccelerationBackend, NoAcceleration};
pub use crate::config::{BorderPolicy, TransformConfig};
pub use crate::error::TransformError;
pub use crate::interpolation::{InterpolationMode, Kernel};
pub use crate::parallel::ExecutionStrategy;
pub use crate::transform::AffineTransform;
pub use crate::transformer::{ExecutionPath, TransformOutcome, Transformer};
