//! Pixel interpolation kernels for fixed-point source coordinates.
//!
//! Every kernel takes a source plane, a [`Fp16`](crate::fixed::Fp16) source
//! position and a default sample, and reconstructs one sample in `[0, 255]`.
//!
//! # Interpolation Modes
//!
//! - **Zero**: nearest sample, no interpolation
//! - **Linear**: horizontal interpolation on the nearest row
//! - **Bilinear**: 2x2 neighbourhood
//! - **Bicubic**: 4x4 neighbourhood, cubic convolution with a = -0.5
//! - **BicubicLumaBilinearChroma**: bicubic for plane 0, bilinear for the rest
//!
//! Positions whose neighbourhood leaves the plane are resolved by
//! [`bilinear_border`], which fades the nearest edge sample towards the
//! default over [`BORDER_BLUR_WIDTH`] pixels.

mod bicubic;
mod bilinear;
mod border;
pub(crate) mod interpolate;
mod linear;
mod nearest;

pub use bicubic::{bicubic_interpolation, bicubic_kernel};
pub use bilinear::{bilinear_interpolation, interpolate_n};
pub use border::{bilinear_border, BORDER_BLUR_WIDTH};
pub use interpolate::{
    interpolate_pixel, Bicubic, Bilinear, Interpolate, InterpolationMode, Kernel, Linear, Nearest,
};
pub use linear::linear_interpolation;
pub use nearest::nearest_interpolation;
