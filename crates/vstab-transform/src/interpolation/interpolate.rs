use std::str::FromStr;

use serde::{Deserialize, Serialize};
use vstab_frame::PlaneRef;

use super::bicubic::bicubic_interpolation;
use super::bilinear::bilinear_interpolation;
use super::linear::linear_interpolation;
use super::nearest::nearest_interpolation;
use crate::error::TransformError;
use crate::fixed::Fp16;

/// Interpolation mode selected for a transform.
///
/// The numeric order (`0..=4`) is accepted when parsing from a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationMode {
    /// Nearest neighbor, no interpolation.
    Zero,
    /// Horizontal linear interpolation on the nearest row.
    Linear,
    /// Bilinear interpolation.
    #[default]
    Bilinear,
    /// Bicubic interpolation on every plane.
    Bicubic,
    /// Bicubic on the luma plane, bilinear on the other planes.
    BicubicLumaBilinearChroma,
}

impl InterpolationMode {
    /// All modes in numeric order.
    pub const ALL: [InterpolationMode; 5] = [
        InterpolationMode::Zero,
        InterpolationMode::Linear,
        InterpolationMode::Bilinear,
        InterpolationMode::Bicubic,
        InterpolationMode::BicubicLumaBilinearChroma,
    ];

    /// Kernel used for the given plane index.
    pub fn kernel_for_plane(self, plane: usize) -> Kernel {
        match self {
            InterpolationMode::Zero => Kernel::Nearest,
            InterpolationMode::Linear => Kernel::Linear,
            InterpolationMode::Bilinear => Kernel::Bilinear,
            InterpolationMode::Bicubic => Kernel::Bicubic,
            InterpolationMode::BicubicLumaBilinearChroma if plane == 0 => Kernel::Bicubic,
            InterpolationMode::BicubicLumaBilinearChroma => Kernel::Bilinear,
        }
    }

    /// Snake case identifier, as used by serde and [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            InterpolationMode::Zero => "zero",
            InterpolationMode::Linear => "linear",
            InterpolationMode::Bilinear => "bilinear",
            InterpolationMode::Bicubic => "bicubic",
            InterpolationMode::BicubicLumaBilinearChroma => "bicubic_luma_bilinear_chroma",
        }
    }
}

impl std::fmt::Display for InterpolationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            InterpolationMode::Zero => "No interpolation",
            InterpolationMode::Linear => "Linear (horizontal)",
            InterpolationMode::Bilinear => "Bi-Linear",
            InterpolationMode::Bicubic => "Bi-Cubic",
            InterpolationMode::BicubicLumaBilinearChroma => "Bi-Cubic luma / Bi-Linear chroma",
        };
        f.write_str(name)
    }
}

impl FromStr for InterpolationMode {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        if let Ok(index) = key.parse::<usize>() {
            return InterpolationMode::ALL
                .get(index)
                .copied()
                .ok_or_else(|| TransformError::InvalidInterpolation(s.to_string()));
        }
        if key == "bicubic-luma" {
            return Ok(InterpolationMode::BicubicLumaBilinearChroma);
        }
        InterpolationMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == key)
            .ok_or_else(|| TransformError::InvalidInterpolation(s.to_string()))
    }
}

/// Single-plane interpolation kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kernel {
    /// See [`nearest_interpolation`].
    Nearest,
    /// See [`linear_interpolation`].
    Linear,
    /// See [`bilinear_interpolation`].
    Bilinear,
    /// See [`bicubic_interpolation`].
    Bicubic,
}

/// A kernel resolved at compile time.
///
/// The warp loops are generic over this trait so the kernel choice is made
/// once per plane rather than once per pixel.
pub trait Interpolate {
    /// Reconstruct the sample at `(x, y)` ([`Fp16`]), fading towards `def`
    /// outside the plane.
    fn interpolate(src: &PlaneRef<'_>, x: Fp16, y: Fp16, def: u8) -> u8;
}

/// Marker for [`nearest_interpolation`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Nearest;

/// Marker for [`linear_interpolation`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Linear;

/// Marker for [`bilinear_interpolation`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Bilinear;

/// Marker for [`bicubic_interpolation`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Bicubic;

impl Interpolate for Nearest {
    #[inline(always)]
    fn interpolate(src: &PlaneRef<'_>, x: Fp16, y: Fp16, def: u8) -> u8 {
        nearest_interpolation(src, x, y, def)
    }
}

impl Interpolate for Linear {
    #[inline(always)]
    fn interpolate(src: &PlaneRef<'_>, x: Fp16, y: Fp16, def: u8) -> u8 {
        linear_interpolation(src, x, y, def)
    }
}

impl Interpolate for Bilinear {
    #[inline(always)]
    fn interpolate(src: &PlaneRef<'_>, x: Fp16, y: Fp16, def: u8) -> u8 {
        bilinear_interpolation(src, x, y, def)
    }
}

impl Interpolate for Bicubic {
    #[inline(always)]
    fn interpolate(src: &PlaneRef<'_>, x: Fp16, y: Fp16, def: u8) -> u8 {
        bicubic_interpolation(src, x, y, def)
    }
}

/// Kernel for interpolating a single sample
///
/// # Arguments
///
/// * `src` - The source plane.
/// * `x` - The x coordinate in [`Fp16`].
/// * `y` - The y coordinate in [`Fp16`].
/// * `def` - The default sample for positions outside the plane.
/// * `kernel` - The kernel to use.
///
/// # Returns
///
/// The interpolated sample.
pub fn interpolate_pixel(src: &PlaneRef<'_>, x: Fp16, y: Fp16, def: u8, kernel: Kernel) -> u8 {
    match kernel {
        Kernel::Nearest => Nearest::interpolate(src, x, y, def),
        Kernel::Linear => Linear::interpolate(src, x, y, def),
        Kernel::Bilinear => Bilinear::interpolate(src, x, y, def),
        Kernel::Bicubic => Bicubic::interpolate(src, x, y, def),
    }
}
