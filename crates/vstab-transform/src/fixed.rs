//! Scaled-integer arithmetic used on the per-pixel path.
//!
//! Two scales are in use, both stored in an `i32`:
//!
//! - [`Fp8`]: 8 fractional bits, for interpolation weights and weighted sums.
//! - [`Fp16`]: 16 fractional bits, for coordinates and the rotation/zoom terms.
//!
//! The types are plain aliases, so nothing stops mixing the scales; every call
//! site states which scale it expects. Shifts are arithmetic, so negative
//! coordinates floor towards negative infinity.
//!
//! Float conversion multiplies by `255` or `65535` rather than `256` or
//! `65536`. This slightly underestimates every converted value (an identity
//! rotation becomes `65535 / 65536`) and is kept as is, since reference
//! outputs depend on it bit for bit.

/// Fixed point value with 8 fractional bits.
pub type Fp8 = i32;

/// Fixed point value with 16 fractional bits.
pub type Fp16 = i32;

/// One half in [`Fp8`].
pub const FP8_HALF: Fp8 = 1 << 7;

/// One half in [`Fp16`].
pub const FP16_HALF: Fp16 = 1 << 15;

/// Source coordinates are clamped to `±COORD_LIMIT` ([`Fp16`]) before use.
///
/// This is 24576 pixels, far outside any frame of
/// [`vstab_frame::MAX_DIMENSION`], and keeps `(ix + 1) << 16` and the weight
/// differences inside `i32`.
pub const COORD_LIMIT: Fp16 = 3 << 29;

/// Integer to [`Fp8`].
#[inline(always)]
pub const fn i_to_fp8(v: i32) -> Fp8 {
    v << 8
}

/// Integer to [`Fp16`].
#[inline(always)]
pub const fn i_to_fp16(v: i32) -> Fp16 {
    v << 16
}

/// Float to [`Fp8`], scaling by 255 and truncating.
#[inline]
pub fn f_to_fp8(v: f64) -> Fp8 {
    (v * 255.0) as i32
}

/// Float to [`Fp16`], scaling by 65535 and truncating.
#[inline]
pub fn f_to_fp16(v: f64) -> Fp16 {
    (v * 65535.0) as i32
}

/// [`Fp8`] to float.
#[inline]
pub fn fp8_to_f(v: Fp8) -> f64 {
    v as f64 / (1 << 8) as f64
}

/// [`Fp16`] to float.
#[inline]
pub fn fp16_to_f(v: Fp16) -> f64 {
    v as f64 / (1 << 16) as f64
}

/// [`Fp16`] to [`Fp8`] by dropping 8 fractional bits.
#[inline(always)]
pub const fn fp16_to_fp8(v: Fp16) -> Fp8 {
    v >> 8
}

/// [`Fp8`] to integer, flooring.
#[inline(always)]
pub const fn fp8_to_i(v: Fp8) -> i32 {
    v >> 8
}

/// [`Fp16`] to integer, flooring.
#[inline(always)]
pub const fn fp16_to_i(v: Fp16) -> i32 {
    v >> 16
}

/// [`Fp8`] to integer, rounding half up.
#[inline(always)]
pub const fn fp8_to_i_round(v: Fp8) -> i32 {
    v.saturating_add(FP8_HALF) >> 8
}

/// [`Fp16`] to integer, rounding half up.
#[inline(always)]
pub const fn fp16_to_i_round(v: Fp16) -> i32 {
    v.saturating_add(FP16_HALF) >> 16
}

/// Clamp an [`Fp16`] coordinate into `[-COORD_LIMIT, COORD_LIMIT]`.
#[inline(always)]
pub fn clamp_coord(v: Fp16) -> Fp16 {
    v.clamp(-COORD_LIMIT, COORD_LIMIT)
}

/// Saturate to the sample range `[0, 255]`.
#[inline(always)]
pub fn saturate_u8(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}
