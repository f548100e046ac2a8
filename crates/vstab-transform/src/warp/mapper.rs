use vstab_frame::PlaneSize;

use crate::fixed::{f_to_fp16, i_to_fp16, Fp16};
use crate::transform::AffineTransform;

/// Rotation and zoom terms of a transform in [`Fp16`].
///
/// Shared by every plane of one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaledRotation {
    zcos: Fp16,
    zsin: Fp16,
}

impl ScaledRotation {
    /// Compute `(1 - zoom / 100) * cos(-alpha)` and the matching sine.
    pub fn new(transform: &AffineTransform) -> Self {
        let scale = 1.0 - transform.zoom / 100.0;
        Self {
            zcos: f_to_fp16(scale * (-transform.alpha).cos()),
            zsin: f_to_fp16(scale * (-transform.alpha).sin()),
        }
    }

    /// Scaled cosine in [`Fp16`].
    pub fn zcos(&self) -> Fp16 {
        self.zcos
    }

    /// Scaled sine in [`Fp16`].
    pub fn zsin(&self) -> Fp16 {
        self.zsin
    }
}

/// Maps destination pixels of one plane to [`Fp16`] source positions.
///
/// With `dx = x - c_d_x` and `dy = y - c_d_y` relative to the destination
/// centre:
///
/// ```text
/// x_s =  zcos * dx + zsin * dy + c_s_x - (x_t >> log2_w)
/// y_s = -zsin * dx + zcos * dy + c_s_y - (y_t >> log2_h)
/// ```
///
/// Centres are `dim >> 1`. All sums saturate, the kernels clamp the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AffineMapper {
    zcos: Fp16,
    zsin: Fp16,
    neg_zsin: Fp16,
    c_tx: Fp16,
    c_ty: Fp16,
    c_dx: i32,
    c_dy: i32,
}

impl AffineMapper {
    /// Create the mapper for one plane.
    ///
    /// # Arguments
    ///
    /// * `rotation` - The rotation and zoom terms of `transform`.
    /// * `transform` - The transform, its translation is taken from here.
    /// * `src_size` - The size of the source plane.
    /// * `dst_size` - The size of the destination plane.
    /// * `log2_w` - Horizontal log2 subsampling of the plane.
    /// * `log2_h` - Vertical log2 subsampling of the plane.
    pub fn new(
        rotation: &ScaledRotation,
        transform: &AffineTransform,
        src_size: PlaneSize,
        dst_size: PlaneSize,
        log2_w: u8,
        log2_h: u8,
    ) -> Self {
        let c_sx = i_to_fp16((src_size.width >> 1) as i32);
        let c_sy = i_to_fp16((src_size.height >> 1) as i32);
        Self {
            zcos: rotation.zcos,
            zsin: rotation.zsin,
            neg_zsin: rotation.zsin.saturating_neg(),
            c_tx: c_sx.saturating_sub(f_to_fp16(transform.x) >> log2_w),
            c_ty: c_sy.saturating_sub(f_to_fp16(transform.y) >> log2_h),
            c_dx: (dst_size.width >> 1) as i32,
            c_dy: (dst_size.height >> 1) as i32,
        }
    }

    /// Hoist the terms that only depend on the destination row.
    #[inline]
    pub fn row(&self, y: usize) -> RowMapper {
        let dy = y as i32 - self.c_dy;
        RowMapper {
            zcos: self.zcos,
            neg_zsin: self.neg_zsin,
            sin_part: self.zsin.saturating_mul(dy).saturating_add(self.c_tx),
            cos_part: self.zcos.saturating_mul(dy).saturating_add(self.c_ty),
            c_dx: self.c_dx,
        }
    }

    /// Source position of destination pixel `(x, y)`.
    pub fn source(&self, x: usize, y: usize) -> (Fp16, Fp16) {
        self.row(y).source(x)
    }
}

/// Per-row state of an [`AffineMapper`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowMapper {
    zcos: Fp16,
    neg_zsin: Fp16,
    sin_part: Fp16,
    cos_part: Fp16,
    c_dx: i32,
}

impl RowMapper {
    /// Source position of the pixel in column `x`.
    #[inline(always)]
    pub fn source(&self, x: usize) -> (Fp16, Fp16) {
        let dx = x as i32 - self.c_dx;
        (
            self.zcos.saturating_mul(dx).saturating_add(self.sin_part),
            self.neg_zsin.saturating_mul(dx).saturating_add(self.cos_part),
        )
    }
}
