use vstab_frame::PlaneRef;

use super::border::bilinear_border;
use crate::fixed::{clamp_coord, fp16_to_i, fp16_to_i_round, i_to_fp16, saturate_u8, Fp16};

/// One-dimensional cubic convolution with a = -0.5.
///
/// `a0..a3` are consecutive samples and `t` ([`Fp16`], in `[0, 1)`) is the
/// position between `a1` and `a2`. In matrix form:
///
/// ```text
///                   | 0  2  0  0 | |a0|
/// (1, t, t², t³) /2 |-1  0  1  0 | |a1|
///                   | 2 -5  4 -1 | |a2|
///                   |-1  3 -3  1 | |a3|
/// ```
///
/// Every nested product is rounded back to an integer, and so is the result,
/// which is not saturated: the first pass of [`bicubic_interpolation`] keeps
/// overshoots for the second pass.
#[inline]
pub fn bicubic_kernel(t: Fp16, a0: i32, a1: i32, a2: i32, a3: i32) -> i32 {
    let cubic = fp16_to_i_round(t * (-a0 + 3 * a1 - 3 * a2 + a3));
    let quadratic = fp16_to_i_round(t * ((2 * a0 - 5 * a1 + 4 * a2 - a3) + cubic));
    fp16_to_i_round((i_to_fp16(2 * a1) + t * (-a0 + a2 + quadratic)) >> 1)
}

/// Kernel for bicubic interpolation over a 4x4 neighbourhood.
///
/// Rows are interpolated at the fractional x offset first, the four results
/// are then interpolated at the fractional y offset. Positions closer than
/// one pixel to the left/top or two pixels to the right/bottom edge are
/// delegated to [`bilinear_border`].
pub fn bicubic_interpolation(src: &PlaneRef<'_>, x: Fp16, y: Fp16, def: u8) -> u8 {
    let (x, y) = (clamp_coord(x), clamp_coord(y));
    let ix_f = fp16_to_i(x);
    let iy_f = fp16_to_i(y);
    let (width, height) = (src.width() as i32, src.height() as i32);

    if ix_f < 1 || ix_f > width - 3 || iy_f < 1 || iy_f > height - 3 {
        return bilinear_border(src, x, y, def);
    }

    let tx = x - i_to_fp16(ix_f);
    let ty = y - i_to_fp16(iy_f);

    let mut vals = [0i32; 4];
    for (dy, val) in vals.iter_mut().enumerate() {
        let yy = iy_f + dy as i32 - 1;
        let p = |dx: i32| src.pixel_at(ix_f + dx - 1, yy) as i32;
        *val = bicubic_kernel(tx, p(0), p(1), p(2), p(3));
    }

    saturate_u8(bicubic_kernel(ty, vals[0], vals[1], vals[2], vals[3]))
}
