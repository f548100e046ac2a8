use vstab_frame::PlaneRef;

use crate::fixed::{clamp_coord, fp16_to_i_round, Fp16};

/// Kernel for nearest neighbor interpolation
///
/// # Arguments
///
/// * `src` - The source plane.
/// * `x` - The x coordinate in [`Fp16`].
/// * `y` - The y coordinate in [`Fp16`].
/// * `def` - The value used when the nearest position is outside the plane.
///
/// # Returns
///
/// The sample at the position rounded half up.
pub fn nearest_interpolation(src: &PlaneRef<'_>, x: Fp16, y: Fp16, def: u8) -> u8 {
    let ix = fp16_to_i_round(clamp_coord(x));
    let iy = fp16_to_i_round(clamp_coord(y));
    src.pixel_or_default(ix, iy, def)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed::{i_to_fp16, FP16_HALF};
    use vstab_frame::FrameError;

    #[test]
    fn nearest_rounds_half_up() -> Result<(), FrameError> {
        let data = [0u8, 10, 20, 30];
        let src = PlaneRef::new(&data, 2, [2, 2].into())?;
        assert_eq!(nearest_interpolation(&src, FP16_HALF - 1, 0, 99), 0);
        assert_eq!(nearest_interpolation(&src, FP16_HALF, 0, 99), 10);
        assert_eq!(nearest_interpolation(&src, 0, i_to_fp16(1), 99), 20);
        Ok(())
    }

    #[test]
    fn nearest_outside_is_default() -> Result<(), FrameError> {
        let data = [0u8, 10, 20, 30];
        let src = PlaneRef::new(&data, 2, [2, 2].into())?;
        assert_eq!(nearest_interpolation(&src, i_to_fp16(2), 0, 99), 99);
        assert_eq!(nearest_interpolation(&src, -FP16_HALF - 1, 0, 99), 99);
        // -0.5 rounds up to 0 and is still inside
        assert_eq!(nearest_interpolation(&src, -FP16_HALF, 0, 99), 0);
        assert_eq!(nearest_interpolation(&src, i32::MAX, i32::MIN, 99), 99);
        Ok(())
    }
}
