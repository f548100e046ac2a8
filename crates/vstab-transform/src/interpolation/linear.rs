use vstab_frame::PlaneRef;

use crate::fixed::{clamp_coord, fp16_to_i, fp16_to_i_round, i_to_fp16, saturate_u8, Fp16};

/// Kernel for horizontal linear interpolation
///
/// Interpolates between the two horizontal neighbours on the row nearest to
/// `y`. Neighbours outside the plane contribute `def`.
///
/// The weighted sum stays in [`Fp16`] and is truncated once. Dropping each
/// product to `Fp8` first would make a constant region lose 1 at every
/// fractional `x`.
pub fn linear_interpolation(src: &PlaneRef<'_>, x: Fp16, y: Fp16, def: u8) -> u8 {
    let x = clamp_coord(x);
    let ix = fp16_to_i(x);
    let ixx = ix + 1;
    let x_f = i_to_fp16(ix);
    let x_c = i_to_fp16(ixx);
    let y_n = fp16_to_i_round(clamp_coord(y));

    let v1 = src.pixel_or_default(ixx, y_n, def) as i32;
    let v2 = src.pixel_or_default(ix, y_n, def) as i32;

    // weights are Fp16, so the sum is Fp16
    let s = v1 * (x - x_f) + v2 * (x_c - x);
    saturate_u8(fp16_to_i(s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed::FP16_HALF;
    use vstab_frame::FrameError;

    #[test]
    fn linear_between_columns() -> Result<(), FrameError> {
        let data = [0u8, 100, 200, 50, 50, 50];
        let src = PlaneRef::new(&data, 3, [3, 2].into())?;
        assert_eq!(linear_interpolation(&src, FP16_HALF, 0, 0), 50);
        assert_eq!(linear_interpolation(&src, i_to_fp16(1) + FP16_HALF, 0, 0), 150);
        assert_eq!(linear_interpolation(&src, i_to_fp16(1), 0, 0), 100);
        Ok(())
    }

    #[test]
    fn linear_uses_nearest_row() -> Result<(), FrameError> {
        let data = [0u8, 100, 200, 50, 50, 50];
        let src = PlaneRef::new(&data, 3, [3, 2].into())?;
        assert_eq!(linear_interpolation(&src, FP16_HALF, FP16_HALF, 0), 50);
        assert_eq!(linear_interpolation(&src, FP16_HALF, FP16_HALF - 1, 0), 50);
        assert_eq!(linear_interpolation(&src, 0, FP16_HALF, 7), 50);
        Ok(())
    }

    #[test]
    fn linear_blends_with_default_outside() -> Result<(), FrameError> {
        let data = [200u8, 200];
        let src = PlaneRef::new(&data, 2, [2, 1].into())?;
        // halfway between the last column and the outside
        assert_eq!(linear_interpolation(&src, i_to_fp16(1) + FP16_HALF, 0, 0), 100);
        assert_eq!(linear_interpolation(&src, 0, i_to_fp16(3), 17), 17);
        Ok(())
    }

    #[test]
    fn linear_constant_region_exact() -> Result<(), FrameError> {
        let data = [90u8; 8];
        let src = PlaneRef::new(&data, 4, [4, 2].into())?;
        for frac in [1, 255, 256, 12345, FP16_HALF, 65535] {
            assert_eq!(linear_interpolation(&src, i_to_fp16(1) + frac, 0, 0), 90);
        }
        Ok(())
    }
}
