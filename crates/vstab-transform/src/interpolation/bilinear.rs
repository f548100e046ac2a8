use vstab_frame::PlaneRef;

use super::border::bilinear_border;
use crate::fixed::{clamp_coord, fp16_to_fp8, fp16_to_i, i_to_fp16, saturate_u8, Fp16};

/// Kernel for bilinear interpolation
///
/// # Arguments
///
/// * `src` - The source plane.
/// * `x` - The x coordinate in [`Fp16`].
/// * `y` - The y coordinate in [`Fp16`].
/// * `def` - The value faded in beyond the plane border.
///
/// # Returns
///
/// The interpolated sample. Positions whose 2x2 neighbourhood leaves the
/// plane are delegated to [`bilinear_border`].
pub fn bilinear_interpolation(src: &PlaneRef<'_>, x: Fp16, y: Fp16, def: u8) -> u8 {
    let (x, y) = (clamp_coord(x), clamp_coord(y));
    let ix = fp16_to_i(x);
    let iy = fp16_to_i(y);

    if ix < 0 || ix > src.width() as i32 - 2 || iy < 0 || iy > src.height() as i32 - 2 {
        return bilinear_border(src, x, y, def);
    }

    let ixx = ix + 1;
    let iyy = iy + 1;
    let x_f = i_to_fp16(ix);
    let x_c = i_to_fp16(ixx);
    let y_f = i_to_fp16(iy);
    let y_c = i_to_fp16(iyy);
    let v1 = src.pixel_at(ixx, iyy) as i32;
    let v2 = src.pixel_at(ixx, iy) as i32;
    let v3 = src.pixel_at(ix, iyy) as i32;
    let v4 = src.pixel_at(ix, iy) as i32;

    // each horizontal blend drops to Fp8 so that Fp8 * Fp8 stays a Fp16 in range
    let s = fp16_to_fp8(v1 * (x - x_f) + v3 * (x_c - x)) * fp16_to_fp8(y - y_f)
        + fp16_to_fp8(v2 * (x - x_f) + v4 * (x_c - x)) * fp16_to_fp8(y_c - y);
    saturate_u8(fp16_to_i(s))
}

/// Bilinear interpolation of every channel of one packed pixel.
///
/// `channels` holds one view per channel of the packed source plane (see
/// [`PlaneRef::channel`]). Each output sample in `pixel` is replaced by the
/// interpolated value; beyond the border it fades towards `fill`, or towards
/// the sample's current value when `fill` is `None`.
pub fn interpolate_n(
    channels: &[PlaneRef<'_>],
    x: Fp16,
    y: Fp16,
    pixel: &mut [u8],
    fill: Option<u8>,
) {
    for (src, out) in channels.iter().zip(pixel.iter_mut()) {
        let def = fill.unwrap_or(*out);
        *out = bilinear_interpolation(src, x, y, def);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed::FP16_HALF;
    use vstab_frame::FrameError;

    #[test]
    fn bilinear_exact_at_grid_points() -> Result<(), FrameError> {
        let data = (0..20).map(|v| (v * 13) as u8).collect::<Vec<_>>();
        let src = PlaneRef::new(&data, 5, [5, 4].into())?;
        for y in 0..4 {
            for x in 0..5 {
                let val = bilinear_interpolation(&src, i_to_fp16(x), i_to_fp16(y), 255);
                assert_eq!(val, src.pixel_at(x, y), "at ({x}, {y})");
            }
        }
        Ok(())
    }

    #[test]
    fn bilinear_center_of_quad() -> Result<(), FrameError> {
        let data = [0u8, 100, 100, 200, 0, 0];
        let src = PlaneRef::new(&data, 3, [3, 2].into())?;
        // mean of 0, 100, 200 and 0
        assert_eq!(bilinear_interpolation(&src, FP16_HALF, FP16_HALF, 0), 75);
        // a quarter of the way from (0, 0) to (1, 0)
        assert_eq!(bilinear_interpolation(&src, FP16_HALF / 2, 0, 0), 25);
        Ok(())
    }

    #[test]
    fn bilinear_outside_delegates_to_border() -> Result<(), FrameError> {
        let data = [50u8; 9];
        let src = PlaneRef::new(&data, 3, [3, 3].into())?;
        let x = i_to_fp16(-20);
        assert_eq!(bilinear_interpolation(&src, x, 0, 9), 9);
        assert_eq!(
            bilinear_interpolation(&src, i_to_fp16(-4), FP16_HALF, 0),
            bilinear_border(&src, i_to_fp16(-4), FP16_HALF, 0)
        );
        Ok(())
    }

    #[test]
    fn interpolate_n_all_channels() -> Result<(), FrameError> {
        // 2x2 RGB with constant channels
        let data = [10u8, 20, 30, 10, 20, 30, 10, 20, 30, 10, 20, 30];
        let plane = PlaneRef::interleaved(&data, 6, [2, 2].into(), 3)?;
        let channels = (0..3)
            .map(|c| plane.channel(c))
            .collect::<Result<Vec<_>, _>>()?;

        let mut pixel = [0u8; 3];
        interpolate_n(&channels, 0, 0, &mut pixel, None);
        assert_eq!(pixel, [10, 20, 30]);

        let mut pixel = [1u8, 2, 3];
        interpolate_n(&channels, i_to_fp16(-30), 0, &mut pixel, None);
        assert_eq!(pixel, [1, 2, 3]);
        interpolate_n(&channels, i_to_fp16(-30), 0, &mut pixel, Some(16));
        assert_eq!(pixel, [16, 16, 16]);
        Ok(())
    }
}
