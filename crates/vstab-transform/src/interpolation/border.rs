use vstab_frame::PlaneRef;

use crate::fixed::{clamp_coord, fp16_to_fp8, fp16_to_i, fp16_to_i_round, i_to_fp16, saturate_u8, Fp16};

/// Number of source pixels over which an edge sample fades into the default.
pub const BORDER_BLUR_WIDTH: i32 = 10;

/// Bilinear interpolation that also works at and beyond the plane border.
///
/// When the 2x2 neighbourhood of `(x, y)` lies inside the plane, the four
/// samples are blended and rounded. Otherwise the nearest edge sample is
/// faded towards `def`:
///
/// ```text
/// c      = clamp(max(-ix, -iy, ix + 1 - width, iy + 1 - height), 0, w)
/// result = (def * c + edge * (w - c)) / w
/// ```
///
/// with `w` = [`BORDER_BLUR_WIDTH`], so the edge sample is returned unchanged
/// right at the edge and `def` from `w` pixels outside onwards. The distance
/// is the largest overshoot over the four edges, which gives axis-aligned
/// (not circular) feathering around the corners.
pub fn bilinear_border(src: &PlaneRef<'_>, x: Fp16, y: Fp16, def: u8) -> u8 {
    let (x, y) = (clamp_coord(x), clamp_coord(y));
    let (width, height) = (src.width() as i32, src.height() as i32);
    let ix = fp16_to_i(x);
    let iy = fp16_to_i(y);
    let ixx = ix + 1;
    let iyy = iy + 1;

    if ix < 0 || ixx >= width || iy < 0 || iyy >= height {
        let w = BORDER_BLUR_WIDTH;
        let overshoot = (-ix).max(-iy).max(ixx - width).max(iyy - height);
        let c = overshoot.clamp(0, w);
        let edge = src.pixel_at(ix.clamp(0, width - 1), iy.clamp(0, height - 1)) as i32;
        saturate_u8((def as i32 * c + edge * (w - c)) / w)
    } else {
        let v1 = src.pixel_at(ixx, iyy) as i32;
        let v2 = src.pixel_at(ixx, iy) as i32;
        let v3 = src.pixel_at(ix, iyy) as i32;
        let v4 = src.pixel_at(ix, iy) as i32;
        let x_f = i_to_fp16(ix);
        let x_c = i_to_fp16(ixx);
        let y_f = i_to_fp16(iy);
        let y_c = i_to_fp16(iyy);
        // Fp8 * Fp8 = Fp16; the +1 offsets the downward bias of the truncations
        let s = fp16_to_fp8(v1 * (x - x_f) + v3 * (x_c - x)) * fp16_to_fp8(y - y_f)
            + fp16_to_fp8(v2 * (x - x_f) + v4 * (x_c - x)) * fp16_to_fp8(y_c - y)
            + 1;
        saturate_u8(fp16_to_i_round(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed::FP16_HALF;
    use vstab_frame::FrameError;

    fn plane_4x4() -> Vec<u8> {
        (0..16).map(|v| v * 10).collect()
    }

    #[test]
    fn border_at_edge_returns_edge_sample() -> Result<(), FrameError> {
        let data = plane_4x4();
        let src = PlaneRef::new(&data, 4, [4, 4].into())?;
        // last column: the 2x2 neighbourhood leaves the plane, c = 0
        assert_eq!(bilinear_border(&src, i_to_fp16(3), i_to_fp16(1), 255), 70);
        assert_eq!(bilinear_border(&src, i_to_fp16(2), i_to_fp16(3), 255), 140);
        Ok(())
    }

    #[test]
    fn border_far_outside_returns_default() -> Result<(), FrameError> {
        let data = plane_4x4();
        let src = PlaneRef::new(&data, 4, [4, 4].into())?;
        let w = BORDER_BLUR_WIDTH;
        assert_eq!(bilinear_border(&src, i_to_fp16(-w), i_to_fp16(1), 33), 33);
        assert_eq!(bilinear_border(&src, i_to_fp16(3 + w), i_to_fp16(1), 33), 33);
        assert_eq!(bilinear_border(&src, i_to_fp16(1), i_to_fp16(-w - 5), 33), 33);
        assert_eq!(bilinear_border(&src, i_to_fp16(1), i_to_fp16(3 + w), 33), 33);
        assert_eq!(bilinear_border(&src, i32::MIN, i32::MAX, 33), 33);
        Ok(())
    }

    #[test]
    fn border_feathers_linearly() -> Result<(), FrameError> {
        let data = [200u8; 4];
        let src = PlaneRef::new(&data, 2, [2, 2].into())?;
        // 1, 5 and 9 pixels left of the plane
        assert_eq!(bilinear_border(&src, i_to_fp16(-1), 0, 0), 180);
        assert_eq!(bilinear_border(&src, i_to_fp16(-5), 0, 0), 100);
        assert_eq!(bilinear_border(&src, i_to_fp16(-9), 0, 0), 20);
        Ok(())
    }

    #[test]
    fn border_corner_uses_max_overshoot() -> Result<(), FrameError> {
        let data = [200u8; 4];
        let src = PlaneRef::new(&data, 2, [2, 2].into())?;
        // 3 px left and 6 px above: only the larger overshoot counts
        assert_eq!(
            bilinear_border(&src, i_to_fp16(-3), i_to_fp16(-6), 0),
            bilinear_border(&src, 0, i_to_fp16(-6), 0)
        );
        assert_eq!(bilinear_border(&src, i_to_fp16(-3), i_to_fp16(-6), 0), 80);
        Ok(())
    }

    #[test]
    fn border_interior_rounds() -> Result<(), FrameError> {
        let data = [0u8, 255, 0, 255];
        let src = PlaneRef::new(&data, 2, [2, 2].into())?;
        let res = bilinear_border(&src, FP16_HALF, FP16_HALF, 0);
        assert!((127..=128).contains(&res));
        Ok(())
    }
}
