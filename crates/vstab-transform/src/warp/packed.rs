use vstab_frame::{FrameError, FrameMut, FrameRef, PlaneRef};

use super::mapper::{AffineMapper, ScaledRotation};
use crate::config::BorderPolicy;
use crate::interpolation::interpolate_n;
use crate::parallel::RowExecutor;
use crate::transform::AffineTransform;

/// Warp a packed frame, interpolating all channels of a pixel bilinearly.
///
/// Under [`BorderPolicy::FillBlack`] every channel fades towards
/// [`PACKED_FILL`](crate::config::PACKED_FILL).
///
/// The caller guarantees that `src` and `dst` share the same descriptor.
///
/// # Errors
///
/// Returns an error if the source plane cannot be split into channel views.
pub fn warp_packed(
    src: &FrameRef<'_>,
    dst: &mut FrameMut<'_>,
    transform: &AffineTransform,
    border: BorderPolicy,
    executor: &RowExecutor,
) -> Result<(), FrameError> {
    let (Some(src_plane), Some(dst_plane)) = (src.planes().first(), dst.planes_mut().first_mut())
    else {
        return Ok(());
    };

    let channels = src_plane.channels();
    let views = (0..channels)
        .map(|c| src_plane.channel(c))
        .collect::<Result<Vec<PlaneRef<'_>>, _>>()?;

    let mapper = AffineMapper::new(
        &ScaledRotation::new(transform),
        transform,
        src_plane.size(),
        dst_plane.size(),
        0,
        0,
    );
    let fill = border.packed_fill_value();
    log::debug!(
        "packed: {} with {} channels, bilinear kernel",
        dst_plane.size(),
        channels
    );

    executor.for_each_row(dst_plane, |y, row| {
        let row_mapper = mapper.row(y);
        for (x, pixel) in row.chunks_exact_mut(channels).enumerate() {
            let (xs, ys) = row_mapper.source(x);
            interpolate_n(&views, xs, ys, pixel, fill);
        }
    });
    Ok(())
}
