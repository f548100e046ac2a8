use vstab_frame::{FrameMut, FrameRef, PlaneMut, PlaneRef};

use super::mapper::{AffineMapper, ScaledRotation};
use crate::config::BorderPolicy;
use crate::interpolation::{Bicubic, Bilinear, Interpolate, InterpolationMode, Kernel, Linear, Nearest};
use crate::parallel::RowExecutor;
use crate::transform::AffineTransform;

fn warp_plane_with<K: Interpolate>(
    src: &PlaneRef<'_>,
    dst: &mut PlaneMut<'_>,
    mapper: &AffineMapper,
    fill: Option<u8>,
    executor: &RowExecutor,
) {
    executor.for_each_row(dst, |y, row| {
        let row_mapper = mapper.row(y);
        for (x, out) in row.iter_mut().enumerate() {
            let (xs, ys) = row_mapper.source(x);
            let def = fill.unwrap_or(*out);
            *out = K::interpolate(src, xs, ys, def);
        }
    });
}

/// Warp a single plane.
///
/// # Arguments
///
/// * `src` - The source plane.
/// * `dst` - The destination plane, every sample is overwritten.
/// * `mapper` - Maps destination pixels to source positions.
/// * `kernel` - The interpolation kernel.
/// * `fill` - The default sample, `None` to fade towards the current
///   destination sample.
/// * `executor` - Distributes the destination rows.
pub fn warp_plane(
    src: &PlaneRef<'_>,
    dst: &mut PlaneMut<'_>,
    mapper: &AffineMapper,
    kernel: Kernel,
    fill: Option<u8>,
    executor: &RowExecutor,
) {
    match kernel {
        Kernel::Nearest => warp_plane_with::<Nearest>(src, dst, mapper, fill, executor),
        Kernel::Linear => warp_plane_with::<Linear>(src, dst, mapper, fill, executor),
        Kernel::Bilinear => warp_plane_with::<Bilinear>(src, dst, mapper, fill, executor),
        Kernel::Bicubic => warp_plane_with::<Bicubic>(src, dst, mapper, fill, executor),
    }
}

/// Warp every plane of a planar frame.
///
/// Chroma planes are mapped in their own subsampled coordinates, with the
/// translation scaled down accordingly. Planes are processed one after the
/// other; the rows of each plane are spread by `executor`.
///
/// The caller guarantees that `src` and `dst` share the same descriptor.
pub fn warp_planar(
    src: &FrameRef<'_>,
    dst: &mut FrameMut<'_>,
    transform: &AffineTransform,
    border: BorderPolicy,
    interpolation: InterpolationMode,
    executor: &RowExecutor,
) {
    let info = *src.info();
    let rotation = ScaledRotation::new(transform);

    for (plane, (src_plane, dst_plane)) in src
        .planes()
        .iter()
        .zip(dst.planes_mut().iter_mut())
        .enumerate()
    {
        let (log2_w, log2_h) = info.plane_subsampling(plane);
        let kernel = interpolation.kernel_for_plane(plane);
        let mapper = AffineMapper::new(
            &rotation,
            transform,
            src_plane.size(),
            dst_plane.size(),
            log2_w,
            log2_h,
        );
        log::debug!(
            "plane {}: {} ({}x{} subsampling), {:?} kernel",
            plane,
            dst_plane.size(),
            1 << log2_w,
            1 << log2_h,
            kernel
        );
        warp_plane(
            src_plane,
            dst_plane,
            &mapper,
            kernel,
            border.fill_value(plane),
            executor,
        );
    }
}
