use crate::error::FrameError;
use crate::format::FrameInfo;
use crate::plane::{check_layout, PlaneMut, PlaneRef};

/// A frame that owns its plane buffers.
///
/// The transform routines never allocate frames; this container is the
/// caller-side owner that hands out [`FrameRef`] and [`FrameMut`] views.
///
/// # Examples
///
/// ```
/// use vstab_frame::{Frame, FrameInfo, PixelFormat};
///
/// let info = FrameInfo::new(4, 2, PixelFormat::Yuv420p).unwrap();
/// let frame = Frame::new(info).unwrap();
///
/// assert_eq!(frame.view().planes().len(), 3);
/// assert_eq!(frame.stride(1), 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    info: FrameInfo,
    planes: Vec<Vec<u8>>,
    strides: Vec<usize>,
}

impl Frame {
    /// Allocate a zeroed frame with tightly packed rows.
    pub fn new(info: FrameInfo) -> Result<Self, FrameError> {
        Self::with_alignment(info, 1)
    }

    /// Allocate a zeroed frame whose strides are rounded up to `align` bytes.
    pub fn with_alignment(info: FrameInfo, align: usize) -> Result<Self, FrameError> {
        let align = align.max(1);
        let strides = (0..info.planes())
            .map(|p| info.plane_row_bytes(p).div_ceil(align) * align)
            .collect::<Vec<_>>();
        let planes = strides
            .iter()
            .enumerate()
            .map(|(p, &stride)| vec![0u8; stride * info.plane_size(p).height])
            .collect();
        Self::from_planes(info, planes, strides)
    }

    /// Create a frame from existing plane buffers.
    ///
    /// # Errors
    ///
    /// If the number of planes does not match the format, or a buffer is too
    /// small for its stride and plane size, an error is returned.
    pub fn from_planes(
        info: FrameInfo,
        planes: Vec<Vec<u8>>,
        strides: Vec<usize>,
    ) -> Result<Self, FrameError> {
        check_planes(&info, planes.iter().map(|p| p.len()), &strides)?;
        Ok(Self {
            info,
            planes,
            strides,
        })
    }

    /// Create a frame with every plane filled by the matching value of `values`.
    pub fn filled(info: FrameInfo, values: &[u8]) -> Result<Self, FrameError> {
        let mut frame = Self::new(info)?;
        for (plane, &val) in frame.planes.iter_mut().zip(values.iter()) {
            plane.fill(val);
        }
        Ok(frame)
    }

    /// The frame descriptor.
    pub fn info(&self) -> &FrameInfo {
        &self.info
    }

    /// Row stride of a plane in bytes.
    pub fn stride(&self, plane: usize) -> usize {
        self.strides[plane]
    }

    /// Raw buffer of a plane.
    pub fn plane_data(&self, plane: usize) -> &[u8] {
        &self.planes[plane]
    }

    /// Read-only view of a single plane.
    pub fn plane(&self, plane: usize) -> PlaneRef<'_> {
        PlaneRef::from_parts(
            &self.planes[plane],
            self.strides[plane],
            self.info.plane_size(plane),
            self.info.plane_step(plane),
        )
    }

    /// Mutable view of a single plane.
    pub fn plane_mut(&mut self, plane: usize) -> PlaneMut<'_> {
        PlaneMut::from_parts(
            &mut self.planes[plane],
            self.strides[plane],
            self.info.plane_size(plane),
            self.info.plane_step(plane),
        )
    }

    /// Borrow the frame as a read-only source.
    pub fn view(&self) -> FrameRef<'_> {
        FrameRef {
            info: self.info,
            planes: (0..self.info.planes()).map(|p| self.plane(p)).collect(),
        }
    }

    /// Borrow the frame as an exclusive destination.
    pub fn view_mut(&mut self) -> FrameMut<'_> {
        let info = self.info;
        let planes = self
            .planes
            .iter_mut()
            .zip(self.strides.iter())
            .enumerate()
            .map(|(p, (data, &stride))| {
                PlaneMut::from_parts(data, stride, info.plane_size(p), info.plane_step(p))
            })
            .collect();
        FrameMut { info, planes }
    }

    /// Whether the visible samples of two frames are equal, ignoring row padding.
    pub fn same_content(&self, other: &Frame) -> bool {
        self.info == other.info
            && (0..self.info.planes()).all(|p| {
                let (a, b) = (self.plane(p), other.plane(p));
                (0..a.height()).all(|y| a.row(y) == b.row(y))
            })
    }
}

fn check_planes(
    info: &FrameInfo,
    lens: impl ExactSizeIterator<Item = usize>,
    strides: &[usize],
) -> Result<(), FrameError> {
    for actual in [lens.len(), strides.len()] {
        if actual != info.planes() {
            return Err(FrameError::InvalidPlaneCount {
                expected: info.planes(),
                actual,
            });
        }
    }
    for (plane, (len, &stride)) in lens.zip(strides.iter()).enumerate() {
        check_layout(
            len,
            stride,
            info.plane_size(plane),
            info.plane_step(plane),
            plane,
        )?;
    }
    Ok(())
}

/// Read-only view of all planes of a source frame.
#[derive(Clone, Debug)]
pub struct FrameRef<'a> {
    info: FrameInfo,
    planes: Vec<PlaneRef<'a>>,
}

impl<'a> FrameRef<'a> {
    /// Wrap caller-owned plane buffers.
    ///
    /// # Errors
    ///
    /// If the number of buffers or strides does not match the format, or a
    /// buffer is too small, an error is returned.
    pub fn new(info: FrameInfo, data: &[&'a [u8]], strides: &[usize]) -> Result<Self, FrameError> {
        check_planes(&info, data.iter().map(|d| d.len()), strides)?;
        let planes = data
            .iter()
            .zip(strides.iter())
            .enumerate()
            .map(|(p, (&d, &stride))| {
                PlaneRef::from_parts(d, stride, info.plane_size(p), info.plane_step(p))
            })
            .collect();
        Ok(Self { info, planes })
    }

    /// The frame descriptor.
    pub fn info(&self) -> &FrameInfo {
        &self.info
    }

    /// All plane views in plane order.
    pub fn planes(&self) -> &[PlaneRef<'a>] {
        &self.planes
    }
}

/// Exclusive view of all planes of a destination frame.
#[derive(Debug)]
pub struct FrameMut<'a> {
    info: FrameInfo,
    planes: Vec<PlaneMut<'a>>,
}

impl<'a> FrameMut<'a> {
    /// Wrap caller-owned plane buffers.
    ///
    /// # Errors
    ///
    /// If the number of buffers or strides does not match the format, or a
    /// buffer is too small, an error is returned.
    pub fn new(
        info: FrameInfo,
        data: Vec<&'a mut [u8]>,
        strides: &[usize],
    ) -> Result<Self, FrameError> {
        check_planes(&info, data.iter().map(|d| d.len()), strides)?;
        let planes = data
            .into_iter()
            .zip(strides.iter())
            .enumerate()
            .map(|(p, (d, &stride))| {
                PlaneMut::from_parts(d, stride, info.plane_size(p), info.plane_step(p))
            })
            .collect();
        Ok(Self { info, planes })
    }

    /// The frame descriptor.
    pub fn info(&self) -> &FrameInfo {
        &self.info
    }

    /// All plane views in plane order.
    pub fn planes(&self) -> &[PlaneMut<'a>] {
        &self.planes
    }

    /// All plane views in plane order.
    pub fn planes_mut(&mut self) -> &mut [PlaneMut<'a>] {
        &mut self.planes
    }

    /// Copy every plane of `src` into this frame, row by row.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::InfoMismatch`] if the descriptors differ.
    pub fn copy_from(&mut self, src: &FrameRef<'_>) -> Result<(), FrameError> {
        if self.info != src.info {
            return Err(FrameError::InfoMismatch(src.info, self.info));
        }
        for (dst, src) in self.planes.iter_mut().zip(src.planes.iter()) {
            dst.copy_rows_from(src);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::PixelFormat;
    use crate::plane::PlaneSize;

    #[test]
    fn frame_smoke() -> Result<(), FrameError> {
        let info = FrameInfo::new(5, 3, PixelFormat::Yuv420p)?;
        let frame = Frame::new(info)?;
        assert_eq!(frame.stride(0), 5);
        assert_eq!(frame.stride(1), 3);
        assert_eq!(frame.plane_data(0).len(), 15);
        assert_eq!(frame.plane_data(2).len(), 6);
        assert_eq!(frame.plane(1).size(), PlaneSize::from([3, 2]));
        Ok(())
    }

    #[test]
    fn frame_with_alignment() -> Result<(), FrameError> {
        let info = FrameInfo::new(5, 3, PixelFormat::Rgb24)?;
        let frame = Frame::with_alignment(info, 16)?;
        assert_eq!(frame.stride(0), 16);
        assert_eq!(frame.plane(0).row_bytes(), 15);
        assert_eq!(frame.plane(0).channels(), 3);
        Ok(())
    }

    #[test]
    fn frame_filled() -> Result<(), FrameError> {
        let info = FrameInfo::new(2, 2, PixelFormat::Yuv444p)?;
        let frame = Frame::filled(info, &[16, 128, 128])?;
        assert_eq!(frame.plane(0).pixel_at(1, 1), 16);
        assert_eq!(frame.plane(2).pixel_at(0, 1), 128);
        Ok(())
    }

    #[test]
    fn frame_from_planes_invalid() -> Result<(), FrameError> {
        let info = FrameInfo::new(4, 4, PixelFormat::Gray8)?;
        assert_eq!(
            Frame::from_planes(info, vec![vec![0; 16], vec![0; 16]], vec![4, 4]).err(),
            Some(FrameError::InvalidPlaneCount {
                expected: 1,
                actual: 2
            })
        );
        assert_eq!(
            Frame::from_planes(info, vec![vec![0; 15]], vec![4]).err(),
            Some(FrameError::PlaneTooSmall {
                plane: 0,
                actual: 15,
                required: 16
            })
        );
        Ok(())
    }

    #[test]
    fn frame_ref_external_buffers() -> Result<(), FrameError> {
        let info = FrameInfo::new(2, 2, PixelFormat::Yuv420p)?;
        let (y, u, v) = (vec![1u8, 2, 3, 4], vec![5u8], vec![6u8]);
        let frame = FrameRef::new(info, &[&y, &u, &v], &[2, 1, 1])?;
        assert_eq!(frame.planes()[0].pixel_at(1, 1), 4);
        assert_eq!(frame.planes()[2].pixel_at(0, 0), 6);
        Ok(())
    }

    #[test]
    fn frame_copy_from_keeps_padding() -> Result<(), FrameError> {
        let info = FrameInfo::new(3, 2, PixelFormat::Gray8)?;
        let src = Frame::from_planes(info, vec![vec![1, 2, 3, 4, 5, 6]], vec![3])?;
        let mut dst = Frame::from_planes(info, vec![vec![9; 8]], vec![4])?;
        dst.view_mut().copy_from(&src.view())?;
        assert_eq!(dst.plane_data(0), &[1, 2, 3, 9, 4, 5, 6, 9]);
        assert!(dst.same_content(&src));
        Ok(())
    }

    #[test]
    fn frame_copy_from_mismatch() -> Result<(), FrameError> {
        let src = Frame::new(FrameInfo::new(3, 2, PixelFormat::Gray8)?)?;
        let mut dst = Frame::new(FrameInfo::new(2, 3, PixelFormat::Gray8)?)?;
        let res = dst.view_mut().copy_from(&src.view());
        assert!(matches!(res, Err(FrameError::InfoMismatch(_, _))));
        Ok(())
    }
}
