use crate::error::FrameError;
use crate::format::MAX_DIMENSION;

/// Plane size in samples
///
/// # Examples
///
/// ```
/// use vstab_frame::PlaneSize;
///
/// let size = PlaneSize::from([10, 20]);
///
/// assert_eq!(size.width, 10);
/// assert_eq!(size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaneSize {
    /// Width of the plane in samples
    pub width: usize,
    /// Height of the plane in samples
    pub height: usize,
}

impl std::fmt::Display for PlaneSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl From<[usize; 2]> for PlaneSize {
    fn from(size: [usize; 2]) -> Self {
        PlaneSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Minimum buffer length for `height` (at least one) rows of `row_bytes`
/// spaced by `stride`.
fn required_len(stride: usize, row_bytes: usize, height: usize) -> usize {
    stride * (height - 1) + row_bytes
}

pub(crate) fn check_layout(
    len: usize,
    stride: usize,
    size: PlaneSize,
    step: usize,
    plane: usize,
) -> Result<(), FrameError> {
    if size.width == 0 || size.height == 0 {
        return Err(FrameError::InvalidSize(size.width, size.height, MAX_DIMENSION));
    }
    let row_bytes = size.width * step;
    if stride < row_bytes {
        return Err(FrameError::InvalidStride {
            plane,
            stride,
            row_bytes,
        });
    }
    let required = required_len(stride, row_bytes, size.height);
    if len < required {
        return Err(FrameError::PlaneTooSmall {
            plane,
            actual: len,
            required,
        });
    }
    Ok(())
}

/// Read-only view of one plane, or of one channel of a packed plane.
///
/// Samples of the viewed channel sit `step` bytes apart within a row, starting
/// `offset` bytes into the row; rows sit `stride` bytes apart.
#[derive(Clone, Copy, Debug)]
pub struct PlaneRef<'a> {
    data: &'a [u8],
    stride: usize,
    size: PlaneSize,
    step: usize,
    offset: usize,
}

impl<'a> PlaneRef<'a> {
    /// Create a view over a single-channel plane.
    ///
    /// # Errors
    ///
    /// If the stride is shorter than a row or the buffer cannot hold every
    /// row, an error is returned.
    pub fn new(data: &'a [u8], stride: usize, size: PlaneSize) -> Result<Self, FrameError> {
        Self::interleaved(data, stride, size, 1)
    }

    /// Create a view over a packed plane with `channels` samples per pixel.
    ///
    /// The view addresses channel 0; use [`PlaneRef::channel`] to select
    /// another one.
    pub fn interleaved(
        data: &'a [u8],
        stride: usize,
        size: PlaneSize,
        channels: usize,
    ) -> Result<Self, FrameError> {
        check_layout(data.len(), stride, size, channels, 0)?;
        Ok(Self {
            data,
            stride,
            size,
            step: channels,
            offset: 0,
        })
    }

    /// Built from an already validated layout.
    pub(crate) fn from_parts(data: &'a [u8], stride: usize, size: PlaneSize, step: usize) -> Self {
        Self {
            data,
            stride,
            size,
            step,
            offset: 0,
        }
    }

    /// View of a single channel of an interleaved plane.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::ChannelIndexOutOfBounds`] if `channel` is not
    /// smaller than the number of samples per pixel.
    pub fn channel(&self, channel: usize) -> Result<PlaneRef<'a>, FrameError> {
        if channel >= self.step {
            return Err(FrameError::ChannelIndexOutOfBounds(channel, self.step));
        }
        Ok(PlaneRef {
            offset: channel,
            ..*self
        })
    }

    /// Size of the plane in pixels.
    pub fn size(&self) -> PlaneSize {
        self.size
    }

    /// Width of the plane in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Height of the plane in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Distance in bytes between two rows.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Number of samples per pixel.
    pub fn channels(&self) -> usize {
        self.step
    }

    /// Number of meaningful bytes in one row.
    pub fn row_bytes(&self) -> usize {
        self.size.width * self.step
    }

    /// The underlying buffer, including any row padding.
    pub fn as_slice(&self) -> &'a [u8] {
        self.data
    }

    /// The meaningful bytes of row `y`.
    pub fn row(&self, y: usize) -> &'a [u8] {
        let start = y * self.stride;
        &self.data[start..start + self.row_bytes()]
    }

    /// Sample at `(x, y)`.
    ///
    /// The caller guarantees `0 <= x < width` and `0 <= y < height`. Violating
    /// this is a logic error and panics on the slice bounds check instead of
    /// reading another row or plane.
    #[inline(always)]
    pub fn pixel_at(&self, x: i32, y: i32) -> u8 {
        pixel_channel(
            self.data,
            self.stride,
            x as usize,
            y as usize,
            self.step,
            self.offset,
        )
    }

    /// Sample at `(x, y)`, or `default` when the position is outside the plane.
    #[inline(always)]
    pub fn pixel_or_default(&self, x: i32, y: i32, default: u8) -> u8 {
        if x < 0 || y < 0 || x as usize >= self.size.width || y as usize >= self.size.height {
            default
        } else {
            self.pixel_at(x, y)
        }
    }
}

/// Sample of `channel` at `(x, y)` in an interleaved buffer with `channels`
/// samples per pixel.
///
/// Same as `plane.channel(channel)?.pixel_at(x, y)` on a
/// [`PlaneRef::interleaved`] view of `data`, without the layout checks; every
/// [`PlaneRef`] read goes through it. The caller guarantees the position lies
/// inside the buffer.
#[inline(always)]
pub fn pixel_channel(
    data: &[u8],
    stride: usize,
    x: usize,
    y: usize,
    channels: usize,
    channel: usize,
) -> u8 {
    data[y * stride + x * channels + channel]
}

/// Exclusive view of one plane of a destination frame.
#[derive(Debug)]
pub struct PlaneMut<'a> {
    data: &'a mut [u8],
    stride: usize,
    size: PlaneSize,
    step: usize,
}

impl<'a> PlaneMut<'a> {
    /// Create a mutable view over a single-channel plane.
    ///
    /// # Errors
    ///
    /// If the stride is shorter than a row or the buffer cannot hold every
    /// row, an error is returned.
    pub fn new(data: &'a mut [u8], stride: usize, size: PlaneSize) -> Result<Self, FrameError> {
        Self::interleaved(data, stride, size, 1)
    }

    /// Create a mutable view over a packed plane with `channels` samples per pixel.
    pub fn interleaved(
        data: &'a mut [u8],
        stride: usize,
        size: PlaneSize,
        channels: usize,
    ) -> Result<Self, FrameError> {
        check_layout(data.len(), stride, size, channels, 0)?;
        Ok(Self {
            data,
            stride,
            size,
            step: channels,
        })
    }

    pub(crate) fn from_parts(
        data: &'a mut [u8],
        stride: usize,
        size: PlaneSize,
        step: usize,
    ) -> Self {
        Self {
            data,
            stride,
            size,
            step,
        }
    }

    /// Size of the plane in pixels.
    pub fn size(&self) -> PlaneSize {
        self.size
    }

    /// Width of the plane in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Height of the plane in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Distance in bytes between two rows.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Number of samples per pixel.
    pub fn channels(&self) -> usize {
        self.step
    }

    /// Number of meaningful bytes in one row.
    pub fn row_bytes(&self) -> usize {
        self.size.width * self.step
    }

    /// The underlying buffer, including any row padding.
    pub fn as_slice(&self) -> &[u8] {
        &*self.data
    }

    /// The underlying buffer, including any row padding.
    pub fn as_slice_mut(&mut self) -> &mut [u8] {
        &mut *self.data
    }

    /// Reborrow as a read-only view.
    pub fn as_plane_ref(&self) -> PlaneRef<'_> {
        PlaneRef::from_parts(&*self.data, self.stride, self.size, self.step)
    }

    /// The meaningful bytes of row `y`.
    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.stride;
        let row_bytes = self.row_bytes();
        &mut self.data[start..start + row_bytes]
    }

    /// Set the sample of `channel` at `(x, y)`.
    ///
    /// Panics if the position is outside the plane.
    pub fn set_pixel(&mut self, x: usize, y: usize, channel: usize, value: u8) {
        let idx = y * self.stride + x * self.step + channel;
        self.data[idx] = value;
    }

    /// Copy the meaningful bytes of every row from `src`, leaving padding untouched.
    pub fn copy_rows_from(&mut self, src: &PlaneRef<'_>) {
        for y in 0..self.size.height {
            self.row_mut(y).copy_from_slice(src.row(y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_plane() -> Vec<u8> {
        // 3x2 plane with a stride of 4 (one padding byte per row)
        vec![1, 2, 3, 99, 4, 5, 6, 99]
    }

    #[test]
    fn plane_pixel_at() -> Result<(), FrameError> {
        let data = sample_plane();
        let plane = PlaneRef::new(&data, 4, [3, 2].into())?;
        assert_eq!(plane.pixel_at(0, 0), 1);
        assert_eq!(plane.pixel_at(2, 0), 3);
        assert_eq!(plane.pixel_at(1, 1), 5);
        assert_eq!(plane.row(1), &[4, 5, 6]);
        Ok(())
    }

    #[test]
    fn plane_pixel_or_default() -> Result<(), FrameError> {
        let data = sample_plane();
        let plane = PlaneRef::new(&data, 4, [3, 2].into())?;
        assert_eq!(plane.pixel_or_default(2, 1, 7), 6);
        // the padding byte is never returned
        assert_eq!(plane.pixel_or_default(3, 0, 7), 7);
        assert_eq!(plane.pixel_or_default(-1, 0, 7), 7);
        assert_eq!(plane.pixel_or_default(0, -1, 7), 7);
        assert_eq!(plane.pixel_or_default(0, 2, 7), 7);
        Ok(())
    }

    #[test]
    fn plane_channel_view() -> Result<(), FrameError> {
        // 2x1 RGB plane
        let data = vec![10, 20, 30, 40, 50, 60];
        let plane = PlaneRef::interleaved(&data, 6, [2, 1].into(), 3)?;
        let green = plane.channel(1)?;
        assert_eq!(green.pixel_at(0, 0), 20);
        assert_eq!(green.pixel_at(1, 0), 50);
        assert_eq!(pixel_channel(&data, 6, 1, 0, 3, 2), 60);
        assert_eq!(
            plane.channel(3).err(),
            Some(FrameError::ChannelIndexOutOfBounds(3, 3))
        );
        Ok(())
    }

    #[test]
    fn plane_invalid_layout() {
        let data = vec![0u8; 7];
        assert_eq!(
            PlaneRef::new(&data, 2, [3, 2].into()).err(),
            Some(FrameError::InvalidStride {
                plane: 0,
                stride: 2,
                row_bytes: 3
            })
        );
        assert_eq!(
            PlaneRef::new(&data, 4, [3, 3].into()).err(),
            Some(FrameError::PlaneTooSmall {
                plane: 0,
                actual: 7,
                required: 11
            })
        );
        // the last row does not need padding
        assert!(PlaneRef::new(&data, 4, [3, 2].into()).is_ok());
    }

    #[test]
    fn plane_zero_size_rejected() {
        let mut data = vec![0u8; 8];
        for size in [[0, 2], [3, 0], [0, 0]] {
            let expected = Some(FrameError::InvalidSize(size[0], size[1], MAX_DIMENSION));
            assert_eq!(PlaneRef::new(&data, 4, size.into()).err(), expected);
            assert_eq!(
                PlaneRef::interleaved(&data, 4, size.into(), 2).err(),
                expected
            );
            assert_eq!(PlaneMut::new(&mut data, 4, size.into()).err(), expected);
        }
    }

    #[test]
    fn pixel_channel_matches_channel_view() -> Result<(), FrameError> {
        // 3x2 RGBA plane with 2 bytes of padding per row
        let data = (0..28).collect::<Vec<u8>>();
        let plane = PlaneRef::interleaved(&data, 14, [3, 2].into(), 4)?;
        for c in 0..4 {
            let view = plane.channel(c)?;
            for y in 0..2 {
                for x in 0..3 {
                    assert_eq!(
                        pixel_channel(&data, 14, x, y, 4, c),
                        view.pixel_at(x as i32, y as i32)
                    );
                }
            }
        }
        Ok(())
    }

    #[test]
    fn plane_mut_copy_rows() -> Result<(), FrameError> {
        let src_data = sample_plane();
        let src = PlaneRef::new(&src_data, 4, [3, 2].into())?;
        let mut dst_data = vec![0u8; 6];
        let mut dst = PlaneMut::new(&mut dst_data, 3, [3, 2].into())?;
        dst.copy_rows_from(&src);
        dst.set_pixel(0, 0, 0, 42);
        assert_eq!(dst.as_plane_ref().pixel_at(1, 1), 5);
        assert_eq!(dst_data, vec![42, 2, 3, 4, 5, 6]);
        Ok(())
    }
}
