use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FrameError;
use crate::plane::PlaneSize;

/// Largest supported frame width or height in pixels.
///
/// Source coordinates are carried as 16.16 fixed point in an `i32`, which
/// leaves room for a frame of this size plus a generous out-of-frame margin.
pub const MAX_DIMENSION: usize = 1 << 14;

/// Pixel layout of a video frame.
///
/// Planar formats store one buffer per plane; planes 1 and 2 carry chroma
/// and may be subsampled. Packed formats store all channels of a pixel
/// next to each other in a single buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelFormat {
    /// Single luma plane.
    Gray8,
    /// Planar YUV with 2x2 chroma subsampling.
    Yuv420p,
    /// Planar YUV with horizontal 2x chroma subsampling.
    Yuv422p,
    /// Planar YUV without chroma subsampling.
    Yuv444p,
    /// Planar YUV with 4x4 chroma subsampling.
    Yuv410p,
    /// Planar YUV with horizontal 4x chroma subsampling.
    Yuv411p,
    /// Planar YUV with vertical 2x chroma subsampling.
    Yuv440p,
    /// Planar YUV 4:2:0 with a full resolution alpha plane.
    Yuva420p,
    /// Packed 8-bit RGB.
    Rgb24,
    /// Packed 8-bit BGR.
    Bgr24,
    /// Packed 8-bit RGBA.
    Rgba,
}

impl PixelFormat {
    /// Number of planes (packed formats have a single plane).
    pub fn planes(self) -> usize {
        match self {
            PixelFormat::Gray8 | PixelFormat::Rgb24 | PixelFormat::Bgr24 | PixelFormat::Rgba => 1,
            PixelFormat::Yuva420p => 4,
            _ => 3,
        }
    }

    /// log2 of the horizontal and vertical chroma subsampling factors.
    pub fn log2_chroma(self) -> (u8, u8) {
        match self {
            PixelFormat::Yuv420p | PixelFormat::Yuva420p => (1, 1),
            PixelFormat::Yuv422p => (1, 0),
            PixelFormat::Yuv410p => (2, 2),
            PixelFormat::Yuv411p => (2, 0),
            PixelFormat::Yuv440p => (0, 1),
            _ => (0, 0),
        }
    }

    /// Bytes per pixel of the first plane.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgb24 | PixelFormat::Bgr24 => 3,
            PixelFormat::Rgba => 4,
            _ => 1,
        }
    }

    /// Whether the channels are interleaved in a single buffer.
    pub fn is_packed(self) -> bool {
        matches!(
            self,
            PixelFormat::Rgb24 | PixelFormat::Bgr24 | PixelFormat::Rgba
        )
    }

    /// Short lowercase name of the format.
    pub fn name(self) -> &'static str {
        match self {
            PixelFormat::Gray8 => "gray8",
            PixelFormat::Yuv420p => "yuv420p",
            PixelFormat::Yuv422p => "yuv422p",
            PixelFormat::Yuv444p => "yuv444p",
            PixelFormat::Yuv410p => "yuv410p",
            PixelFormat::Yuv411p => "yuv411p",
            PixelFormat::Yuv440p => "yuv440p",
            PixelFormat::Yuva420p => "yuva420p",
            PixelFormat::Rgb24 => "rgb24",
            PixelFormat::Bgr24 => "bgr24",
            PixelFormat::Rgba => "rgba",
        }
    }
}

impl std::fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PixelFormat {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format = match s.to_ascii_lowercase().as_str() {
            "gray8" | "gray" => PixelFormat::Gray8,
            "yuv420p" => PixelFormat::Yuv420p,
            "yuv422p" => PixelFormat::Yuv422p,
            "yuv444p" => PixelFormat::Yuv444p,
            "yuv410p" => PixelFormat::Yuv410p,
            "yuv411p" => PixelFormat::Yuv411p,
            "yuv440p" => PixelFormat::Yuv440p,
            "yuva420p" => PixelFormat::Yuva420p,
            "rgb24" => PixelFormat::Rgb24,
            "bgr24" => PixelFormat::Bgr24,
            "rgba" => PixelFormat::Rgba,
            _ => return Err(FrameError::UnknownPixelFormat(s.to_string())),
        };
        Ok(format)
    }
}

/// Immutable description of a frame: dimensions and pixel format.
///
/// # Examples
///
/// ```
/// use vstab_frame::{FrameInfo, PixelFormat};
///
/// let info = FrameInfo::new(5, 3, PixelFormat::Yuv420p).unwrap();
///
/// assert_eq!(info.planes(), 3);
/// assert_eq!(info.plane_size(1).width, 3);
/// assert_eq!(info.plane_size(1).height, 2);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FrameInfoRepr")]
pub struct FrameInfo {
    width: usize,
    height: usize,
    format: PixelFormat,
}

impl FrameInfo {
    /// Create a new frame descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::InvalidSize`] when a dimension is zero or larger
    /// than [`MAX_DIMENSION`].
    pub fn new(width: usize, height: usize, format: PixelFormat) -> Result<Self, FrameError> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(FrameError::InvalidSize(width, height, MAX_DIMENSION));
        }
        Ok(Self {
            width,
            height,
            format,
        })
    }

    /// Width of the frame (plane 0) in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the frame (plane 0) in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixel format of the frame.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Number of planes.
    pub fn planes(&self) -> usize {
        self.format.planes()
    }

    /// Bytes per pixel of the first plane.
    pub fn bytes_per_pixel(&self) -> usize {
        self.format.bytes_per_pixel()
    }

    /// Whether the frame uses a packed (interleaved) layout.
    pub fn is_packed(&self) -> bool {
        self.format.is_packed()
    }

    /// log2 subsampling of a plane as `(horizontal, vertical)`.
    ///
    /// Only the chroma planes 1 and 2 are subsampled; luma and alpha keep
    /// the full frame resolution.
    pub fn plane_subsampling(&self, plane: usize) -> (u8, u8) {
        if plane == 1 || plane == 2 {
            self.format.log2_chroma()
        } else {
            (0, 0)
        }
    }

    /// Size of a plane in samples, rounding subsampled sizes up.
    pub fn plane_size(&self, plane: usize) -> PlaneSize {
        let (log2_w, log2_h) = self.plane_subsampling(plane);
        PlaneSize {
            width: chroma_size(self.width, log2_w),
            height: chroma_size(self.height, log2_h),
        }
    }

    /// Distance in bytes between horizontally adjacent pixels of a plane.
    pub fn plane_step(&self, plane: usize) -> usize {
        if plane == 0 {
            self.bytes_per_pixel()
        } else {
            1
        }
    }

    /// Number of meaningful bytes in one row of a plane.
    pub fn plane_row_bytes(&self, plane: usize) -> usize {
        self.plane_size(plane).width * self.plane_step(plane)
    }
}

impl std::fmt::Display for FrameInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}x{} {}", self.width, self.height, self.format)
    }
}

#[derive(Deserialize)]
struct FrameInfoRepr {
    width: usize,
    height: usize,
    format: PixelFormat,
}

impl TryFrom<FrameInfoRepr> for FrameInfo {
    type Error = FrameError;

    fn try_from(repr: FrameInfoRepr) -> Result<Self, Self::Error> {
        FrameInfo::new(repr.width, repr.height, repr.format)
    }
}

/// Subsampled dimension, rounded up so odd sizes keep their last sample.
fn chroma_size(size: usize, log2: u8) -> usize {
    (size + (1 << log2) - 1) >> log2
}
