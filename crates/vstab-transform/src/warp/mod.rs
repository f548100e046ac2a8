//! Inverse-mapping affine warps of whole frames.
//!
//! Every destination pixel is mapped back into the source with
//! [`AffineMapper`] and reconstructed by an interpolation kernel:
//!
//! - [`warp_planar`]: planar formats, one kernel per plane, chroma planes
//!   mapped in their subsampled coordinates
//! - [`warp_packed`]: packed formats, all channels of a pixel interpolated
//!   bilinearly at the same position
//!
//! Rows of the destination are distributed by a
//! [`RowExecutor`](crate::parallel::RowExecutor).

mod mapper;
mod packed;
mod planar;

pub use mapper::{AffineMapper, RowMapper, ScaledRotation};
pub use packed::warp_packed;
pub use planar::{warp_planar, warp_plane};
