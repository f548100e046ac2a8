#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use vstab_frame as frame;

#[doc(inline)]
pub use vstab_transform as transform;
