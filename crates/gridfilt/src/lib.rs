#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use gridfilt_image as image;

#[doc(inline)]
pub use gridfilt_imgproc as imgproc;

#[doc(inline)]
pub use gridfilt_io as io;

/// Directory level driver used by the `gridfilt` binary.
pub mod app;
