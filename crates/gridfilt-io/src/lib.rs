#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
///
/// Defines [`error::IoError`] variants for file access and encoding/decoding failures.
pub mod error;

/// High-level image discovery, reading and writing functions.
///
/// See [`functional::read_image_gray8`] for automatic format detection.
pub mod functional;

/// Conversion of filter outputs into storable samples.
pub mod conv_utils;

pub use crate::conv_utils::quantize_u8;
pub use crate::error::IoError;
pub use crate::functional::{discover_images, read_image_gray8, write_image_gray8};
