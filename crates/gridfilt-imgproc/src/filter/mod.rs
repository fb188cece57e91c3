//! Filter operations
//!
//! This module provides the linear and non-linear neighborhood filters.

/// Filter kernels
pub mod kernels;
pub use kernels::Kernel;

/// Correlation of a grid with a square kernel
mod convolution;
pub use convolution::*;

/// Filter operations
mod ops;
pub use ops::*;
