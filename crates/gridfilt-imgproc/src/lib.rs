#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the filtering operations.
pub mod error;

/// image filtering module.
pub mod filter;

/// zero padding of grids.
pub mod padding;

/// module containing parallelization utilities.
pub mod parallel;

/// run every filter over one grid or a batch of grids.
pub mod pipeline;

pub use crate::error::FilterError;
