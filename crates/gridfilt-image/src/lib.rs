#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the grid module.
pub mod error;

/// grid representation for intensity images.
pub mod grid;

pub use crate::error::GridError;
pub use crate::grid::{Grid, GridDtype, GridSize};
