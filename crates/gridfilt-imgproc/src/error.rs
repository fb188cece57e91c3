use gridfilt_image::GridError;

/// An error type for the filtering operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    /// Error when a kernel is not square or its side length is not odd.
    #[error("Kernel must be square with an odd side length, got {rows}x{cols}")]
    InvalidKernel {
        /// number of kernel rows
        rows: usize,
        /// number of kernel columns
        cols: usize,
    },

    /// Error when the kernel weights do not fill the kernel.
    #[error("Kernel data length ({0}) does not match the kernel size ({1})")]
    InvalidKernelData(usize, usize),

    /// Error when the input grid violates the grid invariants.
    #[error("Invalid grid. {0}")]
    InvalidGrid(#[from] GridError),

    /// Error when a batch holds more than one item with the same identifier.
    #[error("Identifier appears more than once in the batch")]
    DuplicateKey,
}
