/// An error type for the grid module.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Error when the grid has no rows.
    #[error("Grid has no rows")]
    EmptyGrid,

    /// Error when the grid rows have no samples.
    #[error("Grid has zero width")]
    ZeroWidth,

    /// Error when a row length differs from the first row.
    #[error("Row {row} has length {len}, expected {expected}")]
    RaggedRows {
        /// index of the offending row
        row: usize,
        /// length of the offending row
        len: usize,
        /// length of the first row
        expected: usize,
    },

    /// Error when the data length does not match the grid size.
    #[error("Data length ({0}) does not match the grid size ({1})")]
    InvalidDataLength(usize, usize),

    /// Error when a sample index is out of bounds.
    #[error("Sample index ({0}, {1}) is out of bounds for grid of size {2}x{3}")]
    IndexOutOfBounds(usize, usize, usize, usize),

    /// Error when the number of samples does not fit in `usize`.
    #[error("Grid size {0}x{1} overflows")]
    SizeOverflow(usize, usize),
}
