use gridfilt_image::Grid;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Controls how the rows of a filter output are computed.
///
/// Every strategy runs the same per-pixel code and produces identical output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStrategy {
    /// Run sequentially on the current thread.
    #[default]
    Serial,

    /// Use the global Rayon thread pool to process rows in parallel.
    ///
    /// Batch processing also spreads images over the pool with this strategy.
    ParallelRows,
}

/// Apply a function to each row of the destination grid.
///
/// The function receives the row index and the mutable row samples. Each row
/// is visited exactly once.
pub fn for_each_row<T>(
    dst: &mut Grid<T>,
    strategy: ExecutionStrategy,
    f: impl Fn(usize, &mut [T]) + Send + Sync,
) where
    T: Send,
{
    let cols = dst.cols();
    match strategy {
        ExecutionStrategy::Serial => dst
            .as_slice_mut()
            .chunks_exact_mut(cols)
            .enumerate()
            .for_each(|(r, row)| f(r, row)),
        ExecutionStrategy::ParallelRows => dst
            .as_slice_mut()
            .par_chunks_exact_mut(cols)
            .enumerate()
            .for_each(|(r, row)| f(r, row)),
    }
}
