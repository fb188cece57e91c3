use gridfilt_image::{Grid, GridDtype};
use num_traits::Zero;

use super::kernels::Kernel;
use crate::{
    error::FilterError,
    padding::pad,
    parallel::{for_each_row, ExecutionStrategy},
};

/// Correlate a grid with a square kernel.
///
/// Every output sample `(i, j)` is the dot product of the kernel with the
/// `size`x`size` window of the zero padded grid whose top-left corner is
/// `(i, j)`. The kernel is applied as given (no 180 degree rotation).
///
/// # Arguments
///
/// * `src` - The source grid with shape (H, W).
/// * `kernel` - The kernel to correlate with.
///
/// # Returns
///
/// A grid with shape (H, W) holding the unclamped responses.
///
/// # Example
///
/// ```
/// use gridfilt_image::Grid;
/// use gridfilt_imgproc::filter::{convolve, Kernel};
///
/// let src = Grid::from_rows(&[vec![1u8, 2], vec![3, 4]]).unwrap();
/// let identity = Kernel::from_rows(&[
///     [0.0f32, 0.0, 0.0],
///     [0.0, 1.0, 0.0],
///     [0.0, 0.0, 0.0],
/// ]).unwrap();
///
/// let dst = convolve(&src, &identity).unwrap();
/// assert_eq!(dst.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
/// ```
pub fn convolve<T>(src: &Grid<T>, kernel: &Kernel) -> Result<Grid<f32>, FilterError>
where
    T: GridDtype + Zero,
{
    convolve_with(src, kernel, ExecutionStrategy::Serial)
}

/// Correlate a grid with a square kernel using the given execution strategy.
///
/// See [`convolve`]. All strategies produce the same output.
pub fn convolve_with<T>(
    src: &Grid<T>,
    kernel: &Kernel,
    strategy: ExecutionStrategy,
) -> Result<Grid<f32>, FilterError>
where
    T: GridDtype + Zero,
{
    let size = kernel.size();
    let padded = pad(src, kernel.offset())?;
    let mut dst = Grid::from_size_val(src.size(), 0.0f32)?;

    for_each_row(&mut dst, strategy, |r, dst_row| {
        dst_row.iter_mut().enumerate().for_each(|(c, out)| {
            *out = padded
                .window_rows(r, c, size)
                .zip(kernel.iter_rows())
                .map(|(win, weights)| {
                    win.iter()
                        .zip(weights)
                        .map(|(&px, &w)| Into::<f32>::into(px) * w)
                        .sum::<f32>()
                })
                .sum();
        });
    });

    Ok(dst)
}
