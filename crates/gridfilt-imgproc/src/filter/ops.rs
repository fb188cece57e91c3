use gridfilt_image::{Grid, GridDtype, GridError};
use num_traits::Zero;

use super::{convolve_with, kernels};
use crate::{
    error::FilterError,
    padding::pad,
    parallel::{for_each_row, ExecutionStrategy},
};

/// Default side length of the median filter window.
pub const DEFAULT_MEDIAN_KERNEL_SIZE: usize = 3;

/// Smooth a grid with the 3x3 gaussian kernel.
///
/// The output is a weighted average of each zero padded neighborhood and is
/// not clamped; samples near the border are darkened by the padding.
///
/// # Arguments
///
/// * `src` - The source grid with shape (H, W).
///
/// # Returns
///
/// The smoothed grid with shape (H, W).
pub fn gaussian_filter<T>(src: &Grid<T>) -> Result<Grid<f32>, FilterError>
where
    T: GridDtype + Zero,
{
    gaussian_filter_with(src, ExecutionStrategy::Serial)
}

/// Smooth a grid with the 3x3 gaussian kernel using the given execution strategy.
pub fn gaussian_filter_with<T>(
    src: &Grid<T>,
    strategy: ExecutionStrategy,
) -> Result<Grid<f32>, FilterError>
where
    T: GridDtype + Zero,
{
    log::debug!("gaussian filter on {}", src.size());
    convolve_with(src, &kernels::gaussian_kernel3(), strategy)
}

/// Compute the sobel gradient magnitude of a grid.
///
/// The horizontal and vertical responses `Gx` and `Gy` are computed with the
/// 3x3 sobel kernels and combined as `sqrt(Gx^2 + Gy^2)`.
///
/// # Arguments
///
/// * `src` - The source grid with shape (H, W).
///
/// # Returns
///
/// The gradient magnitude with shape (H, W). Every sample is non-negative and
/// may exceed the input range near strong edges.
pub fn sobel_filter<T>(src: &Grid<T>) -> Result<Grid<f32>, FilterError>
where
    T: GridDtype + Zero,
{
    sobel_filter_with(src, ExecutionStrategy::Serial)
}

/// Compute the sobel gradient magnitude using the given execution strategy.
pub fn sobel_filter_with<T>(
    src: &Grid<T>,
    strategy: ExecutionStrategy,
) -> Result<Grid<f32>, FilterError>
where
    T: GridDtype + Zero,
{
    log::debug!("sobel filter on {}", src.size());

    let (sobel_x, sobel_y) = kernels::sobel_kernels3();
    let gx = convolve_with(src, &sobel_x, strategy)?;
    let gy = convolve_with(src, &sobel_y, strategy)?;

    Ok(gx.zip_map(&gy, |&gx, &gy| (gx * gx + gy * gy).sqrt())?)
}

/// Replace every sample with the median of its neighborhood.
///
/// The grid is zero padded by `kernel_size / 2`. For each output sample
/// `(i, j)` the `kernel_size * kernel_size` values of the padded window with
/// top-left corner `(i, j)` are sorted and the value at index
/// `(kernel_size * kernel_size) / 2` is taken. Border samples therefore see
/// injected zeros and are biased low.
///
/// # Arguments
///
/// * `src` - The source grid with shape (H, W).
/// * `kernel_size` - The odd side length of the window.
///
/// # Errors
///
/// Returns [`FilterError::InvalidKernel`] if `kernel_size` is zero or even.
///
/// # Example
///
/// ```
/// use gridfilt_image::Grid;
/// use gridfilt_imgproc::filter::{median_filter, DEFAULT_MEDIAN_KERNEL_SIZE};
///
/// let src = Grid::from_rows(&[
///     vec![5u8, 5, 5],
///     vec![5, 255, 5],
///     vec![5, 5, 5],
/// ]).unwrap();
///
/// let dst = median_filter(&src, DEFAULT_MEDIAN_KERNEL_SIZE).unwrap();
/// assert_eq!(dst.get(1, 1), Some(&5));
/// ```
pub fn median_filter<T>(src: &Grid<T>, kernel_size: usize) -> Result<Grid<T>, FilterError>
where
    T: GridDtype + Zero,
{
    median_filter_with(src, kernel_size, ExecutionStrategy::Serial)
}

/// Median filter a grid using the given execution strategy.
///
/// See [`median_filter`].
pub fn median_filter_with<T>(
    src: &Grid<T>,
    kernel_size: usize,
    strategy: ExecutionStrategy,
) -> Result<Grid<T>, FilterError>
where
    T: GridDtype + Zero,
{
    let invalid_kernel = || FilterError::InvalidKernel {
        rows: kernel_size,
        cols: kernel_size,
    };

    if kernel_size % 2 == 0 {
        return Err(invalid_kernel());
    }
    let window_len = kernel_size
        .checked_mul(kernel_size)
        .ok_or_else(invalid_kernel)?;

    log::debug!("median filter {kernel_size}x{kernel_size} on {}", src.size());

    let padded = match pad(src, kernel_size / 2) {
        Err(GridError::SizeOverflow(..)) => return Err(invalid_kernel()),
        res => res?,
    };
    let mut dst = Grid::from_size_val(src.size(), T::zero())?;
    let mid = window_len / 2;

    for_each_row(&mut dst, strategy, |r, dst_row| {
        let mut window = Vec::with_capacity(window_len);
        dst_row.iter_mut().enumerate().for_each(|(c, out)| {
            window.clear();
            window.extend(padded.window(r, c, kernel_size).copied());
            window.sort_unstable_by(|a, b| a.total_cmp(b));
            if let Some(&median) = window.get(mid) {
                *out = median;
            }
        });
    });

    Ok(dst)
}
