use std::ops;

use gridfilt_image::{Grid, GridError, GridSize};
use num_traits::Zero;

/// A grid enlarged by `offset` zero-valued samples on every side.
///
/// Produced by [`pad`] for the duration of a single filter call. The interior
/// holds a verbatim copy of the source grid shifted by `offset` in both axes.
#[derive(Clone, Debug, PartialEq)]
pub struct PaddedGrid<T> {
    grid: Grid<T>,
    offset: usize,
}

impl<T> PaddedGrid<T> {
    /// Amount of padding added on each side.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Size of the source grid before padding.
    pub fn inner_size(&self) -> GridSize {
        GridSize {
            width: self.grid.width() - 2 * self.offset,
            height: self.grid.height() - 2 * self.offset,
        }
    }

    /// Consume the padded grid and return the underlying grid.
    pub fn into_inner(self) -> Grid<T> {
        self.grid
    }

    /// Iterate over the rows of the `size`x`size` window whose top-left corner
    /// is `(row, col)` in padded coordinates.
    ///
    /// Rows and columns falling outside the padded grid are not yielded, so a
    /// window anchored at a valid output pixel of a `size` kernel is always
    /// complete when `offset == size / 2`.
    pub fn window_rows(
        &self,
        row: usize,
        col: usize,
        size: usize,
    ) -> impl Iterator<Item = &[T]> + '_ {
        let width = self.grid.width();
        let start = col.min(width);
        let end = col.saturating_add(size).min(width);
        self.grid
            .iter_rows()
            .skip(row)
            .take(size)
            .map(move |r| &r[start..end])
    }

    /// Iterate over the samples of the `size`x`size` window whose top-left
    /// corner is `(row, col)`, in row-major order.
    pub fn window(&self, row: usize, col: usize, size: usize) -> impl Iterator<Item = &T> + '_ {
        self.window_rows(row, col, size).flatten()
    }
}

impl<T> ops::Deref for PaddedGrid<T> {
    type Target = Grid<T>;

    fn deref(&self) -> &Self::Target {
        &self.grid
    }
}

/// Create a copy of `src` with `offset` zero samples added on all four sides.
///
/// The output has size `(width + 2 * offset, height + 2 * offset)`. An offset
/// of zero yields a plain copy. The source grid is not modified.
///
/// # Arguments
///
/// * `src` - The source grid to pad.
/// * `offset` - The amount of padding (in samples) for every side.
///
/// # Example
///
/// ```rust
/// use gridfilt_image::Grid;
/// use gridfilt_imgproc::padding::pad;
///
/// let src = Grid::from_rows(&[vec![1u8, 2], vec![3, 4]]).unwrap();
/// let padded = pad(&src, 1).unwrap();
///
/// assert_eq!(padded.width(), 4);
/// assert_eq!(padded.height(), 4);
/// assert_eq!(
///     padded.as_slice(),
///     &[
///         0, 0, 0, 0,
///         0, 1, 2, 0,
///         0, 3, 4, 0,
///         0, 0, 0, 0,
///     ]
/// );
/// ```
pub fn pad<T>(src: &Grid<T>, offset: usize) -> Result<PaddedGrid<T>, GridError>
where
    T: Copy + Zero,
{
    let grow = |len: usize| {
        offset
            .checked_mul(2)
            .and_then(|border| len.checked_add(border))
            .ok_or(GridError::SizeOverflow(src.width(), src.height()))
    };
    let new_size = GridSize {
        width: grow(src.width())?,
        height: grow(src.height())?,
    };

    let mut grid = Grid::from_size_val(new_size, T::zero())?;

    // copy old grid data as center of new grid data
    let new_stride = new_size.width;
    let old_stride = src.width();
    let row_offset = offset * new_stride + offset;

    for (src_row, dst_row) in src
        .iter_rows()
        .zip(grid.as_slice_mut()[row_offset..].chunks_mut(new_stride))
    {
        dst_row[..old_stride].copy_from_slice(src_row);
    }

    Ok(PaddedGrid { grid, offset })
}
