use std::{cmp::Ordering, ops};

use crate::error::GridError;

/// Grid size in samples
///
/// A struct to represent the size of a grid in samples.
///
/// # Examples
///
/// ```
/// use gridfilt_image::GridSize;
///
/// let grid_size = GridSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(grid_size.width, 10);
/// assert_eq!(grid_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridSize {
    /// Width of the grid in samples
    pub width: usize,
    /// Height of the grid in samples
    pub height: usize,
}

impl GridSize {
    /// Number of samples covered by this size.
    pub fn num_samples(&self) -> usize {
        self.width * self.height
    }

    /// Number of samples, or [`GridError::SizeOverflow`] if it does not fit in `usize`.
    pub fn checked_num_samples(&self) -> Result<usize, GridError> {
        self.width
            .checked_mul(self.height)
            .ok_or(GridError::SizeOverflow(self.width, self.height))
    }
}

impl std::fmt::Display for GridSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "GridSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for GridSize {
    fn from(size: [usize; 2]) -> Self {
        GridSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Trait for grid sample types.
///
/// Send and Sync are required for the row-parallel execution strategy.
pub trait GridDtype: Copy + Default + PartialOrd + Into<f32> + Send + Sync {
    /// Convert a f32 value to the sample type.
    ///
    /// Integer types saturate at their bounds and truncate the fractional part.
    fn from_f32(x: f32) -> Self;

    /// Total order over the sample type, used for sorting.
    ///
    /// For `f32` this is [`f32::total_cmp`]: NaN sorts above every number.
    fn total_cmp(&self, other: &Self) -> Ordering;
}

impl GridDtype for f32 {
    fn from_f32(x: f32) -> Self {
        x
    }

    fn total_cmp(&self, other: &Self) -> Ordering {
        f32::total_cmp(self, other)
    }
}

impl GridDtype for u8 {
    fn from_f32(x: f32) -> Self {
        // NaN maps to 0 under `as`
        x.clamp(0.0, 255.0) as u8
    }

    fn total_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl GridDtype for u16 {
    fn from_f32(x: f32) -> Self {
        x.clamp(0.0, u16::MAX as f32) as u16
    }

    fn total_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

/// Represents a single-channel grid of samples.
///
/// The samples are stored contiguously in row-major order. A `Grid` always
/// has at least one row and one column, and every row has the same length.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    size: GridSize,
    data: Vec<T>,
}

impl<T> Grid<T> {
    /// Create a new grid from sample data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the grid in samples.
    /// * `data` - The row-major sample data of the grid.
    ///
    /// # Errors
    ///
    /// If the size has a zero dimension or the length of the data does not
    /// match the grid size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridfilt_image::{Grid, GridSize};
    ///
    /// let grid = Grid::<u8>::new(
    ///    GridSize {
    ///       width: 10,
    ///       height: 20,
    ///    },
    ///    vec![0u8; 10 * 20],
    /// ).unwrap();
    ///
    /// assert_eq!(grid.width(), 10);
    /// assert_eq!(grid.height(), 20);
    /// ```
    pub fn new(size: GridSize, data: Vec<T>) -> Result<Self, GridError> {
        if size.height == 0 {
            return Err(GridError::EmptyGrid);
        }

        if size.width == 0 {
            return Err(GridError::ZeroWidth);
        }

        let num_samples = size.checked_num_samples()?;
        if data.len() != num_samples {
            return Err(GridError::InvalidDataLength(data.len(), num_samples));
        }

        Ok(Self { size, data })
    }

    /// Create a new grid with every sample set to `val`.
    pub fn from_size_val(size: GridSize, val: T) -> Result<Self, GridError>
    where
        T: Clone,
    {
        Grid::new(size, vec![val; size.checked_num_samples()?])
    }

    /// Create a new grid by evaluating `f(row, col)` for every sample.
    pub fn from_fn(
        size: GridSize,
        mut f: impl FnMut(usize, usize) -> T,
    ) -> Result<Self, GridError> {
        let mut data = Vec::with_capacity(size.checked_num_samples()?);
        for r in 0..size.height {
            for c in 0..size.width {
                data.push(f(r, c));
            }
        }
        Grid::new(size, data)
    }

    /// Create a new grid from a list of rows.
    ///
    /// This is the boundary for data handed over by an external source, so the
    /// rows are checked to be non-empty and of equal length.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridfilt_image::{Grid, GridError};
    ///
    /// let grid = Grid::from_rows(&[vec![1u8, 2], vec![3, 4]]).unwrap();
    /// assert_eq!(grid.get(1, 0), Some(&3));
    ///
    /// let ragged = Grid::from_rows(&[vec![1u8, 2], vec![3]]);
    /// assert!(matches!(ragged, Err(GridError::RaggedRows { row: 1, .. })));
    /// ```
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self, GridError>
    where
        T: Clone,
    {
        let first = rows.first().ok_or(GridError::EmptyGrid)?;
        let width = first.as_ref().len();
        if width == 0 {
            return Err(GridError::ZeroWidth);
        }

        let mut data = Vec::with_capacity(width * rows.len());
        for (row, samples) in rows.iter().enumerate() {
            let samples = samples.as_ref();
            if samples.len() != width {
                return Err(GridError::RaggedRows {
                    row,
                    len: samples.len(),
                    expected: width,
                });
            }
            data.extend_from_slice(samples);
        }

        Grid::new(
            GridSize {
                width,
                height: rows.len(),
            },
            data,
        )
    }

    /// Get the size of the grid in samples.
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Get the width of the grid in samples.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the grid in samples.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of columns of the grid.
    pub fn cols(&self) -> usize {
        self.width()
    }

    /// Get the number of rows of the grid.
    pub fn rows(&self) -> usize {
        self.height()
    }

    /// Get the sample data of the grid in row-major order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the mutable sample data of the grid in row-major order.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the grid and return its row-major sample data.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Get a reference to the sample at `(row, col)`, or `None` if out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row >= self.height() || col >= self.width() {
            return None;
        }
        self.data.get(row * self.width() + col)
    }

    /// Get a mutable reference to the sample at `(row, col)`, or `None` if out of bounds.
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        if row >= self.height() || col >= self.width() {
            return None;
        }
        let width = self.width();
        self.data.get_mut(row * width + col)
    }

    /// Get a reference to the sample at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::IndexOutOfBounds`] if the index is outside the grid.
    pub fn try_get(&self, row: usize, col: usize) -> Result<&T, GridError> {
        self.get(row, col).ok_or(GridError::IndexOutOfBounds(
            row,
            col,
            self.height(),
            self.width(),
        ))
    }

    /// Get the samples of a row, or `None` if the row is out of bounds.
    pub fn row(&self, row: usize) -> Option<&[T]> {
        if row >= self.height() {
            return None;
        }
        let start = row * self.width();
        Some(&self.data[start..start + self.width()])
    }

    /// Iterate over the rows of the grid as slices.
    pub fn iter_rows(&self) -> std::slice::ChunksExact<'_, T> {
        self.data.chunks_exact(self.size.width)
    }

    /// Iterate mutably over the rows of the grid as slices.
    pub fn iter_rows_mut(&mut self) -> std::slice::ChunksExactMut<'_, T> {
        self.data.chunks_exact_mut(self.size.width)
    }

    /// Create a new grid of the same size by applying `f` to every sample.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            size: self.size,
            data: self.data.iter().map(f).collect(),
        }
    }

    /// Create a new grid by combining this grid with another of the same size.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDataLength`] if the sizes differ.
    pub fn zip_map<U, V>(
        &self,
        other: &Grid<U>,
        mut f: impl FnMut(&T, &U) -> V,
    ) -> Result<Grid<V>, GridError> {
        if self.size != other.size {
            return Err(GridError::InvalidDataLength(
                other.size.num_samples(),
                self.size.num_samples(),
            ));
        }
        Ok(Grid {
            size: self.size,
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(a, b)| f(a, b))
                .collect(),
        })
    }
}

impl<T: GridDtype> Grid<T> {
    /// Widen every sample to `f32`.
    pub fn to_f32(&self) -> Grid<f32> {
        self.map(|&x| x.into())
    }
}

impl<T> ops::Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        assert!(
            row < self.height() && col < self.width(),
            "index ({row}, {col}) out of bounds for grid of size {}",
            self.size
        );
        &self.data[row * self.width() + col]
    }
}

#[cfg(test)]
mod tests {
    use crate::grid::{Grid, GridDtype, GridError, GridSize};
    use std::cmp::Ordering;

    #[test]
    fn grid_size() {
        let grid_size = GridSize {
            width: 10,
            height: 20,
        };
        assert_eq!(grid_size.width, 10);
        assert_eq!(grid_size.height, 20);
        assert_eq!(grid_size.num_samples(), 200);
        assert_eq!(
            grid_size.to_string(),
            "GridSize { width: 10, height: 20 }"
        );
    }

    #[test]
    fn grid_smoke() -> Result<(), GridError> {
        let grid = Grid::<u8>::new(
            GridSize {
                width: 10,
                height: 20,
            },
            vec![0u8; 10 * 20],
        )?;
        assert_eq!(grid.width(), 10);
        assert_eq!(grid.height(), 20);
        assert_eq!(grid.cols(), 10);
        assert_eq!(grid.rows(), 20);

        Ok(())
    }

    #[test]
    fn grid_rejects_bad_shapes() {
        let res = Grid::<u8>::new([0, 3].into(), vec![]);
        assert_eq!(res, Err(GridError::ZeroWidth));

        let res = Grid::<u8>::new([3, 0].into(), vec![]);
        assert_eq!(res, Err(GridError::EmptyGrid));

        let res = Grid::<u8>::new([2, 2].into(), vec![0; 3]);
        assert_eq!(res, Err(GridError::InvalidDataLength(3, 4)));
    }

    #[test]
    fn grid_from_rows() -> Result<(), GridError> {
        let grid = Grid::from_rows(&[vec![1u8, 2, 3], vec![4, 5, 6]])?;
        assert_eq!(grid.size(), [3, 2].into());
        assert_eq!(grid.as_slice(), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(grid.row(1), Some(&[4u8, 5, 6][..]));
        assert_eq!(grid.row(2), None);

        let empty: [Vec<u8>; 0] = [];
        assert_eq!(Grid::from_rows(&empty), Err(GridError::EmptyGrid));
        assert_eq!(
            Grid::<u8>::from_rows(&[vec![], vec![]]),
            Err(GridError::ZeroWidth)
        );
        assert_eq!(
            Grid::from_rows(&[vec![1u8, 2], vec![3, 4], vec![5]]),
            Err(GridError::RaggedRows {
                row: 2,
                len: 1,
                expected: 2
            })
        );

        Ok(())
    }

    #[test]
    fn grid_bounds_checked_access() -> Result<(), GridError> {
        let mut grid = Grid::from_fn([3, 2].into(), |r, c| (r * 10 + c) as u8)?;
        assert_eq!(grid.get(1, 2), Some(&12));
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.get(0, 3), None);
        assert_eq!(grid[(0, 1)], 1);
        assert_eq!(grid.try_get(5, 0), Err(GridError::IndexOutOfBounds(5, 0, 2, 3)));

        if let Some(v) = grid.get_mut(0, 0) {
            *v = 42;
        }
        assert_eq!(grid.try_get(0, 0)?, &42);

        Ok(())
    }

    #[test]
    fn grid_iter_rows() -> Result<(), GridError> {
        let grid = Grid::from_fn([2, 3].into(), |r, c| r * 2 + c)?;
        let rows = grid.iter_rows().collect::<Vec<_>>();
        assert_eq!(rows, vec![&[0usize, 1][..], &[2, 3][..], &[4, 5][..]]);
        Ok(())
    }

    #[test]
    fn grid_map_and_zip() -> Result<(), GridError> {
        let a = Grid::from_rows(&[vec![1u8, 2], vec![3, 4]])?;
        let b = a.to_f32();
        assert_eq!(b.as_slice(), &[1.0, 2.0, 3.0, 4.0]);

        let sum = b.zip_map(&b, |x, y| x + y)?;
        assert_eq!(sum.as_slice(), &[2.0, 4.0, 6.0, 8.0]);

        let other = Grid::from_size_val([1, 1].into(), 0.0f32)?;
        assert!(b.zip_map(&other, |x, y| x + y).is_err());

        Ok(())
    }

    #[test]
    fn grid_size_overflow() {
        let size = GridSize {
            width: usize::MAX,
            height: 2,
        };
        assert_eq!(
            size.checked_num_samples(),
            Err(GridError::SizeOverflow(usize::MAX, 2))
        );
        assert_eq!(
            Grid::<u8>::new(size, vec![]),
            Err(GridError::SizeOverflow(usize::MAX, 2))
        );
        assert_eq!(
            Grid::from_size_val(size, 0u8),
            Err(GridError::SizeOverflow(usize::MAX, 2))
        );
    }

    #[test]
    fn dtype_total_cmp() {
        assert_eq!(GridDtype::total_cmp(&3u8, &7u8), Ordering::Less);
        assert_eq!(GridDtype::total_cmp(&9u16, &9u16), Ordering::Equal);
        assert_eq!(GridDtype::total_cmp(&f32::NAN, &1e9f32), Ordering::Greater);
        assert_eq!(GridDtype::total_cmp(&-1.0f32, &f32::NAN), Ordering::Less);
    }

    #[test]
    fn dtype_from_f32_saturates() {
        assert_eq!(u8::from_f32(-3.0), 0);
        assert_eq!(u8::from_f32(300.7), 255);
        assert_eq!(u8::from_f32(99.9), 99);
        assert_eq!(u8::from_f32(f32::NAN), 0);
        assert_eq!(u16::from_f32(70000.0), u16::MAX);
        assert_eq!(f32::from_f32(-1.5), -1.5);
    }
}
