use crate::error::FilterError;

/// A square matrix of filter weights with an odd side length.
///
/// Weights are stored row-major; `get(x, y)` addresses row `x`, column `y`.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    size: usize,
    weights: Vec<f32>,
}

impl Kernel {
    /// Create a kernel from its side length and row-major weights.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] if `size` is zero or even, and
    /// [`FilterError::InvalidKernelData`] if `weights` does not hold
    /// `size * size` values.
    pub fn new(size: usize, weights: Vec<f32>) -> Result<Self, FilterError> {
        if size % 2 == 0 {
            return Err(FilterError::InvalidKernel {
                rows: size,
                cols: size,
            });
        }

        if weights.len() != size * size {
            return Err(FilterError::InvalidKernelData(weights.len(), size * size));
        }

        Ok(Self { size, weights })
    }

    /// Create a kernel from a list of rows.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] if the rows do not form a square
    /// with an odd side length.
    ///
    /// # Example
    ///
    /// ```
    /// use gridfilt_imgproc::filter::Kernel;
    ///
    /// let kernel = Kernel::from_rows(&[[0.0f32, 1.0, 0.0]; 3]).unwrap();
    /// assert_eq!(kernel.size(), 3);
    ///
    /// assert!(Kernel::from_rows(&[vec![1.0f32, 2.0], vec![3.0, 4.0]]).is_err());
    /// assert!(Kernel::from_rows(&[vec![1.0f32, 2.0, 3.0]]).is_err());
    /// ```
    pub fn from_rows<R: AsRef<[f32]>>(rows: &[R]) -> Result<Self, FilterError> {
        let size = rows.len();
        let mut weights = Vec::with_capacity(size * size);
        for row in rows {
            let row = row.as_ref();
            if row.len() != size {
                return Err(FilterError::InvalidKernel {
                    rows: size,
                    cols: row.len(),
                });
            }
            weights.extend_from_slice(row);
        }
        Kernel::new(size, weights)
    }

    /// Side length of the kernel.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Padding needed so every pixel has a full neighborhood, i.e. `size / 2`.
    pub fn offset(&self) -> usize {
        self.size / 2
    }

    /// The row-major weights of the kernel.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Weight at row `x`, column `y`, or `None` if out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.size || y >= self.size {
            return None;
        }
        self.weights.get(x * self.size + y).copied()
    }

    /// Iterate over the kernel rows.
    pub fn iter_rows(&self) -> std::slice::ChunksExact<'_, f32> {
        self.weights.chunks_exact(self.size)
    }

    /// Create a new kernel with every weight multiplied by `factor`.
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            size: self.size,
            weights: self.weights.iter().map(|w| w * factor).collect(),
        }
    }
}

/// Create the 3x3 gaussian smoothing kernel `[[1, 2, 1], [2, 4, 2], [1, 2, 1]] / 16`.
///
/// The weights sum to exactly one.
pub fn gaussian_kernel3() -> Kernel {
    #[rustfmt::skip]
    let weights = vec![
        1.0, 2.0, 1.0,
        2.0, 4.0, 2.0,
        1.0, 2.0, 1.0,
    ];
    Kernel {
        size: 3,
        weights,
    }
    .scaled(1.0 / 16.0)
}

/// Create the 3x3 sobel kernels.
///
/// # Returns
///
/// The horizontal gradient kernel `Sx` and the vertical gradient kernel `Sy`,
/// oriented for correlation (no flipping is applied by the convolver).
pub fn sobel_kernels3() -> (Kernel, Kernel) {
    #[rustfmt::skip]
    let sobel_x = vec![
        -1.0, 0.0, 1.0,
        -2.0, 0.0, 2.0,
        -1.0, 0.0, 1.0,
    ];
    #[rustfmt::skip]
    let sobel_y = vec![
        -1.0, -2.0, -1.0,
         0.0,  0.0,  0.0,
         1.0,  2.0,  1.0,
    ];
    (
        Kernel {
            size: 3,
            weights: sobel_x,
        },
        Kernel {
            size: 3,
            weights: sobel_y,
        },
    )
}
