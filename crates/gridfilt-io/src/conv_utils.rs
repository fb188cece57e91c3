use gridfilt_image::{Grid, GridDtype};

/// Convert a filter output into 8-bit samples for encoding.
///
/// Every sample is clamped to `[0, 255]` and the fractional part is
/// truncated. NaN samples map to zero.
///
/// # Example
///
/// ```
/// use gridfilt_image::Grid;
/// use gridfilt_io::quantize_u8;
///
/// let grid = Grid::from_rows(&[vec![-4.0f32, 12.9, 424.3]]).unwrap();
/// assert_eq!(quantize_u8(&grid).as_slice(), &[0, 12, 255]);
/// ```
pub fn quantize_u8(src: &Grid<f32>) -> Grid<u8> {
    src.map(|&x| u8::from_f32(x))
}
