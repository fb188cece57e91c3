use std::path::{Path, PathBuf};

use gridfilt_image::{Grid, GridSize};

use crate::error::IoError;

/// File extensions accepted by [`discover_images`].
pub const IMAGE_EXTENSIONS: [&str; 2] = ["jpg", "png"];

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// List the images of a directory.
///
/// Only regular files with a `jpg` or `png` extension (any case) are
/// returned; sub directories are not visited.
///
/// # Arguments
///
/// * `dir_path` - The directory to scan.
///
/// # Returns
///
/// The image paths sorted by file name.
pub fn discover_images(dir_path: impl AsRef<Path>) -> Result<Vec<PathBuf>, IoError> {
    let dir_path = dir_path.as_ref();
    if !dir_path.is_dir() {
        return Err(IoError::DirectoryDoesNotExist(dir_path.to_path_buf()));
    }

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir_path)? {
        let path = entry?.path();
        if path.is_file() && has_image_extension(&path) {
            paths.push(path);
        }
    }
    paths.sort();

    log::debug!("found {} images in {}", paths.len(), dir_path.display());

    Ok(paths)
}

/// Read an image as a single channel 8-bit grid.
///
/// The format is guessed from the file content; color images are converted
/// to luma.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// A grid holding the intensity of every pixel.
pub fn read_image_gray8(file_path: impl AsRef<Path>) -> Result<Grid<u8>, IoError> {
    let file_path = file_path.as_ref();

    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let img = image::ImageReader::open(file_path)?
        .with_guessed_format()?
        .decode()?
        .into_luma8();

    let size = GridSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    Ok(Grid::new(size, img.into_raw())?)
}

/// Write a single channel 8-bit grid to an image file.
///
/// The format is chosen from the file extension.
///
/// # Arguments
///
/// * `file_path` - The path to the output image.
/// * `grid` - The grid to encode.
pub fn write_image_gray8(file_path: impl AsRef<Path>, grid: &Grid<u8>) -> Result<(), IoError> {
    let file_path = file_path.as_ref();

    if !has_image_extension(file_path) {
        return Err(IoError::InvalidFileExtension(file_path.to_path_buf()));
    }

    let img = image::GrayImage::from_raw(
        grid.width() as u32,
        grid.height() as u32,
        grid.as_slice().to_vec(),
    )
    .ok_or(IoError::InvalidImageBuffer(grid.width(), grid.height()))?;

    img.save(file_path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_write_png() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("ramp.png");

        let grid = Grid::from_fn([5, 3].into(), |r, c| (r * 50 + c * 10) as u8)?;
        write_image_gray8(&file_path, &grid)?;
        assert!(file_path.exists(), "File does not exist: {:?}", file_path);

        let grid_back = read_image_gray8(&file_path)?;
        assert_eq!(grid_back, grid);

        Ok(())
    }

    #[test]
    fn read_rgb_as_gray() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("white.png");

        image::RgbImage::from_pixel(4, 2, image::Rgb([255, 255, 255])).save(&file_path)?;

        let grid = read_image_gray8(&file_path)?;
        assert_eq!(grid.size(), [4, 2].into());
        assert!(grid.as_slice().iter().all(|&v| v == 255));

        Ok(())
    }

    #[test]
    fn read_missing_file() {
        let res = read_image_gray8("does/not/exist.png");
        assert!(matches!(res, Err(IoError::FileDoesNotExist(_))));
    }

    #[test]
    fn write_unknown_extension() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let grid = Grid::from_size_val([2, 2].into(), 1u8)?;
        let res = write_image_gray8(tmp_dir.path().join("out.txt"), &grid);
        assert!(matches!(res, Err(IoError::InvalidFileExtension(_))));
        Ok(())
    }

    #[test]
    fn discover_filters_and_sorts() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let grid = Grid::from_size_val([2, 2].into(), 7u8)?;

        write_image_gray8(tmp_dir.path().join("b.png"), &grid)?;
        write_image_gray8(tmp_dir.path().join("a.jpg"), &grid)?;
        std::fs::write(tmp_dir.path().join("C.PNG"), b"not decoded here")?;
        std::fs::write(tmp_dir.path().join("notes.txt"), b"skip me")?;
        std::fs::create_dir(tmp_dir.path().join("nested.png"))?;

        let names = discover_images(tmp_dir.path())?
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(String::from))
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["C.PNG", "a.jpg", "b.png"]);

        Ok(())
    }

    #[test]
    fn discover_missing_dir() {
        let res = discover_images("does/not/exist");
        assert!(matches!(res, Err(IoError::DirectoryDoesNotExist(_))));
    }
}
