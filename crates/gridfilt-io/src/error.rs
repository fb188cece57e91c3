/// An error type for the io module.
#[derive(thiserror::Error, Debug)]
pub enum IoError {
    /// Error when the file does not exist.
    #[error("File does not exist: {0}")]
    FileDoesNotExist(std::path::PathBuf),

    /// Error when the directory does not exist.
    #[error("Directory does not exist: {0}")]
    DirectoryDoesNotExist(std::path::PathBuf),

    /// Invalid file extension.
    #[error("File does not have a valid extension: {0}")]
    InvalidFileExtension(std::path::PathBuf),

    /// Error to open the file.
    #[error("Failed to manipulate the file. {0}")]
    FileError(#[from] std::io::Error),

    /// Error to create the grid.
    #[error("Failed to create grid. {0}")]
    GridCreationError(#[from] gridfilt_image::GridError),

    /// Error to decode or encode the image.
    #[error("Failed to decode or encode the image. {0}")]
    ImageError(#[from] image::ImageError),

    /// Error when the grid cannot be wrapped into an image buffer.
    #[error("Grid of size {0}x{1} cannot be encoded")]
    InvalidImageBuffer(usize, usize),
}
