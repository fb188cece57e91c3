use std::path::{Path, PathBuf};

use gridfilt_image::Grid;
use gridfilt_imgproc::{
    parallel::ExecutionStrategy,
    pipeline::{BatchResults, PipelineConfig},
};
use gridfilt_io::{discover_images, quantize_u8, read_image_gray8, write_image_gray8, IoError};

/// Message reported when there is nothing to show or save.
pub const NO_RESULTS: &str = "No results available. Apply filters first.";

/// An error type for the directory driver.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Error reading or writing images.
    #[error(transparent)]
    Io(#[from] IoError),

    /// Error accessing the filesystem.
    #[error("Failed to manipulate the file. {0}")]
    File(#[from] std::io::Error),

    /// Error parsing the configuration file.
    #[error("Invalid configuration file {0}: {1}")]
    Config(PathBuf, serde_json::Error),

    /// Error when an image path has no usable file name.
    #[error("Invalid image file name: {0}")]
    InvalidFileName(PathBuf),
}

/// Read a pipeline configuration from a JSON file.
///
/// Missing fields take their default value.
pub fn load_config(path: impl AsRef<Path>) -> Result<PipelineConfig, AppError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| AppError::Config(path.to_path_buf(), e))
}

/// Apply command line overrides on top of a configuration.
pub fn apply_overrides(
    mut config: PipelineConfig,
    median_kernel_size: Option<usize>,
    parallel: bool,
) -> PipelineConfig {
    if let Some(k) = median_kernel_size {
        config.median_kernel_size = k;
    }
    if parallel {
        config.strategy = ExecutionStrategy::ParallelRows;
    }
    config
}

/// Load every image of a directory as a grayscale grid, keyed by file name.
///
/// Images that cannot be decoded are logged and skipped.
pub fn load_images(input_dir: impl AsRef<Path>) -> Result<Vec<(String, Grid<u8>)>, AppError> {
    let mut images = Vec::new();

    for path in discover_images(input_dir)? {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(String::from)
            .ok_or_else(|| AppError::InvalidFileName(path.clone()))?;

        match read_image_gray8(&path) {
            Ok(grid) => images.push((name, grid)),
            Err(err) => log::warn!("skipping {}: {err}", path.display()),
        }
    }

    Ok(images)
}

fn empty_batch_message(batch: &BatchResults<String>) -> String {
    match batch.failures().len() {
        0 => NO_RESULTS.to_string(),
        n => format!("All {n} images failed, no results available."),
    }
}

/// Describe the results of a batch, one line per image and filter.
pub fn summarize(batch: &BatchResults<String>) -> Vec<String> {
    if batch.is_empty() {
        return vec![empty_batch_message(batch)];
    }

    let mut lines = Vec::new();
    for (name, results) in batch.iter() {
        lines.push(format!("{name}:"));
        for (kind, grid) in results.iter() {
            lines.push(format!("  {kind}: {}x{}", grid.rows(), grid.cols()));
        }
    }
    lines
}

/// Quantize and write every filter output as `<filter>_<filename>`.
///
/// The output directory is created if needed. Returns the written paths.
pub fn save_results(
    output_dir: impl AsRef<Path>,
    batch: &BatchResults<String>,
) -> Result<Vec<PathBuf>, AppError> {
    let output_dir = output_dir.as_ref();

    if batch.is_empty() {
        log::info!("{}", empty_batch_message(batch));
        return Ok(Vec::new());
    }

    std::fs::create_dir_all(output_dir)?;

    let mut written = Vec::new();
    for (name, results) in batch.iter() {
        for (kind, grid) in results.iter() {
            let path = output_dir.join(format!("{kind}_{name}"));
            write_image_gray8(&path, &quantize_u8(grid))?;
            log::debug!("saved {}", path.display());
            written.push(path);
        }
    }

    Ok(written)
}
