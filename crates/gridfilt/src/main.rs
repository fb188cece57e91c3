use argh::FromArgs;
use std::path::PathBuf;

use gridfilt::{app, imgproc::pipeline::FilterPipeline};

#[derive(FromArgs)]
/// Apply the gaussian, sobel and median filters to every image of a directory
struct Args {
    /// directory with the input .jpg and .png images
    #[argh(option, short = 'i', default = "PathBuf::from(\"./input\")")]
    input_dir: PathBuf,

    /// directory where the filtered images are written
    #[argh(option, short = 'o', default = "PathBuf::from(\"./output\")")]
    output_dir: PathBuf,

    /// optional JSON file with the pipeline configuration
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,

    /// side length of the median window, must be odd
    #[argh(option)]
    median_kernel_size: Option<usize>,

    /// process rows and images on the rayon thread pool
    #[argh(switch, short = 'p')]
    parallel: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args: Args = argh::from_env();

    let config = match &args.config {
        Some(path) => app::load_config(path)?,
        None => Default::default(),
    };
    let config = app::apply_overrides(config, args.median_kernel_size, args.parallel);
    let pipeline = FilterPipeline::new(config)?;

    let images = app::load_images(&args.input_dir)?;
    log::info!("{} images loaded", images.len());

    let batch = pipeline.apply_batch(images);
    log::info!("filters applied");

    for line in app::summarize(&batch) {
        log::info!("{line}");
    }

    for (name, err) in batch.failures() {
        log::error!("{name}: {err}");
    }

    let written = app::save_results(&args.output_dir, &batch)?;
    log::info!(
        "{} images saved to {}",
        written.len(),
        args.output_dir.display()
    );

    Ok(())
}
