use gridfilt::{
    app::{load_images, save_results, summarize},
    image::Grid,
    imgproc::pipeline::FilterPipeline,
    io::{read_image_gray8, write_image_gray8},
};

#[test]
fn test_directory_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempfile::tempdir()?;
    let input_dir = tmp_dir.path().join("input");
    let output_dir = tmp_dir.path().join("output");
    std::fs::create_dir(&input_dir)?;

    let flat = Grid::from_size_val([4, 4].into(), 100u8)?;
    let ramp = Grid::from_fn([5, 3].into(), |r, c| (r * 20 + c * 40) as u8)?;
    write_image_gray8(input_dir.join("flat.png"), &flat)?;
    write_image_gray8(input_dir.join("ramp.png"), &ramp)?;
    std::fs::write(input_dir.join("broken.png"), b"not a png")?;
    std::fs::write(input_dir.join("readme.txt"), b"ignored")?;

    let images = load_images(&input_dir)?;
    let names = images.iter().map(|(n, _)| n.as_str()).collect::<Vec<_>>();
    assert_eq!(names, vec!["flat.png", "ramp.png"]);

    let batch = FilterPipeline::default().apply_batch(images);
    assert_eq!(batch.len(), 2);
    assert!(batch.failures().is_empty());
    assert_eq!(summarize(&batch).len(), 8);

    let written = save_results(&output_dir, &batch)?;
    assert_eq!(written.len(), 6);
    for prefix in ["gaussian", "sobel", "median"] {
        for name in ["flat.png", "ramp.png"] {
            assert!(output_dir.join(format!("{prefix}_{name}")).is_file());
        }
    }

    #[rustfmt::skip]
    let expected_median = Grid::from_rows(&[
        vec![0u8, 100, 100, 0],
        vec![100, 100, 100, 100],
        vec![100, 100, 100, 100],
        vec![0, 100, 100, 0],
    ])?;
    assert_eq!(read_image_gray8(output_dir.join("median_flat.png"))?, expected_median);

    // 56.25 at the corners and 75 along the edges, truncated on save
    #[rustfmt::skip]
    let expected_gaussian = Grid::from_rows(&[
        vec![56u8, 75, 75, 56],
        vec![75, 100, 100, 75],
        vec![75, 100, 100, 75],
        vec![56, 75, 75, 56],
    ])?;
    assert_eq!(read_image_gray8(output_dir.join("gaussian_flat.png"))?, expected_gaussian);

    // border magnitudes exceed 255 and saturate
    let sobel = read_image_gray8(output_dir.join("sobel_flat.png"))?;
    assert_eq!(sobel[(0, 0)], 255);
    assert_eq!(sobel[(1, 1)], 0);

    Ok(())
}

#[test]
fn test_missing_input_dir() {
    let tmp_dir = tempfile::tempdir().expect("tempdir");
    assert!(load_images(tmp_dir.path().join("missing")).is_err());
}
