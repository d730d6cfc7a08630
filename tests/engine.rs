use rasterops::buffer::Channel;
use rasterops::compression::{compress, decompress};
use rasterops::{ImageModel, PixelBuffer, RasterError};

fn scenario() -> PixelBuffer {
    let mut img = PixelBuffer::new(2, 2);
    img.set(0, 0, [255, 0, 0]).unwrap();
    img.set(0, 1, [0, 255, 0]).unwrap();
    img.set(1, 0, [0, 0, 255]).unwrap();
    img.set(1, 1, [255, 255, 0]).unwrap();
    img
}

fn patterned(width: usize, height: usize) -> PixelBuffer {
    let mut img = PixelBuffer::new(width, height);
    for row in 0..height {
        for col in 0..width {
            let v = (row * 37 + col * 11) as i32;
            img.set(row, col, [v % 256, (v * 3) % 256, (255 - v).rem_euclid(256)])
                .unwrap();
        }
    }
    img
}

fn solid(width: usize, height: usize, pixel: [i32; 3]) -> PixelBuffer {
    let mut img = PixelBuffer::new(width, height);
    for row in 0..height {
        for col in 0..width {
            img.set(row, col, pixel).unwrap();
        }
    }
    img
}

#[test]
fn scenario_matches_expected_pixels() {
    let _ = env_logger::builder().is_test(true).try_init();
    let model = ImageModel::new();
    let img = scenario();

    let flipped = model.flip_horizontal(Some(&img)).unwrap();
    assert_eq!(flipped.get(0, 0).unwrap(), [0, 255, 0]);
    assert_eq!(flipped.get(0, 1).unwrap(), [255, 0, 0]);

    let grey = model.greyscale(Some(&img)).unwrap();
    assert_eq!(grey.get(0, 0).unwrap(), [76, 76, 76]);

    let inten = model.intensity(Some(&img)).unwrap();
    assert_eq!(inten.get(1, 1).unwrap(), [170, 170, 170]);
}

#[test]
fn double_flip_is_identity() {
    let model = ImageModel::new();
    for (w, h) in [(1, 1), (3, 2), (5, 7), (8, 8)] {
        let img = patterned(w, h);
        let hh = model
            .flip_horizontal(Some(&model.flip_horizontal(Some(&img)).unwrap()))
            .unwrap();
        let vv = model
            .flip_vertical(Some(&model.flip_vertical(Some(&img)).unwrap()))
            .unwrap();
        assert_eq!(hh, img);
        assert_eq!(vv, img);
    }
}

#[test]
fn transformations_preserve_dimensions() {
    let model = ImageModel::new();
    let img = patterned(7, 4);
    let results = [
        model.flip_horizontal(Some(&img)),
        model.flip_vertical(Some(&img)),
        model.brighten(Some(&img), 40),
        model.sepia(Some(&img)),
        model.greyscale(Some(&img)),
        model.luma(Some(&img)),
        model.intensity(Some(&img)),
        model.value(Some(&img)),
        model.red_component(Some(&img)),
        model.green_component(Some(&img)),
        model.blue_component(Some(&img)),
        model.combine(Some(&img), Some(&img), Some(&img)),
        model.blur(Some(&img)),
        model.sharpen(Some(&img)),
    ];
    for result in results {
        let out = result.unwrap();
        assert_eq!((out.width(), out.height()), (7, 4));
        assert!(out.as_array().iter().all(|v| (0..=255).contains(v)));
    }
}

#[test]
fn brighten_clamps_at_both_ends() {
    let model = ImageModel::new();
    let img = patterned(4, 3);
    let up = model.brighten(Some(&img), 300).unwrap();
    let down = model.brighten(Some(&img), -300).unwrap();
    assert!(up.as_array().iter().all(|&v| v == 255));
    assert!(down.as_array().iter().all(|&v| v == 0));
}

#[test]
fn uniform_image_is_fixed_point_of_convolution() {
    let model = ImageModel::new();
    let img = solid(6, 5, [12, 200, 99]);
    assert_eq!(model.blur(Some(&img)).unwrap(), img);
    assert_eq!(model.sharpen(Some(&img)).unwrap(), img);
}

#[test]
fn luma_matches_greyscale() {
    let model = ImageModel::new();
    let img = patterned(9, 5);
    assert_eq!(
        model.luma(Some(&img)).unwrap(),
        model.greyscale(Some(&img)).unwrap()
    );
}

#[test]
fn split_then_combine_restores_image() {
    let model = ImageModel::new();
    let img = patterned(5, 3);
    let r = model.red_component(Some(&img)).unwrap();
    let g = model.green_component(Some(&img)).unwrap();
    let b = model.blue_component(Some(&img)).unwrap();
    assert_eq!(model.combine(Some(&r), Some(&g), Some(&b)).unwrap(), img);
}

#[test]
fn compression_at_zero_threshold_is_lossless() {
    let model = ImageModel::new();
    let img = patterned(8, 8);
    assert_eq!(model.compress(Some(&img), 0.0).unwrap(), img);
}

#[test]
fn compression_zero_count_is_monotonic() {
    let img = patterned(16, 16);
    let mut previous = 0;
    for threshold in [0.0, 1.0, 5.0, 20.0, 80.0, 400.0, 5000.0] {
        let zeroed = compress(&img, threshold).unwrap().zeroed_coefficients();
        assert!(zeroed >= previous, "threshold {threshold} zeroed fewer");
        previous = zeroed;
    }
}

#[test]
fn compression_keeps_channels_in_place() {
    let img = solid(4, 4, [10, 120, 240]);
    let compressed = compress(&img, 1000.0).unwrap();
    let mut out = PixelBuffer::new(4, 4);
    decompress(&compressed, &mut out).unwrap();
    assert_eq!(out, img);
    assert_eq!(compressed.plane(Channel::Green).size(), 4);
}

#[test]
fn compression_rejects_unsupported_shapes() {
    let model = ImageModel::new();
    for (w, h) in [(3, 3), (4, 2), (6, 6)] {
        let img = patterned(w, h);
        assert!(matches!(
            model.compress(Some(&img), 1.0),
            Err(RasterError::InvalidArgument(_))
        ));
    }
}

#[test]
fn out_of_bounds_access_is_reported() {
    let img = scenario();
    assert!(matches!(
        img.get(2, 0),
        Err(RasterError::OutOfBounds { row: 2, col: 0, .. })
    ));
    let mut img = img;
    assert!(img.set(0, 5, [0, 0, 0]).is_err());
}
