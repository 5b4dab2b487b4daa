use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use fast_image_convolution::images::Image;
use fast_image_convolution::{
    horizontal_convolution, horizontal_convolution_in_place, separable_convolution,
    vertical_convolution, vertical_convolution_in_place, BorderMode, DifferentDimensionsError,
    Kernel,
};

fn random_u8_image(width: u32, height: u32, seed: u64) -> Image<'static, u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let pixels = (0..width as usize * height as usize)
        .map(|_| rng.gen())
        .collect();
    Image::from_pixels(width, height, pixels).unwrap()
}

#[test]
fn identity_kernel_reproduces_source_with_replicate_border() {
    let src = random_u8_image(23, 17, 1);
    let kernel = Kernel::new(vec![0i32, 0, 1, 0, 0]).unwrap();

    let mut dst = Image::<u8>::new(23, 17);
    horizontal_convolution(&src, &mut dst, &kernel, BorderMode::Replicate).unwrap();
    assert_eq!(dst.pixels(), src.pixels());

    let mut dst = Image::<u8>::new(23, 17);
    vertical_convolution(&src, &mut dst, &kernel, BorderMode::Replicate).unwrap();
    assert_eq!(dst.pixels(), src.pixels());

    let mut img = Image::from_pixels(23, 17, src.pixels().to_vec()).unwrap();
    horizontal_convolution_in_place(&mut img, &kernel, BorderMode::Replicate);
    vertical_convolution_in_place(&mut img, &kernel, BorderMode::Replicate);
    assert_eq!(img.pixels(), src.pixels());
}

#[test]
fn crop_border_leaves_horizontal_edges_untouched() {
    let width = 7u32;
    let height = 4u32;
    let pixels: Vec<u8> = (0..width * height).map(|v| (v * 3 % 250) as u8).collect();
    let src = Image::from_pixels(width, height, pixels.clone()).unwrap();
    // 5-wide kernel, half-width of 2.
    let kernel = Kernel::new(vec![1i32, 1, 1, 1, 1]).unwrap();

    let sentinel = 77u8;
    let mut dst = Image::from_pixels(
        width,
        height,
        vec![sentinel; (width * height) as usize],
    )
    .unwrap();
    horizontal_convolution(&src, &mut dst, &kernel, BorderMode::Crop).unwrap();

    for row in 0..height as usize {
        for col in 0..width as usize {
            let value = dst.pixels()[row * width as usize + col];
            if col < 2 || col >= width as usize - 2 {
                assert_eq!(value, sentinel, "edge pixel was modified at ({row}, {col})");
            } else {
                let mut expected = 0i32;
                for k in 0..5 {
                    expected += pixels[row * width as usize + col - 2 + k] as i32;
                }
                // Narrowing the i32 sum to u8 wraps.
                assert_eq!(value, expected as u8, "interior mismatch at ({row}, {col})");
            }
        }
    }
}

#[test]
fn crop_border_leaves_vertical_edges_untouched() {
    let width = 5u32;
    let height = 8u32;
    let pixels: Vec<u8> = (0..width * height).map(|v| (v * 5 % 200) as u8).collect();
    let src = Image::from_pixels(width, height, pixels.clone()).unwrap();
    let kernel = Kernel::new(vec![1i32, 1, 1, 1, 1]).unwrap();

    let sentinel = 42u8;
    let mut dst = Image::from_pixels(
        width,
        height,
        vec![sentinel; (width * height) as usize],
    )
    .unwrap();
    vertical_convolution(&src, &mut dst, &kernel, BorderMode::Crop).unwrap();

    for row in 0..height as usize {
        for col in 0..width as usize {
            let value = dst.pixels()[row * width as usize + col];
            if row < 2 || row >= height as usize - 2 {
                assert_eq!(value, sentinel, "edge pixel was modified at ({row}, {col})");
            } else {
                let mut expected = 0i32;
                for k in 0..5 {
                    expected += pixels[(row - 2 + k) * width as usize + col] as i32;
                }
                assert_eq!(value, expected as u8, "interior mismatch at ({row}, {col})");
            }
        }
    }
}

#[test]
fn crop_with_kernel_wider_than_image_is_a_no_op() {
    let src = random_u8_image(3, 3, 2);
    let kernel = Kernel::new(vec![1i32, 1, 1, 1, 1]).unwrap();

    let sentinel = 11u8;
    let mut dst = Image::from_pixels(3, 3, vec![sentinel; 9]).unwrap();
    horizontal_convolution(&src, &mut dst, &kernel, BorderMode::Crop).unwrap();
    assert!(dst.pixels().iter().all(|&p| p == sentinel));

    vertical_convolution(&src, &mut dst, &kernel, BorderMode::Crop).unwrap();
    assert!(dst.pixels().iter().all(|&p| p == sentinel));
}

/// Separable convolution must match direct 2D convolution with the
/// outer-product kernel on the interior of the image.
#[test]
fn separable_convolution_matches_outer_product_kernel_on_interior() {
    let size = 8usize;
    let pixels: Vec<f32> = (0..size * size).map(|v| v as f32).collect();
    let src = Image::from_pixels(size as u32, size as u32, pixels.clone()).unwrap();

    let kernel = Kernel::new(vec![0.25f64, 0.5, 0.25]).unwrap();
    let mut dst = Image::<f32>::new(size as u32, size as u32);
    separable_convolution(&src, &mut dst, &kernel, &kernel, BorderMode::Replicate).unwrap();

    // Direct 2D convolution with the outer product of the two kernels.
    let weights = [0.25f64, 0.5, 0.25];
    for row in 1..size - 1 {
        for col in 1..size - 1 {
            let mut expected = 0.0f64;
            for (j, &wy) in weights.iter().enumerate() {
                for (i, &wx) in weights.iter().enumerate() {
                    let sample = pixels[(row + j - 1) * size + col + i - 1] as f64;
                    expected += sample * wy * wx;
                }
            }
            let value = dst.pixels()[row * size + col];
            assert_eq!(value, expected as f32, "mismatch at ({row}, {col})");
        }
    }
}

/// Intermediate sums of `u8` pixels are accumulated in `i32`: a kernel
/// whose partial sums exceed any 8-bit range must still produce the exact
/// small final value.
#[test]
fn u8_accumulation_does_not_wrap_before_final_store() {
    let pixels = vec![255u8, 2, 255];
    let src = Image::from_pixels(3, 1, pixels.clone()).unwrap();
    let coefficients = vec![127i32, 1, -127];
    let kernel = Kernel::new(coefficients.clone()).unwrap();

    let mut dst = Image::<u8>::new(3, 1);
    horizontal_convolution(&src, &mut dst, &kernel, BorderMode::Replicate).unwrap();

    // Reference sum in i64: 255 * 127 + 2 * 1 - 255 * 127 = 2.
    let mut expected = 0i64;
    for (k, &c) in coefficients.iter().enumerate() {
        expected += pixels[k] as i64 * c as i64;
    }
    assert_eq!(expected, 2);
    assert_eq!(dst.pixels()[1], 2);
}

#[test]
fn box_filter_of_4x4_gradient() {
    // 4x4 grid of values 0..15, kernel [1, 1, 1] without averaging,
    // horizontal pass then vertical pass with replicated borders.
    let src = Image::<u8>::from_pixels(4, 4, (0..16).collect()).unwrap();
    let kernel = Kernel::new(vec![1i32, 1, 1]).unwrap();

    let mut dst = Image::<u8>::new(4, 4);
    separable_convolution(&src, &mut dst, &kernel, &kernel, BorderMode::Replicate).unwrap();

    #[rustfmt::skip]
    let expected = [
        15u8,  21,  30,  36,
        39,    45,  54,  60,
        75,    81,  90,  96,
        99,   105, 114, 120,
    ];
    assert_eq!(dst.pixels(), &expected);
}

#[test]
fn single_thread_and_multi_thread_results_are_bit_identical() {
    let src = random_u8_image(63, 47, 3);
    let kernel_x = Kernel::new(vec![1i32, 2, 3, 2, 1]).unwrap();
    let kernel_y = Kernel::new(vec![2i32, 1, 2]).unwrap();

    let convolve = |border_mode| {
        let mut dst = Image::<u8>::new(63, 47);
        separable_convolution(&src, &mut dst, &kernel_x, &kernel_y, border_mode).unwrap();
        dst.pixels().to_vec()
    };

    for border_mode in [BorderMode::Replicate, BorderMode::Crop] {
        let single_threaded = rayon::ThreadPoolBuilder::new()
            .num_threads(1)
            .build()
            .unwrap()
            .install(|| convolve(border_mode));
        let multi_threaded = rayon::ThreadPoolBuilder::new()
            .num_threads(8)
            .build()
            .unwrap()
            .install(|| convolve(border_mode));
        assert_eq!(single_threaded, multi_threaded);
    }
}

#[test]
fn in_place_passes_match_out_of_place_passes() {
    let src = random_u8_image(31, 22, 4);
    let kernel = Kernel::new(vec![1i32, 4, 6, 4, 1]).unwrap();

    for border_mode in [BorderMode::Replicate, BorderMode::Crop] {
        let mut dst = Image::from_pixels(31, 22, src.pixels().to_vec()).unwrap();
        horizontal_convolution(&src, &mut dst, &kernel, border_mode).unwrap();
        let mut img = Image::from_pixels(31, 22, src.pixels().to_vec()).unwrap();
        horizontal_convolution_in_place(&mut img, &kernel, border_mode);
        assert_eq!(img.pixels(), dst.pixels());

        let mut dst = Image::from_pixels(31, 22, src.pixels().to_vec()).unwrap();
        vertical_convolution(&src, &mut dst, &kernel, border_mode).unwrap();
        let mut img = Image::from_pixels(31, 22, src.pixels().to_vec()).unwrap();
        vertical_convolution_in_place(&mut img, &kernel, border_mode);
        assert_eq!(img.pixels(), dst.pixels());
    }
}

#[test]
fn different_dimensions_are_rejected() {
    let src = Image::<u8>::new(4, 4);
    let mut dst = Image::<u8>::new(5, 4);
    let kernel = Kernel::new(vec![1i32, 1, 1]).unwrap();

    assert_eq!(
        horizontal_convolution(&src, &mut dst, &kernel, BorderMode::Replicate),
        Err(DifferentDimensionsError)
    );
    assert_eq!(
        vertical_convolution(&src, &mut dst, &kernel, BorderMode::Replicate),
        Err(DifferentDimensionsError)
    );
}

#[test]
fn empty_images_are_a_no_op() {
    let kernel = Kernel::new(vec![1i32, 1, 1]).unwrap();

    let src = Image::<u8>::new(0, 0);
    let mut dst = Image::<u8>::new(0, 0);
    separable_convolution(&src, &mut dst, &kernel, &kernel, BorderMode::Replicate).unwrap();

    let mut img = Image::<u8>::new(0, 5);
    horizontal_convolution_in_place(&mut img, &kernel, BorderMode::Replicate);
    vertical_convolution_in_place(&mut img, &kernel, BorderMode::Replicate);

    let mut img = Image::<u8>::new(5, 0);
    horizontal_convolution_in_place(&mut img, &kernel, BorderMode::Replicate);
    vertical_convolution_in_place(&mut img, &kernel, BorderMode::Replicate);
}

#[test]
fn f32_pixels_are_accumulated_in_f64() {
    let pixels = vec![1.0f32, 2.0, 4.0, 8.0];
    let src = Image::from_pixels(4, 1, pixels).unwrap();
    let kernel = Kernel::new(vec![0.5f64, 1.0, 0.5]).unwrap();

    let mut dst = Image::<f32>::new(4, 1);
    horizontal_convolution(&src, &mut dst, &kernel, BorderMode::Replicate).unwrap();

    // [1 | 1 2 4 8 | 8] convolved with [0.5, 1.0, 0.5].
    assert_eq!(dst.pixels(), &[2.5f32, 4.5, 9.0, 14.0]);
}
