use num_traits::Zero;

use crate::convolution::{convolve_padded_line, fill_padded_line, BorderMode};
use crate::kernel::Kernel;
use crate::pixels::Pixel;
use crate::{ImageView, ImageViewMut};

/// Convolves every row of a band against the kernel.
///
/// The source and destination bands must have identical dimensions.
pub(crate) fn horiz_convolution_band<P: Pixel>(
    src_view: &impl ImageView<Pixel = P>,
    dst_view: &mut impl ImageViewMut<Pixel = P>,
    kernel: &Kernel<P::Accumulator>,
    border_mode: BorderMode,
) {
    let width = src_view.width() as usize;
    if width == 0 {
        return;
    }
    let half_width = kernel.half_width();
    let coefficients = kernel.coefficients();

    match border_mode {
        BorderMode::Replicate => {
            // All boundary handling happens while padding the line, the
            // inner loop itself never tests for boundaries.
            let mut line = vec![P::default(); width + 2 * half_width];
            for (src_row, dst_row) in src_view.iter_rows(0).zip(dst_view.iter_rows_mut(0)) {
                fill_padded_line(&mut line, src_row, half_width);
                for (x, dst_pixel) in dst_row.iter_mut().enumerate() {
                    let mut sum = P::Accumulator::zero();
                    for (&k, &pixel) in coefficients.iter().zip(&line[x..]) {
                        sum += pixel.to_accumulator() * k;
                    }
                    *dst_pixel = P::from_accumulator(sum);
                }
            }
        }
        BorderMode::Crop => {
            if width < kernel.len() {
                return;
            }
            for (src_row, dst_row) in src_view.iter_rows(0).zip(dst_view.iter_rows_mut(0)) {
                for x in half_width..width - half_width {
                    let mut sum = P::Accumulator::zero();
                    for (&k, &pixel) in coefficients.iter().zip(&src_row[x - half_width..]) {
                        sum += pixel.to_accumulator() * k;
                    }
                    dst_row[x] = P::from_accumulator(sum);
                }
            }
        }
    }
}

/// Convolves every row of a band against the kernel, writing results back
/// into the band.
///
/// Every row is staged in a line buffer before any of its pixels is
/// overwritten, so the pass never reads its own output.
pub(crate) fn horiz_convolution_band_in_place<P: Pixel>(
    image_view: &mut impl ImageViewMut<Pixel = P>,
    kernel: &Kernel<P::Accumulator>,
    border_mode: BorderMode,
) {
    let width = image_view.width() as usize;
    if width == 0 {
        return;
    }
    let half_width = kernel.half_width();
    let coefficients = kernel.coefficients();

    match border_mode {
        BorderMode::Replicate => {
            let mut line = vec![P::default(); width + 2 * half_width];
            for row in image_view.iter_rows_mut(0) {
                fill_padded_line(&mut line, row, half_width);
                convolve_padded_line(&mut line, kernel);
                row.copy_from_slice(&line[..width]);
            }
        }
        BorderMode::Crop => {
            if width < kernel.len() {
                return;
            }
            let mut line = vec![P::default(); width];
            for row in image_view.iter_rows_mut(0) {
                line.copy_from_slice(row);
                for x in half_width..width - half_width {
                    let mut sum = P::Accumulator::zero();
                    for (&k, &pixel) in coefficients.iter().zip(&line[x - half_width..]) {
                        sum += pixel.to_accumulator() * k;
                    }
                    row[x] = P::from_accumulator(sum);
                }
            }
        }
    }
}
