use num_traits::Zero;

use crate::convolution::{convolve_padded_line, BorderMode};
use crate::kernel::Kernel;
use crate::pixels::Pixel;
use crate::{ImageView, ImageViewMut};

/// Convolves every column of a band against the kernel.
///
/// A band produced by a split by width holds the full column height, so
/// the routine always sees complete columns. The source and destination
/// bands must have identical dimensions.
pub(crate) fn vert_convolution_band<P: Pixel>(
    src_view: &impl ImageView<Pixel = P>,
    dst_view: &mut impl ImageViewMut<Pixel = P>,
    kernel: &Kernel<P::Accumulator>,
    border_mode: BorderMode,
) {
    let width = src_view.width() as usize;
    let height = src_view.height() as usize;
    if width == 0 || height == 0 {
        return;
    }
    let half_width = kernel.half_width();
    let coefficients = kernel.coefficients();
    let src_rows: Vec<&[P]> = src_view.iter_rows(0).collect();

    match border_mode {
        BorderMode::Replicate => {
            // Clamped row indices of the kernel taps are computed once per
            // output row and shared by every column in it.
            let mut taps = vec![0usize; coefficients.len()];
            for (y, dst_row) in dst_view.iter_rows_mut(0).enumerate() {
                for (k, tap) in taps.iter_mut().enumerate() {
                    let row_index = y as isize + k as isize - half_width as isize;
                    *tap = row_index.clamp(0, height as isize - 1) as usize;
                }

                // Four adjacent columns share one pass over the kernel taps.
                let mut x = 0;
                while x + 4 <= width {
                    let mut sums = [P::Accumulator::zero(); 4];
                    for (&k, &tap) in coefficients.iter().zip(&taps) {
                        let src_row = src_rows[tap];
                        sums[0] += src_row[x].to_accumulator() * k;
                        sums[1] += src_row[x + 1].to_accumulator() * k;
                        sums[2] += src_row[x + 2].to_accumulator() * k;
                        sums[3] += src_row[x + 3].to_accumulator() * k;
                    }
                    dst_row[x] = P::from_accumulator(sums[0]);
                    dst_row[x + 1] = P::from_accumulator(sums[1]);
                    dst_row[x + 2] = P::from_accumulator(sums[2]);
                    dst_row[x + 3] = P::from_accumulator(sums[3]);
                    x += 4;
                }

                // Scalar tail for the columns that are not a multiple of 4.
                for x in x..width {
                    let mut sum = P::Accumulator::zero();
                    for (&k, &tap) in coefficients.iter().zip(&taps) {
                        sum += src_rows[tap][x].to_accumulator() * k;
                    }
                    dst_row[x] = P::from_accumulator(sum);
                }
            }
        }
        BorderMode::Crop => {
            if height < kernel.len() {
                return;
            }
            let mut dst_rows: Vec<&mut [P]> = dst_view.iter_rows_mut(0).collect();
            for y in half_width..height - half_width {
                let first_row = y - half_width;
                let dst_row = &mut dst_rows[y];
                for x in 0..width {
                    let mut sum = P::Accumulator::zero();
                    for (k, &coefficient) in coefficients.iter().enumerate() {
                        sum += src_rows[first_row + k][x].to_accumulator() * coefficient;
                    }
                    dst_row[x] = P::from_accumulator(sum);
                }
            }
        }
    }
}

/// Convolves every column of a band against the kernel, writing results
/// back into the band.
///
/// Every column is staged in a line buffer before any of its pixels is
/// overwritten, so the pass never reads its own output.
pub(crate) fn vert_convolution_band_in_place<P: Pixel>(
    image_view: &mut impl ImageViewMut<Pixel = P>,
    kernel: &Kernel<P::Accumulator>,
    border_mode: BorderMode,
) {
    let width = image_view.width() as usize;
    let height = image_view.height() as usize;
    if width == 0 || height == 0 {
        return;
    }
    let half_width = kernel.half_width();
    let coefficients = kernel.coefficients();
    let mut rows: Vec<&mut [P]> = image_view.iter_rows_mut(0).collect();

    match border_mode {
        BorderMode::Replicate => {
            let mut line = vec![P::default(); height + 2 * half_width];
            for x in 0..width {
                line[..half_width].fill(rows[0][x]);
                for (k, row) in rows.iter().enumerate() {
                    line[half_width + k] = row[x];
                }
                line[half_width + height..].fill(rows[height - 1][x]);

                convolve_padded_line(&mut line, kernel);
                for (row, &value) in rows.iter_mut().zip(line.iter()) {
                    row[x] = value;
                }
            }
        }
        BorderMode::Crop => {
            if height < kernel.len() {
                return;
            }
            let mut line = vec![P::default(); height];
            for x in 0..width {
                for (slot, row) in line.iter_mut().zip(&rows) {
                    *slot = row[x];
                }
                for y in half_width..height - half_width {
                    let mut sum = P::Accumulator::zero();
                    for (&k, &pixel) in coefficients.iter().zip(&line[y - half_width..]) {
                        sum += pixel.to_accumulator() * k;
                    }
                    rows[y][x] = P::from_accumulator(sum);
                }
            }
        }
    }
}
