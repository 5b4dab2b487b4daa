use num_traits::Zero;
use rayon::iter::ParallelIterator;

use crate::errors::DifferentDimensionsError;
use crate::kernel::Kernel;
use crate::pixels::Pixel;
use crate::threading::{
    split_h_one_image_for_threading, split_h_two_images_for_threading,
    split_v_one_image_for_threading, split_v_two_images_for_threading,
};
use crate::{ImageView, ImageViewMut};

use horizontal::{horiz_convolution_band, horiz_convolution_band_in_place};
use vertical::{vert_convolution_band, vert_convolution_band_in_place};

mod horizontal;
mod vertical;

/// How out-of-range neighbor samples are handled near image borders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderMode {
    /// Out-of-range samples are replaced with the nearest edge sample.
    /// The kernel is applied to every position of the image.
    Replicate,
    /// Only positions whose full kernel support lies inside the image are
    /// computed. Positions closer than the kernel half-width to an edge
    /// are left untouched: for in-place passes they keep their original
    /// value, for out-of-place passes they keep whatever value the
    /// destination held before the call. Callers of out-of-place passes
    /// must pre-initialize the destination if they care about its borders.
    Crop,
}

/// Convolves every row of the source image with the kernel and stores the
/// result into the destination image.
///
/// The work is split into contiguous bands of rows processed concurrently
/// in the rayon thread pool. The call returns after all bands have been
/// computed. Running in a single-threaded pool produces bit-identical
/// results.
pub fn horizontal_convolution<P: Pixel>(
    src_view: &impl ImageView<Pixel = P>,
    dst_view: &mut impl ImageViewMut<Pixel = P>,
    kernel: &Kernel<P::Accumulator>,
    border_mode: BorderMode,
) -> Result<(), DifferentDimensionsError> {
    check_dimensions(src_view, dst_view)?;
    if let Some(iter) = split_h_two_images_for_threading(src_view, dst_view) {
        iter.for_each(|(src, mut dst)| {
            horiz_convolution_band(&src, &mut dst, kernel, border_mode);
        });
        return Ok(());
    }
    horiz_convolution_band(src_view, dst_view, kernel, border_mode);
    Ok(())
}

/// Convolves every row of the image with the kernel, writing results back
/// into the image.
pub fn horizontal_convolution_in_place<P: Pixel>(
    image_view: &mut impl ImageViewMut<Pixel = P>,
    kernel: &Kernel<P::Accumulator>,
    border_mode: BorderMode,
) {
    if let Some(iter) = split_h_one_image_for_threading(image_view) {
        iter.for_each(|mut band| {
            horiz_convolution_band_in_place(&mut band, kernel, border_mode);
        });
        return;
    }
    horiz_convolution_band_in_place(image_view, kernel, border_mode);
}

/// Convolves every column of the source image with the kernel and stores
/// the result into the destination image.
///
/// The work is split into contiguous bands of columns processed
/// concurrently in the rayon thread pool. The call returns after all bands
/// have been computed. Running in a single-threaded pool produces
/// bit-identical results.
pub fn vertical_convolution<P: Pixel>(
    src_view: &impl ImageView<Pixel = P>,
    dst_view: &mut impl ImageViewMut<Pixel = P>,
    kernel: &Kernel<P::Accumulator>,
    border_mode: BorderMode,
) -> Result<(), DifferentDimensionsError> {
    check_dimensions(src_view, dst_view)?;
    if let Some(iter) = split_v_two_images_for_threading(src_view, dst_view) {
        iter.for_each(|(src, mut dst)| {
            vert_convolution_band(&src, &mut dst, kernel, border_mode);
        });
        return Ok(());
    }
    vert_convolution_band(src_view, dst_view, kernel, border_mode);
    Ok(())
}

/// Convolves every column of the image with the kernel, writing results
/// back into the image.
pub fn vertical_convolution_in_place<P: Pixel>(
    image_view: &mut impl ImageViewMut<Pixel = P>,
    kernel: &Kernel<P::Accumulator>,
    border_mode: BorderMode,
) {
    if let Some(iter) = split_v_one_image_for_threading(image_view) {
        iter.for_each(|mut band| {
            vert_convolution_band_in_place(&mut band, kernel, border_mode);
        });
        return;
    }
    vert_convolution_band_in_place(image_view, kernel, border_mode);
}

/// Applies a separable 2D filter: the horizontal kernel is applied to the
/// rows of the source image and the vertical kernel is then applied in
/// place to the columns of the intermediate result stored in `dst_view`.
pub fn separable_convolution<P: Pixel>(
    src_view: &impl ImageView<Pixel = P>,
    dst_view: &mut impl ImageViewMut<Pixel = P>,
    kernel_x: &Kernel<P::Accumulator>,
    kernel_y: &Kernel<P::Accumulator>,
    border_mode: BorderMode,
) -> Result<(), DifferentDimensionsError> {
    horizontal_convolution(src_view, dst_view, kernel_x, border_mode)?;
    vertical_convolution_in_place(dst_view, kernel_y, border_mode);
    Ok(())
}

fn check_dimensions<P: Pixel>(
    src_view: &impl ImageView<Pixel = P>,
    dst_view: &impl ImageView<Pixel = P>,
) -> Result<(), DifferentDimensionsError> {
    if src_view.width() != dst_view.width() || src_view.height() != dst_view.height() {
        return Err(DifferentDimensionsError);
    }
    Ok(())
}

/// Convolves a padded line in place.
///
/// The result for position `p` is stored into `line[p]` while the kernel
/// reads `line[p..p + kernel.len())`: every write lands strictly before the
/// region that remains to be read, so no separate output buffer is needed.
pub(crate) fn convolve_padded_line<P: Pixel>(line: &mut [P], kernel: &Kernel<P::Accumulator>) {
    let coefficients = kernel.coefficients();
    let size = line.len() - (coefficients.len() - 1);
    for p in 0..size {
        let mut sum = P::Accumulator::zero();
        for (&k, &pixel) in coefficients.iter().zip(&line[p..]) {
            sum += pixel.to_accumulator() * k;
        }
        line[p] = P::from_accumulator(sum);
    }
}

/// Copies a row into the middle of the line buffer and fills both ends
/// with the nearest edge sample.
pub(crate) fn fill_padded_line<P: Pixel>(line: &mut [P], row: &[P], half_width: usize) {
    let width = row.len();
    line[..half_width].fill(row[0]);
    line[half_width..half_width + width].copy_from_slice(row);
    line[half_width + width..].fill(row[width - 1]);
}
