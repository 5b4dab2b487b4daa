use std::num::NonZeroU32;
use std::ops::Range;

use rayon::current_num_threads;
use rayon::prelude::*;

use crate::image_view::{RowsView, RowsViewMut};
use crate::pixels::Pixel;
use crate::{ImageView, ImageViewMut};

/// Splits `[0, total)` into contiguous, non-overlapping half-open ranges
/// whose union is exactly `[0, total)` and whose sizes differ by at most
/// one element.
///
/// `num_parts` is clamped to `[1, total]`, so no returned range is empty.
/// An empty vector is returned when `total == 0`.
pub(crate) fn split_range(total: u32, num_parts: u32) -> Vec<Range<u32>> {
    if total == 0 {
        return Vec::new();
    }
    let num_parts = num_parts.clamp(1, total);
    let step = total / num_parts;
    let mut modulo = total % num_parts;
    let mut ranges = Vec::with_capacity(num_parts as usize);
    let mut start = 0;
    for _ in 0..num_parts {
        let mut size = step;
        if modulo > 0 {
            size += 1;
            modulo -= 1;
        }
        ranges.push(start..start + size);
        start += size;
    }
    debug_assert_eq!(start, total);
    ranges
}

/// Splits source and destination images into horizontal bands for the
/// horizontal convolution pass. Returns `None` if the current thread pool
/// has a single thread or the image is too small to split.
pub(crate) fn split_h_two_images_for_threading<'a, P: Pixel>(
    src_view: &'a impl ImageView<Pixel = P>,
    dst_view: &'a mut impl ImageViewMut<Pixel = P>,
) -> Option<
    impl IndexedParallelIterator<Item = (RowsView<'a, P>, RowsViewMut<'a, P>)>,
> {
    debug_assert_eq!(src_view.height(), dst_view.height());
    let height = dst_view.height();

    let num_threads = current_num_threads() as u32;
    if num_threads > 1 && height > 1 {
        let num_parts = NonZeroU32::new(num_threads.min(height)).unwrap();
        let src_parts = src_view.split_by_height(num_parts);
        let dst_parts = dst_view.split_by_height_mut(num_parts);
        return Some(src_parts.into_par_iter().zip(dst_parts.into_par_iter()));
    }
    None
}

/// Splits source and destination images into vertical bands for the
/// vertical convolution pass. Returns `None` if the current thread pool
/// has a single thread or the image is too small to split.
pub(crate) fn split_v_two_images_for_threading<'a, P: Pixel>(
    src_view: &'a impl ImageView<Pixel = P>,
    dst_view: &'a mut impl ImageViewMut<Pixel = P>,
) -> Option<
    impl IndexedParallelIterator<Item = (RowsView<'a, P>, RowsViewMut<'a, P>)>,
> {
    debug_assert_eq!(src_view.width(), dst_view.width());
    let width = dst_view.width();

    let num_threads = current_num_threads() as u32;
    if num_threads > 1 && width > 1 {
        let num_parts = NonZeroU32::new(num_threads.min(width)).unwrap();
        let src_parts = src_view.split_by_width(num_parts);
        let dst_parts = dst_view.split_by_width_mut(num_parts);
        return Some(src_parts.into_par_iter().zip(dst_parts.into_par_iter()));
    }
    None
}

/// Splits one image into horizontal bands for the in-place horizontal
/// convolution pass.
pub(crate) fn split_h_one_image_for_threading<P: Pixel>(
    image_view: &mut impl ImageViewMut<Pixel = P>,
) -> Option<impl IndexedParallelIterator<Item = RowsViewMut<'_, P>>> {
    let height = image_view.height();

    let num_threads = current_num_threads() as u32;
    if num_threads > 1 && height > 1 {
        let num_parts = NonZeroU32::new(num_threads.min(height)).unwrap();
        let img_parts = image_view.split_by_height_mut(num_parts);
        return Some(img_parts.into_par_iter());
    }
    None
}

/// Splits one image into vertical bands for the in-place vertical
/// convolution pass.
pub(crate) fn split_v_one_image_for_threading<P: Pixel>(
    image_view: &mut impl ImageViewMut<Pixel = P>,
) -> Option<impl IndexedParallelIterator<Item = RowsViewMut<'_, P>>> {
    let width = image_view.width();

    let num_threads = current_num_threads() as u32;
    if num_threads > 1 && width > 1 {
        let num_parts = NonZeroU32::new(num_threads.min(width)).unwrap();
        let img_parts = image_view.split_by_width_mut(num_parts);
        return Some(img_parts.into_par_iter());
    }
    None
}
