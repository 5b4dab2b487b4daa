use std::num::NonZeroU32;

use crate::pixels::Pixel;
use crate::threading::split_range;

/// An immutable view of image data.
///
/// # Safety
///
/// Implementations must guarantee that [width()](Self::width) and
/// [height()](Self::height) describe the real size of the image data and
/// that [iter_rows()](Self::iter_rows) yields exactly `height()` rows of
/// `width()` pixels each.
pub unsafe trait ImageView: Send + Sync {
    type Pixel: Pixel;

    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Iterator of image rows, starting from the row with the given number.
    fn iter_rows(&self, start_row: u32) -> impl Iterator<Item = &[Self::Pixel]>;

    /// Splits the view by height into `num_parts` contiguous horizontal
    /// bands whose heights differ by at most one row. Returns fewer parts
    /// if the image has fewer rows than `num_parts` and no parts at all
    /// for an empty image.
    fn split_by_height(&self, num_parts: NonZeroU32) -> Vec<RowsView<'_, Self::Pixel>> {
        let width = self.width();
        let mut rows = self.iter_rows(0);
        split_range(self.height(), num_parts.get())
            .into_iter()
            .map(|range| {
                let size = (range.end - range.start) as usize;
                RowsView::new(width, rows.by_ref().take(size).collect())
            })
            .collect()
    }

    /// Splits the view by width into `num_parts` contiguous vertical bands
    /// whose widths differ by at most one column. Returns fewer parts if
    /// the image has fewer columns than `num_parts` and no parts at all
    /// for an empty image.
    fn split_by_width(&self, num_parts: NonZeroU32) -> Vec<RowsView<'_, Self::Pixel>> {
        let rows: Vec<&[Self::Pixel]> = self.iter_rows(0).collect();
        split_range(self.width(), num_parts.get())
            .into_iter()
            .map(|range| {
                let band_rows = rows
                    .iter()
                    .map(|row| &row[range.start as usize..range.end as usize])
                    .collect();
                RowsView::new(range.end - range.start, band_rows)
            })
            .collect()
    }
}

/// A mutable view of image data.
///
/// # Safety
///
/// Implementations must uphold the contract of [ImageView] and yield
/// exactly `height()` mutable rows of `width()` pixels each from
/// [iter_rows_mut()](Self::iter_rows_mut).
pub unsafe trait ImageViewMut: ImageView {
    /// Iterator of mutable image rows, starting from the row with the
    /// given number.
    fn iter_rows_mut(&mut self, start_row: u32) -> impl Iterator<Item = &mut [Self::Pixel]>;

    /// Mutable version of [split_by_height()](ImageView::split_by_height).
    ///
    /// The returned bands borrow disjoint row ranges, so they can be
    /// written concurrently without synchronization.
    fn split_by_height_mut(&mut self, num_parts: NonZeroU32) -> Vec<RowsViewMut<'_, Self::Pixel>> {
        let width = self.width();
        let ranges = split_range(self.height(), num_parts.get());
        let mut rows = self.iter_rows_mut(0);
        ranges
            .into_iter()
            .map(|range| {
                let size = (range.end - range.start) as usize;
                RowsViewMut::new(width, rows.by_ref().take(size).collect())
            })
            .collect()
    }

    /// Mutable version of [split_by_width()](ImageView::split_by_width).
    ///
    /// Every row is split with `split_at_mut()`, so the returned bands own
    /// disjoint column ranges of the image.
    fn split_by_width_mut(&mut self, num_parts: NonZeroU32) -> Vec<RowsViewMut<'_, Self::Pixel>> {
        let height = self.height() as usize;
        let ranges = split_range(self.width(), num_parts.get());
        let mut parts: Vec<RowsViewMut<'_, Self::Pixel>> = ranges
            .iter()
            .map(|range| RowsViewMut::with_capacity(range.end - range.start, height))
            .collect();
        for row in self.iter_rows_mut(0) {
            let mut rest = row;
            for (part, range) in parts.iter_mut().zip(&ranges) {
                let (band, tail) = rest.split_at_mut((range.end - range.start) as usize);
                part.push_row(band);
                rest = tail;
            }
        }
        parts
    }
}

/// An immutable band of image rows produced by the `split_by_*` methods
/// of [ImageView]. Rows of a vertical band are sub-slices of the rows of
/// the parent image.
#[derive(Debug, Clone)]
pub struct RowsView<'a, P: Pixel> {
    width: u32,
    rows: Vec<&'a [P]>,
}

impl<'a, P: Pixel> RowsView<'a, P> {
    pub(crate) fn new(width: u32, rows: Vec<&'a [P]>) -> Self {
        debug_assert!(rows.iter().all(|row| row.len() == width as usize));
        Self { width, rows }
    }
}

unsafe impl<'a, P: Pixel> ImageView for RowsView<'a, P> {
    type Pixel = P;

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.rows.len() as u32
    }

    fn iter_rows(&self, start_row: u32) -> impl Iterator<Item = &[P]> {
        self.rows
            .get(start_row as usize..)
            .unwrap_or_default()
            .iter()
            .copied()
    }
}

/// A mutable band of image rows produced by the `split_by_*_mut` methods
/// of [ImageViewMut]. Bands from one split never overlap.
#[derive(Debug)]
pub struct RowsViewMut<'a, P: Pixel> {
    width: u32,
    rows: Vec<&'a mut [P]>,
}

impl<'a, P: Pixel> RowsViewMut<'a, P> {
    pub(crate) fn new(width: u32, rows: Vec<&'a mut [P]>) -> Self {
        debug_assert!(rows.iter().all(|row| row.len() == width as usize));
        Self { width, rows }
    }

    pub(crate) fn with_capacity(width: u32, height: usize) -> Self {
        Self {
            width,
            rows: Vec::with_capacity(height),
        }
    }

    pub(crate) fn push_row(&mut self, row: &'a mut [P]) {
        debug_assert_eq!(row.len(), self.width as usize);
        self.rows.push(row);
    }
}

unsafe impl<'a, P: Pixel> ImageView for RowsViewMut<'a, P> {
    type Pixel = P;

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.rows.len() as u32
    }

    fn iter_rows(&self, start_row: u32) -> impl Iterator<Item = &[P]> {
        self.rows
            .get(start_row as usize..)
            .unwrap_or_default()
            .iter()
            .map(|row| &**row)
    }
}

unsafe impl<'a, P: Pixel> ImageViewMut for RowsViewMut<'a, P> {
    fn iter_rows_mut(&mut self, start_row: u32) -> impl Iterator<Item = &mut [P]> {
        self.rows
            .get_mut(start_row as usize..)
            .unwrap_or_default()
            .iter_mut()
            .map(|row| &mut **row)
    }
}
