use crate::images::BufferContainer;
use crate::pixels::Pixel;
use crate::{ImageView, ImageViewMut, InvalidPixelsSize};

/// Generic reference to image data that provides [ImageView].
#[derive(Debug, Clone)]
pub struct ImageRef<'a, P> {
    width: u32,
    height: u32,
    pixels: &'a [P],
}

impl<'a, P: Pixel> ImageRef<'a, P> {
    /// Creates a view of the given row-major pixel buffer.
    ///
    /// The buffer must contain exactly `width * height` pixels.
    pub fn new(width: u32, height: u32, pixels: &'a [P]) -> Result<Self, InvalidPixelsSize> {
        let pixels_count = width as usize * height as usize;
        if pixels.len() != pixels_count {
            return Err(InvalidPixelsSize);
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn pixels(&self) -> &[P] {
        self.pixels
    }
}

unsafe impl<'a, P: Pixel> ImageView for ImageRef<'a, P> {
    type Pixel = P;

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn iter_rows(&self, start_row: u32) -> impl Iterator<Item = &[P]> {
        iter_rows(self.pixels, self.width, start_row)
    }
}

/// Generic image container that provides [ImageView] and [ImageViewMut].
///
/// The pixel buffer is either owned by the container or borrowed from the
/// caller.
#[derive(Debug)]
pub struct Image<'a, P: Pixel> {
    width: u32,
    height: u32,
    pixels: BufferContainer<'a, P>,
}

impl<P: Pixel> Image<'static, P> {
    /// Creates an image of the given size filled with the default pixel
    /// value.
    pub fn new(width: u32, height: u32) -> Self {
        let pixels_count = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: BufferContainer::Owned(vec![P::default(); pixels_count]),
        }
    }

    /// Creates an image that owns the given row-major pixel buffer.
    ///
    /// The buffer must contain exactly `width * height` pixels.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<P>) -> Result<Self, InvalidPixelsSize> {
        let pixels_count = width as usize * height as usize;
        if pixels.len() != pixels_count {
            return Err(InvalidPixelsSize);
        }
        Ok(Self {
            width,
            height,
            pixels: BufferContainer::Owned(pixels),
        })
    }
}

impl<'a, P: Pixel> Image<'a, P> {
    /// Creates an image backed by the given row-major pixel buffer.
    ///
    /// The buffer must contain exactly `width * height` pixels.
    pub fn from_pixels_slice(
        width: u32,
        height: u32,
        pixels: &'a mut [P],
    ) -> Result<Self, InvalidPixelsSize> {
        let pixels_count = width as usize * height as usize;
        if pixels.len() != pixels_count {
            return Err(InvalidPixelsSize);
        }
        Ok(Self {
            width,
            height,
            pixels: BufferContainer::Borrowed(pixels),
        })
    }

    pub fn pixels(&self) -> &[P] {
        self.pixels.borrow()
    }

    pub fn pixels_mut(&mut self) -> &mut [P] {
        self.pixels.borrow_mut()
    }
}

unsafe impl<'a, P: Pixel> ImageView for Image<'a, P> {
    type Pixel = P;

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn iter_rows(&self, start_row: u32) -> impl Iterator<Item = &[P]> {
        iter_rows(self.pixels.borrow(), self.width, start_row)
    }
}

unsafe impl<'a, P: Pixel> ImageViewMut for Image<'a, P> {
    fn iter_rows_mut(&mut self, start_row: u32) -> impl Iterator<Item = &mut [P]> {
        let width = self.width as usize;
        if width == 0 {
            [].chunks_exact_mut(1)
        } else {
            let start = start_row as usize * width;
            self.pixels
                .borrow_mut()
                .get_mut(start..)
                .unwrap_or_default()
                .chunks_exact_mut(width)
        }
    }
}

fn iter_rows<P: Pixel>(pixels: &[P], width: u32, start_row: u32) -> impl Iterator<Item = &[P]> {
    let width = width as usize;
    if width == 0 {
        [].chunks_exact(1)
    } else {
        let start = start_row as usize * width;
        pixels
            .get(start..)
            .unwrap_or_default()
            .chunks_exact(width)
    }
}
