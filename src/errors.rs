use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelError {
    #[error("Kernel must contain at least one coefficient")]
    Empty,
    #[error("Kernel length must be odd, but {0} coefficients were given")]
    EvenLength(usize),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error(
    "The dimensions of the source image are not equal to the dimensions of the destination image"
)]
pub struct DifferentDimensionsError;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Count of pixels in the buffer doesn't match to the image dimensions")]
pub struct InvalidPixelsSize;
