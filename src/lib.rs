#![doc = include_str!("../README.md")]

pub use convolution::{
    horizontal_convolution, horizontal_convolution_in_place, separable_convolution,
    vertical_convolution, vertical_convolution_in_place, BorderMode,
};
pub use errors::*;
pub use image_view::{ImageView, ImageViewMut, RowsView, RowsViewMut};
pub use kernel::Kernel;

mod convolution;
mod errors;
mod image_view;
pub mod images;
mod kernel;
pub mod pixels;
mod threading;
