//! Pixel types supported by the convolution routines.

use std::fmt::Debug;
use std::ops::{AddAssign, Mul};

use num_traits::Zero;

/// Pixel type that can be convolved with a kernel.
///
/// The associated [Accumulator](Pixel::Accumulator) type is wide enough to
/// hold partial sums of pixel values multiplied by kernel coefficients
/// without premature rounding or clipping. All intermediate arithmetic of
/// the convolution routines is performed in the accumulator type and the
/// result is narrowed back to the pixel type exactly once, at the final
/// store.
///
/// Narrowing uses `as`-cast semantics: if the accumulated value does not fit
/// into the pixel type, an integer result wraps and a float result loses
/// precision. The crate never saturates values; choosing a kernel whose
/// results fit into the pixel type is the caller's responsibility.
pub trait Pixel: Copy + Debug + Default + PartialEq + Send + Sync + 'static {
    /// Type used to accumulate intermediate convolution sums.
    type Accumulator: Copy
        + Debug
        + Default
        + Send
        + Sync
        + Zero
        + AddAssign
        + Mul<Output = Self::Accumulator>
        + 'static;

    /// Widens the pixel value into the accumulator type.
    fn to_accumulator(self) -> Self::Accumulator;

    /// Narrows an accumulated sum back into the pixel type.
    fn from_accumulator(acc: Self::Accumulator) -> Self;
}

macro_rules! pixel_impl {
    ($pixel:ty, $acc:ty) => {
        impl Pixel for $pixel {
            type Accumulator = $acc;

            #[inline(always)]
            fn to_accumulator(self) -> $acc {
                self as $acc
            }

            #[inline(always)]
            fn from_accumulator(acc: $acc) -> Self {
                acc as $pixel
            }
        }
    };
}

pixel_impl!(u8, i32);
pixel_impl!(u16, i64);
pixel_impl!(i32, i64);
pixel_impl!(f32, f64);
pixel_impl!(f64, f64);
