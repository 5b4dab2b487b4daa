use crate::errors::KernelError;

/// 1D convolution kernel with an odd number of coefficients.
///
/// Coefficients are stored in the accumulator type of the pixels the kernel
/// will be applied to (e.g. `i32` for `u8` images, `f64` for `f32` images).
/// The kernel is immutable after construction, so every convolution call
/// sees a validated, odd-length coefficient sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel<T> {
    coefficients: Vec<T>,
}

impl<T: Copy> Kernel<T> {
    /// Creates a kernel from the given coefficients.
    ///
    /// Returns an error if the coefficient vector is empty or has an even
    /// length.
    pub fn new(coefficients: Vec<T>) -> Result<Self, KernelError> {
        if coefficients.is_empty() {
            return Err(KernelError::Empty);
        }
        if coefficients.len() % 2 == 0 {
            return Err(KernelError::EvenLength(coefficients.len()));
        }
        Ok(Self { coefficients })
    }

    /// Number of coefficients (`2 * half_width + 1`).
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    /// A kernel is never empty; this only exists to satisfy the
    /// `len`/`is_empty` convention.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of neighbors consulted on each side of a sample.
    #[inline(always)]
    pub fn half_width(&self) -> usize {
        self.coefficients.len() / 2
    }

    #[inline(always)]
    pub fn coefficients(&self) -> &[T] {
        &self.coefficients
    }
}
