//! Values produced by the functions being differentiated.
//!
//! A finite-difference estimate is a weighted sum of function values, so the
//! output type only needs scaling, weighted accumulation and a magnitude.
//! Scalars, vectors and fixed-size arrays are supported out of the box.

use num_traits::Float;

/// Output of a function sampled by a finite-difference method.
///
/// # Type Parameters
///
/// * `T` - Floating-point type of the evaluation point and the weights
///
/// # Invariants
///
/// Vector-valued implementations assume every sample of one function has the
/// same length; `accumulate` pairs components positionally.
///
/// # Example
///
/// ```
/// use fdm_core::traits::FunctionOutput;
///
/// let mut acc = vec![1.0_f64, -2.0];
/// acc.accumulate(0.5, &vec![2.0, 2.0]);
/// assert_eq!(acc, vec![2.0, -1.0]);
/// assert_eq!(acc.max_abs(), 2.0);
/// ```
pub trait FunctionOutput<T: Float>: Clone {
    /// Largest absolute component.
    fn max_abs(&self) -> T;

    /// Multiply every component by `factor`.
    fn scale(self, factor: T) -> Self;

    /// In-place `self += weight * other`.
    fn accumulate(&mut self, weight: T, other: &Self);

    /// Largest absolute component of `self - other`.
    fn max_abs_diff(&self, other: &Self) -> T {
        let mut diff = self.clone();
        diff.accumulate(-T::one(), other);
        diff.max_abs()
    }
}

macro_rules! impl_scalar_output {
    ($($t:ty),*) => {
        $(
            impl FunctionOutput<$t> for $t {
                #[inline]
                fn max_abs(&self) -> $t {
                    self.abs()
                }

                #[inline]
                fn scale(self, factor: $t) -> $t {
                    self * factor
                }

                #[inline]
                fn accumulate(&mut self, weight: $t, other: &$t) {
                    *self = *self + weight * *other;
                }
            }
        )*
    };
}

impl_scalar_output!(f32, f64);

impl<T: Float> FunctionOutput<T> for Vec<T> {
    fn max_abs(&self) -> T {
        self.iter().fold(T::zero(), |m, v| m.max(v.abs()))
    }

    fn scale(mut self, factor: T) -> Self {
        for v in self.iter_mut() {
            *v = *v * factor;
        }
        self
    }

    fn accumulate(&mut self, weight: T, other: &Self) {
        for (v, o) in self.iter_mut().zip(other.iter()) {
            *v = *v + weight * *o;
        }
    }
}

impl<T: Float, const N: usize> FunctionOutput<T> for [T; N] {
    fn max_abs(&self) -> T {
        self.iter().fold(T::zero(), |m, v| m.max(v.abs()))
    }

    fn scale(mut self, factor: T) -> Self {
        for v in self.iter_mut() {
            *v = *v * factor;
        }
        self
    }

    fn accumulate(&mut self, weight: T, other: &Self) {
        for (v, o) in self.iter_mut().zip(other.iter()) {
            *v = *v + weight * *o;
        }
    }
}
