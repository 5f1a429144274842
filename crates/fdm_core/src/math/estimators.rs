//! Magnitude and round-off estimators for sampled functions.
//!
//! These estimators feed the step-size optimiser: the magnitude of `f`
//! near `x` stands in for the size of its derivatives, and the unit of
//! least precision at that magnitude is the noise floor below which
//! differences of function values cannot be trusted.

use crate::traits::FunctionOutput;
use num_traits::Float;

/// Estimate the magnitude of `f` around `x`.
///
/// Returns the largest absolute component of `f(x)`. When that is exactly
/// zero, `x` is assumed to be a pathological point for `f` (think `sin(0)`)
/// and the estimate is retried once at `x + 0.1 * max(|x|, 1)`. If the
/// perturbed point is also a zero the result is zero.
///
/// # Examples
///
/// ```
/// use fdm_core::math::estimators::estimate_magnitude;
///
/// let m = estimate_magnitude(&|x: f64| x.sin(), 0.0);
/// assert!(m > 0.0);
/// ```
pub fn estimate_magnitude<T, V, F>(f: &F, x: T) -> T
where
    T: Float,
    V: FunctionOutput<T>,
    F: Fn(T) -> V + ?Sized,
{
    let m = f(x).max_abs();
    if m > T::zero() {
        return m;
    }

    let delta = perturbation(x);
    tracing::debug!(
        x = x.to_f64().unwrap_or(f64::NAN),
        delta = delta.to_f64().unwrap_or(f64::NAN),
        "function vanishes at evaluation point; perturbing magnitude estimate"
    );
    f(x + delta).max_abs()
}

/// Estimate the round-off error of evaluating `f` around `x`.
///
/// The unit of least precision at [`estimate_magnitude`], floored at
/// `eps(T) / 1000` so that functions vanishing near `x` still leave four
/// orders of magnitude of slack.
///
/// # Examples
///
/// ```
/// use fdm_core::math::estimators::estimate_roundoff_error;
///
/// let eps = estimate_roundoff_error(&|_x: f64| 1.0, 0.5);
/// assert_eq!(eps, f64::EPSILON);
///
/// let floor = estimate_roundoff_error(&|_x: f64| 0.0, 0.5);
/// assert_eq!(floor, f64::EPSILON / 1000.0);
/// ```
pub fn estimate_roundoff_error<T, V, F>(f: &F, x: T) -> T
where
    T: Float,
    V: FunctionOutput<T>,
    F: Fn(T) -> V + ?Sized,
{
    let floor = T::epsilon() / lift(1000.0);
    ulp(estimate_magnitude(f, x)).max(floor)
}

/// Unit of least precision at `|m|`.
///
/// For normal numbers this is the gap between `|m|` and the next larger
/// representable value, e.g. `ulp(1.0) == f64::EPSILON`. Non-finite input
/// yields NaN.
pub fn ulp<T: Float>(m: T) -> T {
    if !m.is_finite() {
        return T::nan();
    }
    let m = m.abs();
    if m < T::min_positive_value() {
        // Subnormal spacing: min_positive * eps.
        return T::min_positive_value() * T::epsilon();
    }
    let (_, exponent, _) = m.integer_decode();
    // 2^e in two halves: a single powi overflows its intermediate near MIN_POSITIVE.
    let e = i32::from(exponent);
    let two = lift::<T>(2.0);
    two.powi(e / 2) * two.powi(e - e / 2)
}

/// Default perturbation used when `f` vanishes at `x`.
#[inline]
pub(crate) fn perturbation<T: Float>(x: T) -> T {
    lift::<T>(0.1) * x.abs().max(T::one())
}

/// Convert an `f64` constant into the working float type.
#[inline]
pub(crate) fn lift<T: Float>(v: f64) -> T {
    T::from(v).unwrap_or_else(T::nan)
}
