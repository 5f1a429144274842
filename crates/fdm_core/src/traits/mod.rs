//! Core traits for generic numerics and sampled function values.
//!
//! This module defines:
//! - Generic floating-point operations (`Float` trait re-export)
//! - Values a sampled function may produce (`FunctionOutput` trait)
//!
//! All traits are used through static dispatch; methods and estimators are
//! monomorphised over the caller's closure type.

/// Generic floating-point trait for numeric computations.
///
/// Evaluation points, step sizes and error bounds are all generic over this
/// trait, so `f32` and `f64` callers share one implementation.
///
/// # Examples
/// ```
/// use fdm_core::traits::Float;
///
/// fn half_step<T: Float>(h: T) -> T {
///     h / (T::one() + T::one())
/// }
///
/// assert_eq!(half_step(0.5_f64), 0.25);
/// ```
pub use num_traits::Float;

pub mod output;

pub use output::FunctionOutput;
