//! Bounds on the `p`-th derivative used for step-size selection.
//!
//! The step-size optimiser needs the magnitude of the first derivative a
//! method does not resolve. Two estimators are available:
//!
//! - [`BoundEstimator::Default`]: the function's own magnitude amplified by a
//!   fixed condition number
//! - [`BoundEstimator::Adaptive`]: the magnitude of a higher-order method's
//!   estimate of that derivative, which may itself be adaptive

use super::method::FiniteDifferenceMethod;
use crate::math::estimators::{estimate_magnitude, lift};
use crate::traits::FunctionOutput;
use num_traits::Float;

/// Default amplification applied to the function magnitude.
///
/// A heuristic rather than a derived constant; tune through the constructors
/// that take a `condition` argument.
pub const DEFAULT_CONDITION: f64 = 100.0;

/// Estimator of the magnitude of the `p`-th derivative of `f` at `x`.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundEstimator {
    /// `condition * estimate_magnitude(f, x)`.
    Default {
        /// Amplification of the function magnitude
        condition: f64,
    },

    /// `estimate_magnitude(x' -> method(f, x'), x)` where `method` estimates
    /// the `p`-th derivative with automatic step selection.
    Adaptive(Box<FiniteDifferenceMethod>),
}

impl Default for BoundEstimator {
    fn default() -> Self {
        BoundEstimator::Default {
            condition: DEFAULT_CONDITION,
        }
    }
}

impl BoundEstimator {
    /// Default estimator with the given condition number.
    pub fn with_condition(condition: f64) -> Self {
        BoundEstimator::Default { condition }
    }

    /// Estimate the bound for `f` at `x`.
    ///
    /// # Example
    ///
    /// ```
    /// use fdm_core::methods::BoundEstimator;
    ///
    /// let bound = BoundEstimator::with_condition(10.0);
    /// let m = bound.estimate(&|x: f64| 2.0 * x, 1.0);
    /// assert_eq!(m, 20.0);
    /// ```
    pub fn estimate<T, V, F>(&self, f: &F, x: T) -> T
    where
        T: Float,
        V: FunctionOutput<T>,
        F: Fn(T) -> V + ?Sized,
    {
        match self {
            BoundEstimator::Default { condition } => {
                lift::<T>(*condition) * estimate_magnitude(f, x)
            }
            BoundEstimator::Adaptive(method) => {
                estimate_magnitude(&|y: T| method.evaluate_auto(f, y), x)
            }
        }
    }

    /// Number of nested adaptive levels below this estimator.
    pub fn adapt_depth(&self) -> usize {
        match self {
            BoundEstimator::Default { .. } => 0,
            BoundEstimator::Adaptive(method) => 1 + method.bound_estimator().adapt_depth(),
        }
    }

    /// Condition number used by the innermost default estimator.
    pub fn condition(&self) -> f64 {
        match self {
            BoundEstimator::Default { condition } => *condition,
            BoundEstimator::Adaptive(method) => method.bound_estimator().condition(),
        }
    }
}
