//! Step-size selection balancing round-off against truncation error.
//!
//! For a method of order `p` estimating the `q`-th derivative, the total
//! error at step `h` is bounded by
//!
//! ```text
//! E(h) = C1 / h^q + C2 * h^(p-q)
//! C1   = ε Σ|c_i|                 (amplified evaluation noise)
//! C2   = M Σ|c_i g_i^p| / p!      (leading Taylor remainder)
//! ```
//!
//! with `ε` the round-off level of `f` at `x` and `M` a bound on the `p`-th
//! derivative. The minimiser of `E` is available in closed form, so no
//! search is performed.

use super::method::FiniteDifferenceMethod;
use crate::math::estimators::{estimate_roundoff_error, lift, perturbation};
use crate::traits::FunctionOutput;
use crate::types::FdmError;
use num_traits::Float;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Options for [`FiniteDifferenceMethod::estimate_step`].
///
/// # Example
///
/// ```
/// use fdm_core::methods::StepConfig;
///
/// let config = StepConfig::default().with_factor(10.0).with_max_step(0.5);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.resolve_max_step(3.0), 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StepConfig<T> {
    /// Multiplier on the estimated round-off error. Use values above 1 for
    /// functions that are noisier than their floating-point type suggests.
    /// Its sign is ignored.
    pub factor: T,
    /// Upper bound on the step, by magnitude. `None` means
    /// `0.1 * max(|x|, 1)`.
    pub max_step: Option<T>,
}

impl<T: Float> Default for StepConfig<T> {
    fn default() -> Self {
        Self {
            factor: T::one(),
            max_step: None,
        }
    }
}

impl<T: Float> StepConfig<T> {
    /// Set the round-off multiplier.
    pub fn with_factor(mut self, factor: T) -> Self {
        self.factor = factor;
        self
    }

    /// Set an explicit step cap.
    pub fn with_max_step(mut self, max_step: T) -> Self {
        self.max_step = Some(max_step);
        self
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// `FdmError::InvalidConfig` if `factor` is not positive and finite, or
    /// `max_step` is not positive.
    pub fn validate(&self) -> Result<(), FdmError> {
        if !(self.factor.is_finite() && self.factor > T::zero()) {
            return Err(FdmError::InvalidConfig(
                "factor must be positive and finite".to_string(),
            ));
        }
        if let Some(max_step) = self.max_step {
            if !(max_step > T::zero()) {
                return Err(FdmError::InvalidConfig(
                    "max_step must be positive".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Step cap in effect at `x`, always non-negative.
    pub fn resolve_max_step(&self, x: T) -> T {
        self.max_step.map_or_else(|| perturbation(x), |h| h.abs())
    }
}

/// Chosen step and the error bound achieved there.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StepEstimate<T> {
    /// Step size, never above the configured cap.
    pub step: T,
    /// `C1 / h^q + C2 * h^(p-q)` at `step`.
    pub accuracy: T,
}

impl FiniteDifferenceMethod {
    /// Choose the step minimising the combined round-off and truncation
    /// bound for `f` at `x`.
    ///
    /// Runs the bound estimator once, which calls `f` (and, for adaptive
    /// estimators, nested methods) a small number of times. For `q == 0` the
    /// optimum is `h = 0` and the accuracy reduces to the round-off term.
    ///
    /// Never fails: degenerate inputs yield the step cap, or a non-finite
    /// accuracy the caller should inspect. `config` is not validated; the
    /// signs of `factor` and `max_step` are dropped, so the step is never
    /// negative.
    ///
    /// # Example
    ///
    /// ```
    /// use fdm_core::methods::{central_fdm, StepConfig};
    ///
    /// let method = central_fdm(5, 1).unwrap();
    /// let est = method.estimate_step(&|x: f64| x.sin(), 1.0, &StepConfig::default());
    /// assert!(est.step > 0.0 && est.step <= 0.1);
    /// assert!(est.accuracy < 1e-10);
    /// ```
    pub fn estimate_step<T, V, F>(&self, f: &F, x: T, config: &StepConfig<T>) -> StepEstimate<T>
    where
        T: Float,
        V: FunctionOutput<T>,
        F: Fn(T) -> V + ?Sized,
    {
        let p = self.order();
        let q = self.derivative_order();
        let max_step = config.resolve_max_step(x);

        let roundoff = estimate_roundoff_error(f, x) * config.factor.abs();
        let bound = self.bound_estimator().estimate(f, x);

        let c1 = roundoff * lift(self.noise_weight());
        let c2 = bound * lift(self.truncation_weight());

        let exponent = lift::<T>(p as f64).recip();
        let balance = lift::<T>(q as f64 / (p - q) as f64) * c1 / c2;
        // Float::min discards NaN, so 0/0 falls back to the cap.
        let step = balance.powf(exponent).min(max_step);
        let accuracy = step.powi(-(q as i32)) * c1 + step.powi((p - q) as i32) * c2;

        tracing::trace!(
            p,
            q,
            step = step.to_f64().unwrap_or(f64::NAN),
            accuracy = accuracy.to_f64().unwrap_or(f64::NAN),
            "selected finite-difference step"
        );
        StepEstimate { step, accuracy }
    }

    /// `Σ|c_i|`
    fn noise_weight(&self) -> f64 {
        self.coefs().iter().map(|c| c.abs()).sum()
    }

    /// `Σ|c_i g_i^p| / p!`
    fn truncation_weight(&self) -> f64 {
        let p = self.order();
        let factorial: f64 = (2..=p).map(|k| k as f64).product();
        let moment: f64 = self
            .coefs()
            .iter()
            .zip(self.grid())
            .map(|(c, g)| (c * g.powi(p as i32)).abs())
            .sum();
        moment / factorial
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::methods::{central_fdm, forward_fdm, BoundEstimator};
    use approx::assert_relative_eq;

    #[test]
    fn test_default_config() {
        let config = StepConfig::<f64>::default();
        assert_eq!(config.factor, 1.0);
        assert_eq!(config.max_step, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_resolve_max_step_default() {
        let config = StepConfig::<f64>::default();
        assert_relative_eq!(config.resolve_max_step(0.0), 0.1);
        assert_relative_eq!(config.resolve_max_step(0.5), 0.1);
        assert_relative_eq!(config.resolve_max_step(-20.0), 2.0);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(StepConfig::default().with_factor(0.0).validate().is_err());
        assert!(StepConfig::default().with_factor(f64::NAN).validate().is_err());
        assert!(StepConfig::default().with_max_step(-1.0).validate().is_err());
        assert!(StepConfig::default().with_max_step(0.0).validate().is_err());
    }

    #[test]
    fn test_weights_central_five_point() {
        let m = central_fdm(5, 1).unwrap();
        // |1/12| + |2/3| + 0 + |2/3| + |1/12|
        assert_relative_eq!(m.noise_weight(), 1.5, epsilon = 1e-15);
        // (2 * 32/12 + 2 * 2/3) / 120
        assert_relative_eq!(m.truncation_weight(), 1.0 / 18.0, epsilon = 1e-15);
    }

    #[test]
    fn test_closed_form_sin() {
        let m = FiniteDifferenceMethod::new(&[-2.0, -1.0, 0.0, 1.0, 2.0], 1).unwrap();
        let f = |x: f64| x.sin();
        let est = m.estimate_step(&f, 1.0, &StepConfig::default());

        let eps = estimate_roundoff_error(&f, 1.0);
        let bound = 100.0 * 1.0_f64.sin();
        let c1 = eps * 1.5;
        let c2 = bound / 18.0;
        let h = (0.25 * c1 / c2).powf(0.2);
        assert_relative_eq!(est.step, h, max_relative = 1e-12);
        assert_relative_eq!(est.accuracy, c1 / h + h.powi(4) * c2, max_relative = 1e-12);
        assert!(est.step < 2e-3);
    }

    #[test]
    fn test_step_clamped_to_max() {
        // Zero bound: any step is free of truncation error.
        let bound = BoundEstimator::with_condition(0.0);
        let m = FiniteDifferenceMethod::builder(&[-1.0, 0.0, 1.0], 1)
            .bound_estimator(bound)
            .build()
            .unwrap();
        let est = m.estimate_step(&|x: f64| x.exp(), 2.0, &StepConfig::default());
        assert_relative_eq!(est.step, 0.2);
        assert!(est.accuracy.is_finite() && est.accuracy >= 0.0);

        let config = StepConfig::default().with_max_step(1e-6);
        let est = m.estimate_step(&|x: f64| x.exp(), 2.0, &config);
        assert_eq!(est.step, 1e-6);
    }

    #[test]
    fn test_zero_function_degenerates_to_cap() {
        let m = forward_fdm(3, 1).unwrap();
        let est = m.estimate_step(&|_: f64| 0.0, 1.0, &StepConfig::default());
        assert_relative_eq!(est.step, 0.1);
        assert!(est.accuracy.is_finite());
    }

    #[test]
    fn test_factor_increases_step() {
        let m = central_fdm(3, 1).unwrap();
        let f = |x: f64| x.cos();
        let base = m.estimate_step(&f, 0.5, &StepConfig::default());
        let noisy = m.estimate_step(&f, 0.5, &StepConfig::default().with_factor(1e4));
        assert!(noisy.step > base.step);
        assert!(noisy.accuracy > base.accuracy);
    }

    #[test]
    fn test_zeroth_derivative_step() {
        let m = FiniteDifferenceMethod::new(&[-1.0, 0.0, 1.0], 0).unwrap();
        let est = m.estimate_step(&|x: f64| x.exp(), 0.0, &StepConfig::default());
        assert_eq!(est.step, 0.0);
        assert!(est.accuracy >= 0.0);
    }

    #[test]
    fn test_f32_step() {
        let m = central_fdm(5, 1).unwrap();
        let est = m.estimate_step(&|x: f32| x.sin(), 1.0_f32, &StepConfig::default());
        assert!(est.step > 0.0 && est.step <= 0.1);
        assert!(est.accuracy.is_finite());
    }

    #[test]
    fn test_signs_in_config_are_dropped() {
        let m = central_fdm(5, 1).unwrap();
        let f = |x: f64| x.sin();
        let negative = StepConfig::default().with_factor(-4.0).with_max_step(-1e-4);
        assert!(negative.validate().is_err());
        assert_eq!(negative.resolve_max_step(1.0), 1e-4);

        let est = m.estimate_step(&f, 1.0, &negative);
        let positive = StepConfig::default().with_factor(4.0).with_max_step(1e-4);
        assert_eq!(est, m.estimate_step(&f, 1.0, &positive));
        assert!(est.step > 0.0 && est.step <= 1e-4);
        assert!(est.accuracy > 0.0);
    }
}
