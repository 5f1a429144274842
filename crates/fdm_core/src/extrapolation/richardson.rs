//! Richardson extrapolation to `h -> 0` via a Neville tableau.

use super::config::ExtrapolationConfig;
use crate::math::estimators::lift;
use crate::traits::FunctionOutput;
use crate::types::FdmError;
use num_traits::Float;

/// Refined limit of a step function.
#[derive(Debug, Clone, PartialEq)]
pub struct Extrapolation<T, V> {
    /// Best estimate of `lim_{h -> 0} f(h)`.
    pub value: V,
    /// Error estimate of `value`; infinite if no comparison was possible.
    pub error: T,
    /// Step-function evaluations performed.
    pub evaluations: usize,
}

/// Extrapolates a step function `h -> f(h)` to its limit at `h = 0`.
///
/// `power` is the leading power of `h` in the error expansion of `f`.
pub trait Extrapolator {
    /// Estimate `lim_{h -> 0} f(h)` starting from step `h0`.
    fn extrapolate<T, V, F>(&self, f: &F, h0: T, power: u32) -> Extrapolation<T, V>
    where
        T: Float,
        V: FunctionOutput<T>,
        F: Fn(T) -> V + ?Sized;
}

/// Richardson extrapolation with geometrically contracting steps.
///
/// Each iteration evaluates `f` at the next step `h_n = h0 * contract^n`,
/// appends it to the tableau and eliminates the error terms `h^power`,
/// `h^(2 power)`, and so on. The tableau entry whose change from the
/// previous row is smallest is kept as the estimate.
///
/// Iteration stops when:
/// - the error estimate is within `max(rtol * |value|, atol)`
/// - the smallest change in a new row exceeds `breaktol` times the best
///   error, or is not finite
/// - `max_evaluations` is reached
///
/// # Example
///
/// ```
/// use fdm_core::extrapolation::{ExtrapolationConfig, Extrapolator, RichardsonExtrapolator};
///
/// let richardson = RichardsonExtrapolator::new(ExtrapolationConfig::default()).unwrap();
/// // (exp(h) - 1) / h -> 1
/// let result = richardson.extrapolate(&|h: f64| h.exp_m1() / h, 0.5, 1);
/// assert!((result.value - 1.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RichardsonExtrapolator {
    config: ExtrapolationConfig,
}

impl RichardsonExtrapolator {
    /// Create an extrapolator from a validated configuration.
    ///
    /// # Errors
    ///
    /// `FdmError::InvalidConfig` from [`ExtrapolationConfig::validate`].
    pub fn new(config: ExtrapolationConfig) -> Result<Self, FdmError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration in use.
    pub fn config(&self) -> &ExtrapolationConfig {
        &self.config
    }
}

impl Extrapolator for RichardsonExtrapolator {
    fn extrapolate<T, V, F>(&self, f: &F, h0: T, power: u32) -> Extrapolation<T, V>
    where
        T: Float,
        V: FunctionOutput<T>,
        F: Fn(T) -> V + ?Sized,
    {
        let contract: T = lift(self.config.contract);
        let atol: T = lift(self.config.atol);
        let rtol: T = self.config.resolve_rtol();
        let breaktol: T = lift(self.config.breaktol);
        let ratio = contract.recip().powi(power as i32);

        let mut h = h0;
        let mut best = f(h);
        let mut error = T::infinity();
        let mut evaluations = 1;
        // Latest tableau row, highest elimination order first.
        let mut tableau = vec![best.clone()];

        while evaluations < self.config.max_evaluations {
            evaluations += 1;
            h = h * contract;
            tableau.push(f(h));

            let mut c = ratio;
            let mut row_error = T::infinity();
            for i in (0..tableau.len() - 1).rev() {
                let weight = (c - T::one()).recip();
                let mut refined = tableau[i + 1].clone().scale(T::one() + weight);
                refined.accumulate(-weight, &tableau[i]);

                let change = refined.max_abs_diff(&tableau[i]);
                row_error = row_error.min(change);
                if change < error {
                    best = refined.clone();
                    error = change;
                }
                tableau[i] = refined;
                c = c * ratio;
            }

            tracing::trace!(
                evaluations,
                step = h.to_f64().unwrap_or(f64::NAN),
                error = error.to_f64().unwrap_or(f64::NAN),
                "richardson iteration"
            );

            if !row_error.is_finite() || row_error > breaktol * error {
                break;
            }
            if error <= (rtol * best.max_abs()).max(atol) {
                break;
            }
        }

        Extrapolation {
            value: best,
            error,
            evaluations,
        }
    }
}
