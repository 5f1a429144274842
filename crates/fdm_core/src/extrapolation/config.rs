//! Richardson extrapolation configuration.

use crate::math::estimators::lift;
use crate::types::FdmError;
use num_traits::Float;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default ratio between successive steps.
pub const DEFAULT_CONTRACT: f64 = 0.125;

/// Default cap on step-function evaluations.
pub const DEFAULT_MAX_EVALUATIONS: usize = 30;

/// Settings for Richardson extrapolation over the step size.
///
/// # Example
///
/// ```
/// use fdm_core::extrapolation::ExtrapolationConfig;
///
/// let config = ExtrapolationConfig::default()
///     .with_power(2)
///     .with_breaktol(2.0)
///     .with_max_evaluations(10);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.resolve_rtol::<f64>(), f64::EPSILON.sqrt());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExtrapolationConfig {
    /// Ratio `h_{n+1} / h_n`, in `(0, 1)`.
    pub contract: f64,

    /// Leading power of `h` in the error expansion.
    ///
    /// `None` lets the finite-difference driver pick 2 for symmetric methods
    /// and 1 otherwise.
    pub power: Option<u32>,

    /// Absolute tolerance on the error estimate.
    pub atol: f64,

    /// Relative tolerance. `None` means `sqrt(eps)` when `atol == 0`, else 0.
    pub rtol: Option<f64>,

    /// Stop once the smallest error of a new tableau row exceeds
    /// `breaktol` times the best error so far.
    pub breaktol: f64,

    /// Maximum number of step-function evaluations, the first included.
    pub max_evaluations: usize,
}

impl Default for ExtrapolationConfig {
    fn default() -> Self {
        Self {
            contract: DEFAULT_CONTRACT,
            power: None,
            atol: 0.0,
            rtol: None,
            breaktol: f64::INFINITY,
            max_evaluations: DEFAULT_MAX_EVALUATIONS,
        }
    }
}

impl ExtrapolationConfig {
    /// Set the step contraction ratio.
    pub fn with_contract(mut self, contract: f64) -> Self {
        self.contract = contract;
        self
    }

    /// Fix the error-expansion power.
    pub fn with_power(mut self, power: u32) -> Self {
        self.power = Some(power);
        self
    }

    /// Set the absolute tolerance.
    pub fn with_atol(mut self, atol: f64) -> Self {
        self.atol = atol;
        self
    }

    /// Set the relative tolerance.
    pub fn with_rtol(mut self, rtol: f64) -> Self {
        self.rtol = Some(rtol);
        self
    }

    /// Set the divergence threshold.
    pub fn with_breaktol(mut self, breaktol: f64) -> Self {
        self.breaktol = breaktol;
        self
    }

    /// Set the evaluation cap.
    pub fn with_max_evaluations(mut self, max_evaluations: usize) -> Self {
        self.max_evaluations = max_evaluations;
        self
    }

    /// Relative tolerance in effect, in the working float type.
    pub fn resolve_rtol<T: Float>(&self) -> T {
        match self.rtol {
            Some(rtol) => lift(rtol),
            None if self.atol > 0.0 => T::zero(),
            None => T::epsilon().sqrt(),
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// `FdmError::InvalidConfig` when:
    /// - `contract` is outside `(0, 1)`
    /// - `power` is `Some(0)`
    /// - `atol` or `rtol` is negative or NaN
    /// - `breaktol` is not positive
    /// - `max_evaluations` is zero
    pub fn validate(&self) -> Result<(), FdmError> {
        if !(self.contract > 0.0 && self.contract < 1.0) {
            return Err(invalid(format!(
                "contract must lie in (0, 1), got {}",
                self.contract
            )));
        }
        if self.power == Some(0) {
            return Err(invalid("power must be at least 1".to_string()));
        }
        if !(self.atol >= 0.0) {
            return Err(invalid(format!("atol must be non-negative, got {}", self.atol)));
        }
        if let Some(rtol) = self.rtol {
            if !(rtol >= 0.0) {
                return Err(invalid(format!("rtol must be non-negative, got {}", rtol)));
            }
        }
        if !(self.breaktol > 0.0) {
            return Err(invalid(format!(
                "breaktol must be positive, got {}",
                self.breaktol
            )));
        }
        if self.max_evaluations == 0 {
            return Err(invalid("max_evaluations must be > 0".to_string()));
        }
        Ok(())
    }
}

fn invalid(message: String) -> FdmError {
    FdmError::InvalidConfig(message)
}
