//! The finite-difference method value type.

use std::sync::Arc;

use super::bound::{BoundEstimator, DEFAULT_CONDITION};
use super::step::StepConfig;
use crate::math::coefficients::{check_orders, solve_coefficients, CoefficientCache};
use crate::math::estimators::lift;
use crate::traits::FunctionOutput;
use crate::types::FdmError;
use num_traits::Float;

/// Where a method obtains its coefficients.
#[derive(Debug, Clone, Copy, Default)]
pub enum CoefficientSource<'a> {
    /// The process-wide [`CoefficientCache::global`].
    #[default]
    Global,
    /// An injected cache.
    Cache(&'a CoefficientCache),
    /// Solve directly, touching no cache.
    Uncached,
}

impl CoefficientSource<'_> {
    fn coefficients(&self, grid: &[f64], q: usize) -> Result<Arc<[f64]>, FdmError> {
        match self {
            CoefficientSource::Global => CoefficientCache::global().get_or_solve(grid, q),
            CoefficientSource::Cache(cache) => cache.get_or_solve(grid, q),
            CoefficientSource::Uncached => Ok(solve_coefficients(grid, q)?.into()),
        }
    }
}

/// A finite-difference method: grid, derivative order, weights and a bound
/// estimator for step-size selection.
///
/// For a step `h` the method estimates the `q`-th derivative of `f` at `x` as
///
/// ```text
/// Σ coefs[i] * f(x + h * grid[i]) / h^q
/// ```
///
/// which is exact for polynomials of degree below `p = grid.len()`.
///
/// # Invariants
///
/// - `grid.len() == coefs.len() == p`
/// - `q < p <= 20`
/// - Immutable after construction
///
/// # Example
///
/// ```
/// use fdm_core::methods::FiniteDifferenceMethod;
///
/// let method = FiniteDifferenceMethod::new(&[-2.0, -1.0, 0.0, 1.0, 2.0], 1).unwrap();
///
/// let d = method.evaluate(&|x: f64| x.sin(), 1.0, 1e-3);
/// assert!((d - 1.0_f64.cos()).abs() < 1e-12);
///
/// let d = method.evaluate_auto(&|x: f64| x.sin(), 1.0);
/// assert!((d - 1.0_f64.cos()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FiniteDifferenceMethod {
    grid: Vec<f64>,
    q: usize,
    coefs: Arc<[f64]>,
    bound_estimator: BoundEstimator,
}

impl FiniteDifferenceMethod {
    /// Method on `grid` for the `q`-th derivative with the default bound
    /// estimator (condition 100) and the global coefficient cache.
    ///
    /// # Errors
    ///
    /// - `FdmError::DerivativeOrderTooHigh` if `q >= grid.len()`
    /// - `FdmError::MethodOrderTooLarge` if `grid.len() > 20`
    /// - Grid errors from the coefficient solver
    pub fn new(grid: &[f64], q: usize) -> Result<Self, FdmError> {
        Self::builder(grid, q).build()
    }

    /// As [`FiniteDifferenceMethod::new`] with a custom condition number.
    pub fn with_condition(grid: &[f64], q: usize, condition: f64) -> Result<Self, FdmError> {
        Self::builder(grid, q).condition(condition).build()
    }

    /// Start a [`MethodBuilder`] for full control over construction.
    pub fn builder(grid: &[f64], q: usize) -> MethodBuilder<'static> {
        MethodBuilder {
            grid: grid.to_vec(),
            q,
            condition: DEFAULT_CONDITION,
            bound_estimator: None,
            source: CoefficientSource::Global,
        }
    }

    /// Grid offsets, in multiples of the step size.
    pub fn grid(&self) -> &[f64] {
        &self.grid
    }

    /// Weights, one per grid point.
    pub fn coefs(&self) -> &[f64] {
        &self.coefs
    }

    /// Order of the method `p`, the number of grid points.
    pub fn order(&self) -> usize {
        self.grid.len()
    }

    /// Order of the derivative `q`.
    pub fn derivative_order(&self) -> usize {
        self.q
    }

    /// Estimator of the `p`-th derivative used for step selection.
    pub fn bound_estimator(&self) -> &BoundEstimator {
        &self.bound_estimator
    }

    /// Whether grid and weights are symmetric under negation.
    ///
    /// The grid must satisfy `grid[i] == -grid[p-1-i]` (an odd grid is
    /// centred on zero) and the weights `coefs[i] == (-1)^q coefs[p-1-i]`.
    /// Symmetric methods have error expansions in even powers of `h`.
    pub fn is_symmetric(&self) -> bool {
        let p = self.grid.len();
        let sign = if self.q % 2 == 0 { 1.0 } else { -1.0 };
        (0..p.div_ceil(2)).all(|i| {
            let j = p - 1 - i;
            self.grid[i] == -self.grid[j] && self.coefs[i] == sign * self.coefs[j]
        })
    }

    /// Estimate the `q`-th derivative of `f` at `x` with step `h`.
    ///
    /// Computed in the float type of `x`. With `q == 0` the step is
    /// irrelevant for grids containing zero and the result is `f(x)`.
    pub fn evaluate<T, V, F>(&self, f: &F, x: T, h: T) -> V
    where
        T: Float,
        V: FunctionOutput<T>,
        F: Fn(T) -> V + ?Sized,
    {
        let mut terms = self.grid.iter().zip(self.coefs.iter());
        // p >= 1 by construction
        let first = terms.next().map(|(&g, &c)| f(x + h * lift(g)).scale(lift(c)));
        let Some(mut acc) = first else {
            return f(x);
        };
        for (&g, &c) in terms {
            acc.accumulate(lift(c), &f(x + h * lift(g)));
        }
        acc.scale(h.powi(-(self.q as i32)))
    }

    /// Estimate the `q`-th derivative of `f` at `x` with an automatically
    /// chosen step, using [`StepConfig::default`].
    pub fn evaluate_auto<T, V, F>(&self, f: &F, x: T) -> V
    where
        T: Float,
        V: FunctionOutput<T>,
        F: Fn(T) -> V + ?Sized,
    {
        self.evaluate_auto_with(f, x, &StepConfig::default())
    }

    /// Estimate the `q`-th derivative of `f` at `x` with the step chosen by
    /// [`FiniteDifferenceMethod::estimate_step`] under `config`.
    ///
    /// For `q == 0` the step search is skipped and `f(x)` returned.
    pub fn evaluate_auto_with<T, V, F>(&self, f: &F, x: T, config: &StepConfig<T>) -> V
    where
        T: Float,
        V: FunctionOutput<T>,
        F: Fn(T) -> V + ?Sized,
    {
        if self.q == 0 {
            return f(x);
        }
        let step = self.estimate_step(f, x, config).step;
        self.evaluate(f, x, step)
    }
}

/// Builder for [`FiniteDifferenceMethod`].
///
/// # Example
///
/// ```
/// use fdm_core::math::coefficients::CoefficientCache;
/// use fdm_core::methods::FiniteDifferenceMethod;
///
/// let cache = CoefficientCache::new();
/// let method = FiniteDifferenceMethod::builder(&[0.0, 1.0, 2.0], 1)
///     .condition(10.0)
///     .cache(&cache)
///     .build()
///     .unwrap();
///
/// assert_eq!(method.order(), 3);
/// assert_eq!(cache.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MethodBuilder<'a> {
    grid: Vec<f64>,
    q: usize,
    condition: f64,
    bound_estimator: Option<BoundEstimator>,
    source: CoefficientSource<'a>,
}

impl<'a> MethodBuilder<'a> {
    /// Condition number of the default bound estimator.
    pub fn condition(mut self, condition: f64) -> Self {
        self.condition = condition;
        self
    }

    /// Use `bound_estimator` instead of the default one.
    pub fn bound_estimator(mut self, bound_estimator: BoundEstimator) -> Self {
        self.bound_estimator = Some(bound_estimator);
        self
    }

    /// Obtain coefficients from `cache`.
    pub fn cache<'b>(self, cache: &'b CoefficientCache) -> MethodBuilder<'b> {
        self.source(CoefficientSource::Cache(cache))
    }

    /// Solve coefficients directly, bypassing every cache.
    pub fn uncached(self) -> Self {
        MethodBuilder {
            source: CoefficientSource::Uncached,
            ..self
        }
    }

    /// Obtain coefficients from `source`.
    pub fn source<'b>(self, source: CoefficientSource<'b>) -> MethodBuilder<'b> {
        MethodBuilder {
            grid: self.grid,
            q: self.q,
            condition: self.condition,
            bound_estimator: self.bound_estimator,
            source,
        }
    }

    /// Validate the orders and condition, then compute the coefficients.
    ///
    /// # Errors
    ///
    /// - Order errors, checked before any coefficient work
    /// - `FdmError::InvalidConfig` for a negative or non-finite condition
    /// - Grid errors from the coefficient solver
    pub fn build(self) -> Result<FiniteDifferenceMethod, FdmError> {
        check_orders(self.grid.len(), self.q)?;
        if !(self.condition.is_finite() && self.condition >= 0.0) {
            return Err(FdmError::InvalidConfig(format!(
                "condition must be finite and non-negative, got {}",
                self.condition
            )));
        }

        let coefs = self.source.coefficients(&self.grid, self.q)?;
        let bound_estimator = self
            .bound_estimator
            .unwrap_or(BoundEstimator::Default {
                condition: self.condition,
            });

        Ok(FiniteDifferenceMethod {
            grid: self.grid,
            q: self.q,
            coefs,
            bound_estimator,
        })
    }
}
