//! Named method families with adaptive bound estimation.
//!
//! [`named_fdm`] builds a method on a canonical forward, central or backward
//! grid. With `adapt >= 1` the bound on the `p`-th derivative is estimated by
//! a second method of the same family, of order `p + 1`, that estimates the
//! `p`-th derivative itself. That inner method is built with `adapt - 1`, so
//! the chain ends at a plain [`BoundEstimator::Default`].
//!
//! # Example
//!
//! ```
//! use fdm_core::methods::{central_fdm, named_fdm, Direction, NamedConfig};
//!
//! let method = central_fdm(5, 1).unwrap();
//! assert_eq!(method.bound_estimator().adapt_depth(), 1);
//!
//! let config = NamedConfig::default().with_adapt(2).with_condition(10.0);
//! let method = named_fdm(Direction::Forward, 3, 1, &config).unwrap();
//! assert_eq!(method.bound_estimator().adapt_depth(), 2);
//! assert_eq!(method.bound_estimator().condition(), 10.0);
//! ```

use std::fmt;
use std::str::FromStr;

use super::bound::{BoundEstimator, DEFAULT_CONDITION};
use super::method::{CoefficientSource, FiniteDifferenceMethod};
use crate::math::coefficients::check_orders;
use crate::math::grids::{backward_grid, central_grid, forward_grid, geometric_grid};
use crate::types::FdmError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Family of canonical grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    /// Samples at `x, x + h, ...`.
    Forward,
    /// Samples around `x`.
    #[default]
    Central,
    /// Samples at `..., x - h, x`.
    Backward,
}

impl Direction {
    /// Canonical grid of `p` points for this direction.
    ///
    /// # Errors
    ///
    /// `FdmError::MethodOrderTooSmall` if `p < 2`.
    pub fn grid(&self, p: usize) -> Result<Vec<f64>, FdmError> {
        match self {
            Direction::Forward => forward_grid(p),
            Direction::Central => central_grid(p),
            Direction::Backward => backward_grid(p),
        }
    }

    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Central => "central",
            Direction::Backward => "backward",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = FdmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "forward" => Ok(Direction::Forward),
            "central" => Ok(Direction::Central),
            "backward" => Ok(Direction::Backward),
            other => Err(FdmError::InvalidConfig(format!(
                "unknown direction '{}', expected forward, central or backward",
                other
            ))),
        }
    }
}

/// Construction options for named methods.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NamedConfig {
    /// Levels of adaptive bound estimation.
    pub adapt: usize,
    /// Condition number of the innermost default bound estimator.
    pub condition: f64,
    /// Spread grid points geometrically (base 3).
    pub geom: bool,
}

impl Default for NamedConfig {
    fn default() -> Self {
        Self {
            adapt: 1,
            condition: DEFAULT_CONDITION,
            geom: false,
        }
    }
}

impl NamedConfig {
    /// Set the adaptation depth.
    pub fn with_adapt(mut self, adapt: usize) -> Self {
        self.adapt = adapt;
        self
    }

    /// Set the condition number.
    pub fn with_condition(mut self, condition: f64) -> Self {
        self.condition = condition;
        self
    }

    /// Enable or disable geometric grids.
    pub fn with_geom(mut self, geom: bool) -> Self {
        self.geom = geom;
        self
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// `FdmError::InvalidConfig` if `condition` is negative or not finite.
    pub fn validate(&self) -> Result<(), FdmError> {
        if !(self.condition.is_finite() && self.condition >= 0.0) {
            return Err(FdmError::InvalidConfig(format!(
                "condition must be finite and non-negative, got {}",
                self.condition
            )));
        }
        Ok(())
    }
}

/// Build a named method using the global coefficient cache.
///
/// # Errors
///
/// - Order errors for `(p, q)`, checked first
/// - `FdmError::MethodOrderTooSmall` if `p < 2`
/// - `FdmError::InvalidConfig` from [`NamedConfig::validate`]
/// - Errors from building the inner methods, e.g.
///   `FdmError::MethodOrderTooLarge` when `p + adapt > 20`
pub fn named_fdm(
    direction: Direction,
    p: usize,
    q: usize,
    config: &NamedConfig,
) -> Result<FiniteDifferenceMethod, FdmError> {
    named_fdm_with_source(direction, p, q, config, CoefficientSource::Global)
}

/// [`named_fdm`] with an explicit coefficient source for every level.
pub fn named_fdm_with_source(
    direction: Direction,
    p: usize,
    q: usize,
    config: &NamedConfig,
    source: CoefficientSource<'_>,
) -> Result<FiniteDifferenceMethod, FdmError> {
    check_orders(p, q)?;
    config.validate()?;

    let grid = direction.grid(p)?;
    let grid = if config.geom {
        geometric_grid(&grid)
    } else {
        grid
    };

    let bound_estimator = if config.adapt == 0 {
        BoundEstimator::with_condition(config.condition)
    } else {
        let inner_config = config.with_adapt(config.adapt - 1);
        let inner = named_fdm_with_source(direction, p + 1, p, &inner_config, source)?;
        BoundEstimator::Adaptive(Box::new(inner))
    };

    FiniteDifferenceMethod::builder(&grid, q)
        .bound_estimator(bound_estimator)
        .source(source)
        .build()
}

/// Forward method with default options (`adapt = 1`, `condition = 100`).
pub fn forward_fdm(p: usize, q: usize) -> Result<FiniteDifferenceMethod, FdmError> {
    named_fdm(Direction::Forward, p, q, &NamedConfig::default())
}

/// Central method with default options (`adapt = 1`, `condition = 100`).
pub fn central_fdm(p: usize, q: usize) -> Result<FiniteDifferenceMethod, FdmError> {
    named_fdm(Direction::Central, p, q, &NamedConfig::default())
}

/// Backward method with default options (`adapt = 1`, `condition = 100`).
pub fn backward_fdm(p: usize, q: usize) -> Result<FiniteDifferenceMethod, FdmError> {
    named_fdm(Direction::Backward, p, q, &NamedConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::coefficients::CoefficientCache;
    use approx::assert_relative_eq;

    #[test]
    fn test_direction_parse_and_display() {
        assert_eq!("forward".parse::<Direction>().unwrap(), Direction::Forward);
        assert_eq!("Central".parse::<Direction>().unwrap(), Direction::Central);
        assert_eq!("BACKWARD".parse::<Direction>().unwrap(), Direction::Backward);
        assert!("sideways".parse::<Direction>().is_err());
        assert_eq!(Direction::Central.to_string(), "central");
        assert_eq!(Direction::default(), Direction::Central);
    }

    #[test]
    fn test_default_config() {
        let config = NamedConfig::default();
        assert_eq!(config.adapt, 1);
        assert_eq!(config.condition, 100.0);
        assert!(!config.geom);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_named_grids() {
        assert_eq!(forward_fdm(3, 1).unwrap().grid(), &[0.0, 1.0, 2.0]);
        assert_eq!(backward_fdm(3, 1).unwrap().grid(), &[-2.0, -1.0, 0.0]);
        assert_eq!(central_fdm(4, 1).unwrap().grid(), &[-2.0, -1.0, 1.0, 2.0]);
    }

    #[test]
    fn test_adaptive_chain_structure() {
        let config = NamedConfig::default().with_adapt(2);
        let outer = named_fdm(Direction::Central, 3, 1, &config).unwrap();
        assert_eq!(outer.bound_estimator().adapt_depth(), 2);

        let BoundEstimator::Adaptive(inner) = outer.bound_estimator() else {
            panic!("expected adaptive bound estimator");
        };
        assert_eq!(inner.order(), 4);
        assert_eq!(inner.derivative_order(), 3);

        let BoundEstimator::Adaptive(innermost) = inner.bound_estimator() else {
            panic!("expected adaptive bound estimator");
        };
        assert_eq!(innermost.order(), 5);
        assert_eq!(innermost.derivative_order(), 4);
        assert_eq!(
            innermost.bound_estimator(),
            &BoundEstimator::Default { condition: 100.0 }
        );
    }

    #[test]
    fn test_adapt_zero_uses_default_estimator() {
        let config = NamedConfig::default().with_adapt(0).with_condition(3.0);
        let m = named_fdm(Direction::Forward, 2, 1, &config).unwrap();
        assert_eq!(m.bound_estimator(), &BoundEstimator::Default { condition: 3.0 });
    }

    #[test]
    fn test_inner_order_too_large_propagates() {
        assert!(central_fdm(19, 1).is_ok());
        assert_eq!(
            central_fdm(20, 1),
            Err(FdmError::MethodOrderTooLarge { p: 21, max: 20 })
        );
        let config = NamedConfig::default().with_adapt(0);
        assert!(named_fdm(Direction::Central, 20, 1, &config).is_ok());
    }

    #[test]
    fn test_outer_errors_first() {
        assert_eq!(
            forward_fdm(2, 2),
            Err(FdmError::DerivativeOrderTooHigh { p: 2, q: 2 })
        );
        assert_eq!(
            forward_fdm(1, 0),
            Err(FdmError::MethodOrderTooSmall { p: 1 })
        );
        let config = NamedConfig::default().with_condition(-1.0);
        assert!(matches!(
            named_fdm(Direction::Central, 3, 1, &config),
            Err(FdmError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_geometric_named_grid() {
        let config = NamedConfig::default().with_geom(true);
        let m = named_fdm(Direction::Forward, 4, 1, &config).unwrap();
        assert_eq!(m.grid(), &[0.0, 1.0, 3.0, 9.0]);
        let BoundEstimator::Adaptive(inner) = m.bound_estimator() else {
            panic!("expected adaptive bound estimator");
        };
        assert_eq!(inner.grid(), &[0.0, 1.0, 3.0, 9.0, 27.0]);

        let d = m.evaluate_auto(&|x: f64| x.exp(), 0.0);
        assert_relative_eq!(d, 1.0, epsilon = 1e-8);
    }

    #[test]
    fn test_with_source_populates_injected_cache() {
        let cache = CoefficientCache::new();
        let config = NamedConfig::default().with_adapt(2);
        named_fdm_with_source(
            Direction::Central,
            3,
            2,
            &config,
            CoefficientSource::Cache(&cache),
        )
        .unwrap();
        assert_eq!(cache.len(), 3);
        assert!(cache.contains(&[-1.0, 0.0, 1.0], 2));
        assert!(cache.contains(&[-2.0, -1.0, 1.0, 2.0], 3));
        assert!(cache.contains(&[-2.0, -1.0, 0.0, 1.0, 2.0], 4));
    }

    #[test]
    fn test_adaptive_methods_are_accurate() {
        let f = |x: f64| x.sin();
        let expected = 1.0_f64.cos();
        for d in [Direction::Forward, Direction::Central, Direction::Backward] {
            let m = named_fdm(d, 6, 1, &NamedConfig::default()).unwrap();
            let v = m.evaluate_auto(&f, 1.0);
            assert!((v - expected).abs() < 1e-10, "{}: {}", d, v);
        }
    }
}
