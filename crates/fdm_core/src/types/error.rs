//! Error types for structured error handling.
//!
//! This module provides:
//! - `FdmError`: Errors from constructing finite-difference methods and
//!   validating their configuration
//!
//! Run-time evaluation never fails: degenerate inputs degrade the accuracy
//! of the returned estimate instead, and callers inspect the reported
//! accuracy or extrapolation error to detect this.

use thiserror::Error;

/// Finite-difference method construction error.
///
/// # Variants
/// - `DerivativeOrderTooHigh`: `q >= p`, the grid cannot resolve the derivative
/// - `MethodOrderTooLarge`: `p` exceeds the factorial overflow guard
/// - `MethodOrderTooSmall`: named grids need at least two points
/// - `NonFiniteGridPoint`: a grid offset is NaN or infinite
/// - `SingularGrid`: repeated grid offsets make the linear system singular
/// - `CoefficientConversion`: an exact coefficient has no `f64` representation
/// - `InvalidConfig`: a configuration value is out of range
///
/// # Examples
/// ```
/// use fdm_core::types::FdmError;
///
/// let err = FdmError::DerivativeOrderTooHigh { p: 3, q: 3 };
/// assert!(format!("{}", err).contains("strictly greater"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FdmError {
    /// Order of the method does not exceed the order of the derivative.
    #[error(
        "order of the method ({p}) must be strictly greater than that of the derivative ({q})"
    )]
    DerivativeOrderTooHigh {
        /// Order of the method (number of grid points)
        p: usize,
        /// Order of the derivative
        q: usize,
    },

    /// Order of the method is too large for the coefficients to be computed.
    #[error("order of the method ({p}) is too large to be computed: maximum is {max}")]
    MethodOrderTooLarge {
        /// Requested order of the method
        p: usize,
        /// Largest supported order
        max: usize,
    },

    /// Named grid families need at least two points.
    #[error("order of the method ({p}) must be at least 2")]
    MethodOrderTooSmall {
        /// Requested order of the method
        p: usize,
    },

    /// A grid offset is NaN or infinite.
    #[error("grid point {index} is not finite: {value}")]
    NonFiniteGridPoint {
        /// Position of the offending point in the grid
        index: usize,
        /// The offending value
        value: f64,
    },

    /// Grid points are not distinct, so no unique coefficients exist.
    #[error("grid points must be distinct: {value} appears more than once")]
    SingularGrid {
        /// A repeated grid value
        value: f64,
    },

    /// An exact rational coefficient could not be converted to `f64`.
    #[error("coefficient {index} cannot be represented as f64")]
    CoefficientConversion {
        /// Position of the coefficient
        index: usize,
    },

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derivative_order_display() {
        let err = FdmError::DerivativeOrderTooHigh { p: 2, q: 5 };
        assert_eq!(
            format!("{}", err),
            "order of the method (2) must be strictly greater than that of the derivative (5)"
        );
    }

    #[test]
    fn test_method_order_display() {
        let err = FdmError::MethodOrderTooLarge { p: 21, max: 20 };
        let msg = format!("{}", err);
        assert!(msg.contains("21"));
        assert!(msg.contains("maximum is 20"));
    }

    #[test]
    fn test_singular_grid_display() {
        let err = FdmError::SingularGrid { value: 1.5 };
        assert!(format!("{}", err).contains("1.5"));
    }

    #[test]
    fn test_invalid_config_display() {
        let err = FdmError::InvalidConfig("factor must be positive".to_string());
        assert_eq!(
            format!("{}", err),
            "Invalid configuration: factor must be positive"
        );
    }

    #[test]
    fn test_errors_are_distinct() {
        let a = FdmError::DerivativeOrderTooHigh { p: 21, q: 21 };
        let b = FdmError::MethodOrderTooLarge { p: 21, max: 20 };
        assert_ne!(a, b);
    }
}
