//! Coefs command implementation
//!
//! Prints the exact and floating-point weights for a grid.

use fdm_core::math::coefficients::{solve_coefficients, solve_coefficients_exact};
use tracing::info;

use crate::Result;

/// One grid point and its weight.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientRow {
    /// Grid offset
    pub offset: f64,
    /// Weight as an exact fraction
    pub exact: String,
    /// Weight rounded to `f64`
    pub value: f64,
}

/// Solve the weights of the `order`-th derivative on `grid`.
pub fn compute(grid: &[f64], order: usize) -> Result<Vec<CoefficientRow>> {
    let exact = solve_coefficients_exact(grid, order)?;
    let values = solve_coefficients(grid, order)?;
    Ok(grid
        .iter()
        .zip(exact.iter().zip(values))
        .map(|(&offset, (exact, value))| CoefficientRow {
            offset,
            exact: exact.to_string(),
            value,
        })
        .collect())
}

/// Run the coefs command
pub fn run(grid: &[f64], order: usize) -> Result<()> {
    info!(p = grid.len(), q = order, "Solving coefficients");
    let rows = compute(grid, order)?;

    println!("{:>10}  {:>24}  {:>24}", "offset", "exact", "f64");
    for row in &rows {
        println!("{:>10}  {:>24}  {:>24e}", row.offset, row.exact, row.value);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;

    #[test]
    fn test_compute_central_first_derivative() {
        let rows = compute(&[-2.0, -1.0, 0.0, 1.0, 2.0], 1).unwrap();
        let exact: Vec<&str> = rows.iter().map(|r| r.exact.as_str()).collect();
        assert_eq!(exact, vec!["1/12", "-2/3", "0", "2/3", "-1/12"]);
        assert_eq!(rows[3].value, 2.0 / 3.0);
        assert_eq!(rows[0].offset, -2.0);
    }

    #[test]
    fn test_compute_rejects_bad_order() {
        let err = compute(&[0.0, 1.0], 2).unwrap_err();
        assert!(matches!(err, CliError::Fdm(_)));
    }
}
