//! Exact finite-difference weights by rational Gauss-Jordan elimination.

use crate::types::FdmError;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, ToPrimitive, Zero};

/// Largest supported order of a method (number of grid points).
///
/// Beyond this `p!` and `grid^p` in the step-size bound outgrow `f64`.
pub const MAX_METHOD_ORDER: usize = 20;

/// Check that a method with `p` grid points can estimate the `q`-th derivative.
///
/// # Errors
///
/// - `FdmError::DerivativeOrderTooHigh` if `q >= p`
/// - `FdmError::MethodOrderTooLarge` if `p > MAX_METHOD_ORDER`
pub fn check_orders(p: usize, q: usize) -> Result<(), FdmError> {
    if q >= p {
        return Err(FdmError::DerivativeOrderTooHigh { p, q });
    }
    if p > MAX_METHOD_ORDER {
        return Err(FdmError::MethodOrderTooLarge {
            p,
            max: MAX_METHOD_ORDER,
        });
    }
    Ok(())
}

/// Compute the weights of the `q`-th derivative on `grid`.
///
/// Solves `C · coefs = q! e_q` with `C[i][k] = grid[k]^i` for `i < p`, so
/// that for every monomial `x^k` with `k < p`
///
/// ```text
/// Σ coefs[i] * grid[i]^k = (k == q) ? k! : 0
/// ```
///
/// The system is solved in exact big-integer rational arithmetic; grid
/// offsets are converted from `f64` without rounding and only the final
/// weights are rounded to `f64`.
///
/// # Errors
///
/// - Order errors from [`check_orders`], raised before any arithmetic
/// - `FdmError::NonFiniteGridPoint` for NaN or infinite offsets
/// - `FdmError::SingularGrid` if two offsets coincide
///
/// # Example
///
/// ```
/// use fdm_core::math::coefficients::solve_coefficients;
///
/// let coefs = solve_coefficients(&[-1.0, 0.0, 1.0], 1).unwrap();
/// assert_eq!(coefs, vec![-0.5, 0.0, 0.5]);
/// ```
pub fn solve_coefficients(grid: &[f64], q: usize) -> Result<Vec<f64>, FdmError> {
    solve_coefficients_exact(grid, q)?
        .iter()
        .enumerate()
        .map(|(index, c)| {
            c.to_f64()
                .filter(|v| v.is_finite())
                .ok_or(FdmError::CoefficientConversion { index })
        })
        .collect()
}

/// Exact rational weights, see [`solve_coefficients`].
pub fn solve_coefficients_exact(grid: &[f64], q: usize) -> Result<Vec<BigRational>, FdmError> {
    let p = grid.len();
    check_orders(p, q)?;

    let points = grid
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            BigRational::from_float(value).ok_or(FdmError::NonFiniteGridPoint { index, value })
        })
        .collect::<Result<Vec<_>, _>>()?;
    check_distinct(grid, &points)?;

    // Augmented power/grid matrix [C | q! e_q].
    let mut rows: Vec<Vec<BigRational>> = (0..p)
        .map(|i| {
            let mut row: Vec<BigRational> = points
                .iter()
                .map(|g| num_traits::pow(g.clone(), i))
                .collect();
            row.push(if i == q {
                factorial(q)
            } else {
                BigRational::zero()
            });
            row
        })
        .collect();

    for col in 0..p {
        let pivot = (col..p)
            .find(|&r| !rows[r][col].is_zero())
            .ok_or(FdmError::SingularGrid { value: grid[col] })?;
        rows.swap(col, pivot);

        let inv = rows[col][col].recip();
        for v in rows[col].iter_mut().skip(col) {
            *v = &*v * &inv;
        }

        let pivot_row = rows[col].clone();
        for (r, row) in rows.iter_mut().enumerate() {
            if r == col || row[col].is_zero() {
                continue;
            }
            let scale = row[col].clone();
            for (v, pv) in row.iter_mut().zip(pivot_row.iter()).skip(col) {
                *v -= &scale * pv;
            }
        }
    }

    Ok(rows.into_iter().map(|mut row| row.swap_remove(p)).collect())
}

/// `n!` as an exact rational.
fn factorial(n: usize) -> BigRational {
    let value = (2..=n).fold(BigInt::one(), |acc, k| acc * BigInt::from(k));
    BigRational::from_integer(value)
}

fn check_distinct(grid: &[f64], points: &[BigRational]) -> Result<(), FdmError> {
    for (i, a) in points.iter().enumerate() {
        if points[..i].iter().any(|b| b == a) {
            return Err(FdmError::SingularGrid { value: grid[i] });
        }
    }
    Ok(())
}
