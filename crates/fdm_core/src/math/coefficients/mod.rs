//! Finite-difference coefficients.
//!
//! Given a grid of offsets and a derivative order `q`, the coefficients are
//! the unique weights whose combination of grid samples reproduces the
//! `q`-th derivative of every polynomial of degree below the grid size.
//!
//! ## Exact Arithmetic
//!
//! The defining system is a transposed Vandermonde matrix, which becomes
//! severely ill-conditioned as the grid grows. [`solve_coefficients`] solves
//! it over big-integer rationals and rounds to `f64` only at the end.
//!
//! ## Caching
//!
//! [`CoefficientCache`] memoises solved weights by `(grid, q)` and is safe to
//! share between threads.
//!
//! ## Example
//!
//! ```
//! use fdm_core::math::coefficients::{solve_coefficients, CoefficientCache};
//!
//! let direct = solve_coefficients(&[-1.0, 0.0, 1.0], 2).unwrap();
//! let cached = CoefficientCache::new().get_or_solve(&[-1.0, 0.0, 1.0], 2).unwrap();
//! assert_eq!(direct.as_slice(), &*cached);
//! ```

mod cache;
mod solver;

pub use cache::{CoefficientCache, CoefficientKey};
pub use solver::{check_orders, solve_coefficients, solve_coefficients_exact, MAX_METHOD_ORDER};
