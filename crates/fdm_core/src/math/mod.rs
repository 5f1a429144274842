//! Numerical building blocks for finite differences.
//!
//! This module provides:
//! - `coefficients`: Exact weight computation and the coefficient cache
//! - `estimators`: Function magnitude and round-off noise estimates
//! - `grids`: Canonical forward, backward, central and geometric grids

pub mod coefficients;
pub mod estimators;
pub mod grids;
