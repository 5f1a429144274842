//! Canonical evaluation grids for named finite-difference families.
//!
//! A grid lists the multiples of the step size `h` at which the function is
//! sampled. All canonical grids are integer-valued and sorted ascending.

use crate::types::FdmError;

/// Forward grid `0, 1, ..., p-1`.
///
/// # Errors
///
/// `FdmError::MethodOrderTooSmall` if `p < 2`.
///
/// # Example
///
/// ```
/// use fdm_core::math::grids::forward_grid;
///
/// assert_eq!(forward_grid(3).unwrap(), vec![0.0, 1.0, 2.0]);
/// ```
pub fn forward_grid(p: usize) -> Result<Vec<f64>, FdmError> {
    check_order(p)?;
    Ok((0..p).map(|i| i as f64).collect())
}

/// Backward grid `1-p, ..., -1, 0`.
///
/// # Errors
///
/// `FdmError::MethodOrderTooSmall` if `p < 2`.
pub fn backward_grid(p: usize) -> Result<Vec<f64>, FdmError> {
    check_order(p)?;
    Ok((0..p).map(|i| i as f64 - (p - 1) as f64).collect())
}

/// Central grid.
///
/// Odd `p` gives `-(p-1)/2, ..., (p-1)/2`; even `p` skips the centre and
/// gives `-p/2, ..., -1, 1, ..., p/2`.
///
/// # Errors
///
/// `FdmError::MethodOrderTooSmall` if `p < 2`.
///
/// # Example
///
/// ```
/// use fdm_core::math::grids::central_grid;
///
/// assert_eq!(central_grid(3).unwrap(), vec![-1.0, 0.0, 1.0]);
/// assert_eq!(central_grid(4).unwrap(), vec![-2.0, -1.0, 1.0, 2.0]);
/// ```
pub fn central_grid(p: usize) -> Result<Vec<f64>, FdmError> {
    check_order(p)?;
    let half = (p / 2) as i64;
    let grid = if p % 2 == 1 {
        (-half..=half).map(|i| i as f64).collect()
    } else {
        (-half..=-1).chain(1..=half).map(|i| i as f64).collect()
    };
    Ok(grid)
}

/// Geometrically spaced grid with base 3, see [`geometric_grid_with_base`].
pub fn geometric_grid(grid: &[f64]) -> Vec<f64> {
    geometric_grid_with_base(grid, 3)
}

/// Warp an integer grid so that points spread out geometrically.
///
/// Each offset `g` maps to `sign(g) * floor(base^|g| / base)`, so
/// `0, 1, 2, 3` become `0, 1, 3, 9` for base 3. Offsets are rounded to the
/// nearest integer first.
pub fn geometric_grid_with_base(grid: &[f64], base: u32) -> Vec<f64> {
    let base = u64::from(base.max(2));
    grid.iter()
        .map(|&g| {
            let exponent = g.abs().round() as u32;
            let magnitude = base.saturating_pow(exponent) / base;
            g.signum() * magnitude as f64
        })
        .map(|g| if g == 0.0 { 0.0 } else { g })
        .collect()
}

fn check_order(p: usize) -> Result<(), FdmError> {
    if p < 2 {
        return Err(FdmError::MethodOrderTooSmall { p });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_grid() {
        assert_eq!(forward_grid(2).unwrap(), vec![0.0, 1.0]);
        assert_eq!(forward_grid(5).unwrap(), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_backward_grid() {
        assert_eq!(backward_grid(2).unwrap(), vec![-1.0, 0.0]);
        assert_eq!(backward_grid(4).unwrap(), vec![-3.0, -2.0, -1.0, 0.0]);
    }

    #[test]
    fn test_central_grid_odd() {
        assert_eq!(
            central_grid(5).unwrap(),
            vec![-2.0, -1.0, 0.0, 1.0, 2.0]
        );
    }

    #[test]
    fn test_central_grid_even() {
        assert_eq!(central_grid(2).unwrap(), vec![-1.0, 1.0]);
        assert_eq!(
            central_grid(6).unwrap(),
            vec![-3.0, -2.0, -1.0, 1.0, 2.0, 3.0]
        );
    }

    #[test]
    fn test_grid_lengths() {
        for p in 2..=20 {
            assert_eq!(forward_grid(p).unwrap().len(), p);
            assert_eq!(backward_grid(p).unwrap().len(), p);
            assert_eq!(central_grid(p).unwrap().len(), p);
        }
    }

    #[test]
    fn test_order_too_small() {
        assert_eq!(
            forward_grid(1),
            Err(FdmError::MethodOrderTooSmall { p: 1 })
        );
        assert!(central_grid(0).is_err());
        assert!(backward_grid(1).is_err());
    }

    #[test]
    fn test_geometric_grid() {
        let grid = central_grid(5).unwrap();
        assert_eq!(geometric_grid(&grid), vec![-3.0, -1.0, 0.0, 1.0, 3.0]);

        let grid = forward_grid(4).unwrap();
        assert_eq!(geometric_grid(&grid), vec![0.0, 1.0, 3.0, 9.0]);
    }

    #[test]
    fn test_geometric_grid_base_two() {
        let grid = forward_grid(4).unwrap();
        assert_eq!(
            geometric_grid_with_base(&grid, 2),
            vec![0.0, 1.0, 2.0, 4.0]
        );
    }
}
