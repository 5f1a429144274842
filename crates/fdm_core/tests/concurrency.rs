//! Concurrent construction yields bit-identical coefficients.

use std::sync::Arc;

use fdm_core::math::coefficients::{solve_coefficients, CoefficientCache};
use fdm_core::math::grids::central_grid;
use fdm_core::methods::{central_fdm, FiniteDifferenceMethod};
use rayon::prelude::*;

fn bits(coefs: &[f64]) -> Vec<u64> {
    coefs.iter().map(|c| c.to_bits()).collect()
}

#[test]
fn test_parallel_named_construction_is_idempotent() {
    let reference = bits(central_fdm(7, 2).unwrap().coefs());
    let all: Vec<Vec<u64>> = (0..64)
        .into_par_iter()
        .map(|_| bits(central_fdm(7, 2).unwrap().coefs()))
        .collect();
    assert!(all.iter().all(|b| *b == reference));
}

#[test]
fn test_parallel_injected_cache_single_entry_per_key() {
    let cache = CoefficientCache::new();
    let grids: Vec<Vec<f64>> = (3..=9).map(|p| central_grid(p).unwrap()).collect();

    let methods: Vec<FiniteDifferenceMethod> = (0..128)
        .into_par_iter()
        .map(|i| {
            let grid = &grids[i % grids.len()];
            FiniteDifferenceMethod::builder(grid, 1)
                .cache(&cache)
                .build()
                .unwrap()
        })
        .collect();

    assert_eq!(cache.len(), grids.len());
    for method in &methods {
        let direct = solve_coefficients(method.grid(), 1).unwrap();
        assert_eq!(bits(method.coefs()), bits(&direct));
        let cached = cache.get(method.grid(), 1).unwrap();
        assert_eq!(bits(&cached), bits(method.coefs()));
    }
}

#[test]
fn test_parallel_evaluation_shares_method() {
    let method = Arc::new(central_fdm(5, 1).unwrap());
    let xs: Vec<f64> = (0..200).map(|i| -2.0 + i as f64 * 0.02).collect();
    let errors: Vec<f64> = xs
        .par_iter()
        .map(|&x| (method.evaluate_auto(&|t: f64| t.sin(), x) - x.cos()).abs())
        .collect();
    let max_error = errors.iter().cloned().fold(0.0_f64, f64::max);
    assert!(max_error < 1e-10, "max error {}", max_error);
}
