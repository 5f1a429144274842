//! Thread-safe cache of solved finite-difference weights.
//!
//! Coefficients depend only on `(grid, q)`, never on the function or the
//! evaluation point, so entries are never invalidated. A process-wide cache
//! is available through [`CoefficientCache::global`]; independent caches can
//! be created and injected for isolation in tests.
//!
//! # Caching Strategy
//!
//! - Double-check locking: concurrent misses for the same key solve the
//!   system, but only the first writer stores its result
//! - Entries are `Arc<[f64]>`, handed out without copying
//! - Readers only ever observe fully written entries
//!
//! # Example
//!
//! ```rust
//! use fdm_core::math::coefficients::CoefficientCache;
//!
//! let cache = CoefficientCache::new();
//!
//! let first = cache.get_or_solve(&[-1.0, 0.0, 1.0], 1).unwrap();
//! let second = cache.get_or_solve(&[-1.0, 0.0, 1.0], 1).unwrap();
//!
//! assert!(std::sync::Arc::ptr_eq(&first, &second));
//! assert_eq!(cache.len(), 1);
//! ```

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use super::solver::solve_coefficients;
use crate::types::FdmError;

/// Cache key: grid offsets by bit pattern plus the derivative order.
///
/// Bit patterns make `-0.0` and `0.0` distinct keys; both solve to the same
/// weights, so this only costs a duplicate entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CoefficientKey {
    grid: Vec<u64>,
    q: usize,
}

impl CoefficientKey {
    /// Build the key for `(grid, q)`.
    pub fn new(grid: &[f64], q: usize) -> Self {
        Self {
            grid: grid.iter().map(|g| g.to_bits()).collect(),
            q,
        }
    }

    /// Order of the derivative.
    pub fn derivative_order(&self) -> usize {
        self.q
    }

    /// Number of grid points.
    pub fn order(&self) -> usize {
        self.grid.len()
    }
}

/// Thread-safe map from `(grid, q)` to solved coefficients.
#[derive(Debug, Default)]
pub struct CoefficientCache {
    entries: RwLock<HashMap<CoefficientKey, Arc<[f64]>>>,
}

impl CoefficientCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// The process-wide cache used by default constructors.
    pub fn global() -> &'static CoefficientCache {
        static GLOBAL: OnceLock<CoefficientCache> = OnceLock::new();
        GLOBAL.get_or_init(CoefficientCache::new)
    }

    /// Retrieves or solves the coefficients for `(grid, q)`.
    ///
    /// 1. Read lock, return a hit
    /// 2. On a miss, solve outside any lock
    /// 3. Write lock; if another thread stored the key meanwhile, return its
    ///    entry, otherwise store ours
    ///
    /// # Errors
    ///
    /// Propagates [`solve_coefficients`] errors; failures are not cached.
    pub fn get_or_solve(&self, grid: &[f64], q: usize) -> Result<Arc<[f64]>, FdmError> {
        let key = CoefficientKey::new(grid, q);

        // Fast path: read lock check
        if let Some(coefs) = self.lookup(&key) {
            return Ok(coefs);
        }

        tracing::debug!(p = grid.len(), q, "solving finite-difference coefficients");
        let solved: Arc<[f64]> = solve_coefficients(grid, q)?.into();

        // Slow path: write lock with double-check
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let coefs = entries.entry(key).or_insert(solved);
        Ok(Arc::clone(coefs))
    }

    /// Cached coefficients for `(grid, q)`, if present.
    pub fn get(&self, grid: &[f64], q: usize) -> Option<Arc<[f64]>> {
        self.lookup(&CoefficientKey::new(grid, q))
    }

    /// Whether `(grid, q)` has been solved and stored.
    pub fn contains(&self, grid: &[f64], q: usize) -> bool {
        self.get(grid, q).is_some()
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every entry. Coefficients already handed out stay valid.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn lookup(&self, key: &CoefficientKey) -> Option<Arc<[f64]>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .map(Arc::clone)
    }
}
