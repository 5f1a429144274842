//! # fdm_core: Finite-Difference Derivatives
//!
//! Numerical derivatives of functions of one real variable, with scalar or
//! vector output, by weighted finite differences:
//! - Exact rational weights for arbitrary grids (`math::coefficients`)
//! - Round-off and magnitude estimation (`math::estimators`)
//! - Methods with fixed or optimal step sizes (`methods`)
//! - Recursive adaptive bounds for named forward, central and backward
//!   families (`methods::named`)
//! - Richardson extrapolation over the step size (`extrapolation`)
//!
//! ## Dependencies
//!
//! - num-traits: Generic floating-point arithmetic
//! - num-bigint / num-rational: Exact coefficient solves
//! - thiserror: Error types
//! - tracing: Diagnostics
//! - serde: Serialisation of configuration types (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use fdm_core::extrapolation::{extrapolate_fdm, ExtrapolationConfig};
//! use fdm_core::methods::{central_fdm, FiniteDifferenceMethod, StepConfig};
//!
//! let f = |x: f64| x.sin();
//!
//! // Five-point central method for the first derivative
//! let method = central_fdm(5, 1).unwrap();
//! let d = method.evaluate_auto(&f, 1.0);
//! assert!((d - 1.0_f64.cos()).abs() < 1e-12);
//!
//! // Step size and its error bound
//! let est = method.estimate_step(&f, 1.0, &StepConfig::default());
//! assert!(est.accuracy < 1e-10);
//!
//! // Custom grid
//! let method = FiniteDifferenceMethod::new(&[-1.0, 0.5, 2.0], 1).unwrap();
//! let d = method.evaluate(&|x: f64| x * x, 3.0, 1e-3);
//! assert!((d - 6.0).abs() < 1e-9);
//!
//! // Richardson extrapolation
//! let method = central_fdm(3, 2).unwrap();
//! let r = extrapolate_fdm(&method, &f, 1.0, None, &ExtrapolationConfig::default()).unwrap();
//! assert!((r.value + 1.0_f64.sin()).abs() < 1e-8);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `Direction`, `NamedConfig`,
//!   `StepConfig`, `StepEstimate` and `ExtrapolationConfig`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod extrapolation;
pub mod math;
pub mod methods;
pub mod traits;
pub mod types;

pub use extrapolation::{extrapolate_fdm, Extrapolation, ExtrapolationConfig};
pub use methods::{
    backward_fdm, central_fdm, forward_fdm, named_fdm, Direction, FiniteDifferenceMethod,
    NamedConfig, StepConfig, StepEstimate,
};
pub use types::FdmError;
