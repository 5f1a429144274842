//! Finite-difference methods and step-size selection.
//!
//! - [`FiniteDifferenceMethod`]: grid, derivative order and weights, evaluated
//!   at a fixed or automatically chosen step
//! - [`BoundEstimator`]: bound on the first unresolved derivative
//! - [`StepConfig`] / [`StepEstimate`]: closed-form step optimisation
//! - [`named_fdm`] and friends: forward, central and backward families with
//!   recursive adaptive bounds

pub mod bound;
pub mod method;
pub mod named;
pub mod step;

pub use bound::{BoundEstimator, DEFAULT_CONDITION};
pub use method::{CoefficientSource, FiniteDifferenceMethod, MethodBuilder};
pub use named::{
    backward_fdm, central_fdm, forward_fdm, named_fdm, named_fdm_with_source, Direction,
    NamedConfig,
};
pub use step::{StepConfig, StepEstimate};
