//! Richardson extrapolation of finite-difference estimates over the step size.
//!
//! A method's estimate at step `h` has an error expansion in powers of `h`
//! (even powers only for symmetric methods). Evaluating at a contracting
//! sequence of steps and eliminating successive error terms typically
//! recovers several more digits than the best single step.
//!
//! - [`ExtrapolationConfig`]: tolerances, contraction and evaluation cap
//! - [`Extrapolator`]: the extrapolation primitive, with
//!   [`RichardsonExtrapolator`] as the built-in implementation
//! - [`extrapolate_fdm`]: drive a [`FiniteDifferenceMethod`] through it
//!
//! [`FiniteDifferenceMethod`]: crate::methods::FiniteDifferenceMethod

pub mod config;
pub mod driver;
pub mod richardson;

pub use config::{ExtrapolationConfig, DEFAULT_CONTRACT, DEFAULT_MAX_EVALUATIONS};
pub use driver::{default_power, extrapolate_fdm, extrapolate_fdm_with};
pub use richardson::{Extrapolation, Extrapolator, RichardsonExtrapolator};
