//! Richardson extrapolation of finite-difference estimates.

use super::config::ExtrapolationConfig;
use super::richardson::{Extrapolation, Extrapolator, RichardsonExtrapolator};
use crate::math::estimators::perturbation;
use crate::methods::FiniteDifferenceMethod;
use crate::traits::FunctionOutput;
use crate::types::FdmError;
use num_traits::Float;

/// Extrapolate `h -> method.evaluate(f, x, h)` to `h = 0` with
/// [`RichardsonExtrapolator`].
///
/// `h0` defaults to `0.1 * max(|x|, 1)`. When `config.power` is `None` the
/// power is 2 for symmetric methods and 1 otherwise.
///
/// # Errors
///
/// - `FdmError::InvalidConfig` from [`ExtrapolationConfig::validate`]
/// - `FdmError::InvalidConfig` if `h0` is zero or not finite
///
/// # Example
///
/// ```
/// use fdm_core::extrapolation::{extrapolate_fdm, ExtrapolationConfig};
/// use fdm_core::methods::central_fdm;
///
/// let method = central_fdm(3, 1).unwrap();
/// let result = extrapolate_fdm(
///     &method,
///     &|x: f64| x.sin(),
///     1.0,
///     None,
///     &ExtrapolationConfig::default(),
/// )
/// .unwrap();
/// assert!((result.value - 1.0_f64.cos()).abs() < 1e-10);
/// ```
pub fn extrapolate_fdm<T, V, F>(
    method: &FiniteDifferenceMethod,
    f: &F,
    x: T,
    h0: Option<T>,
    config: &ExtrapolationConfig,
) -> Result<Extrapolation<T, V>, FdmError>
where
    T: Float,
    V: FunctionOutput<T>,
    F: Fn(T) -> V + ?Sized,
{
    let extrapolator = RichardsonExtrapolator::new(*config)?;
    extrapolate_fdm_with(&extrapolator, method, f, x, h0, config.power)
}

/// [`extrapolate_fdm`] with any [`Extrapolator`].
///
/// The extrapolator's result is returned unchanged.
///
/// # Errors
///
/// `FdmError::InvalidConfig` if `h0` is zero or not finite, or `power` is
/// `Some(0)`.
pub fn extrapolate_fdm_with<E, T, V, F>(
    extrapolator: &E,
    method: &FiniteDifferenceMethod,
    f: &F,
    x: T,
    h0: Option<T>,
    power: Option<u32>,
) -> Result<Extrapolation<T, V>, FdmError>
where
    E: Extrapolator,
    T: Float,
    V: FunctionOutput<T>,
    F: Fn(T) -> V + ?Sized,
{
    let h0 = h0.unwrap_or_else(|| perturbation(x));
    if !(h0.is_finite() && h0 != T::zero()) {
        return Err(FdmError::InvalidConfig(
            "initial step must be finite and non-zero".to_string(),
        ));
    }
    if power == Some(0) {
        return Err(FdmError::InvalidConfig(
            "power must be at least 1".to_string(),
        ));
    }
    let power = power.unwrap_or_else(|| default_power(method));

    tracing::debug!(
        p = method.order(),
        q = method.derivative_order(),
        power,
        "extrapolating finite-difference estimate"
    );
    Ok(extrapolator.extrapolate(&|h: T| method.evaluate(f, x, h), h0, power))
}

/// Leading error power of `method`: 2 if symmetric, 1 otherwise.
pub fn default_power(method: &FiniteDifferenceMethod) -> u32 {
    if method.is_symmetric() {
        2
    } else {
        1
    }
}
