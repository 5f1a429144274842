//! Derive command implementation
//!
//! Estimates a derivative of a built-in function at a point, with a fixed
//! step, the optimal step, or Richardson extrapolation.

use fdm_core::extrapolate_fdm;
use tracing::info;

use super::MethodArgs;
use crate::config::CliConfig;
use crate::{CliError, Result};

/// How the step size was handled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    /// Caller-supplied step.
    Fixed { step: f64 },
    /// Optimal step and its error bound.
    Auto { step: f64, accuracy: f64 },
    /// Richardson extrapolation over the step.
    Extrapolated { error: f64, evaluations: usize },
}

/// Result of the derive command.
#[derive(Debug, Clone, PartialEq)]
pub struct DeriveReport {
    /// Derivative estimate
    pub estimate: f64,
    /// Step handling and its diagnostics
    pub mode: Mode,
    /// Closed-form value, where tabulated
    pub exact: Option<f64>,
}

/// Estimate the derivative described by `args`.
pub fn compute(
    args: &MethodArgs,
    step: Option<f64>,
    extrapolate: bool,
    config: &CliConfig,
) -> Result<DeriveReport> {
    let method = args.build_method(config)?;
    let function = args.function;
    let f = |x: f64| function.eval(x);

    let (estimate, mode) = match (step, extrapolate) {
        (Some(_), true) => {
            return Err(CliError::InvalidArgument(
                "--step and --extrapolate are mutually exclusive".to_string(),
            ));
        }
        (Some(step), false) => {
            if !(step.is_finite() && step > 0.0) {
                return Err(CliError::InvalidArgument(format!(
                    "step must be positive, got {}",
                    step
                )));
            }
            (method.evaluate(&f, args.x, step), Mode::Fixed { step })
        }
        (None, true) => {
            let result = extrapolate_fdm(&method, &f, args.x, None, &config.extrapolation)?;
            let mode = Mode::Extrapolated {
                error: result.error,
                evaluations: result.evaluations,
            };
            (result.value, mode)
        }
        (None, false) => {
            let est = method.estimate_step(&f, args.x, &config.step_config());
            let mode = Mode::Auto {
                step: est.step,
                accuracy: est.accuracy,
            };
            let estimate = if args.q == 0 {
                f(args.x)
            } else {
                method.evaluate(&f, args.x, est.step)
            };
            (estimate, mode)
        }
    };

    Ok(DeriveReport {
        estimate,
        mode,
        exact: function.exact_derivative(args.x, args.q),
    })
}

/// Run the derive command
pub fn run(
    args: &MethodArgs,
    step: Option<f64>,
    extrapolate: bool,
    config: &CliConfig,
) -> Result<()> {
    info!(
        function = %args.function,
        x = args.x,
        direction = %args.direction,
        p = args.p,
        q = args.q,
        "Estimating derivative"
    );
    let report = compute(args, step, extrapolate, config)?;

    println!("estimate     {:.17e}", report.estimate);
    match report.mode {
        Mode::Fixed { step } => println!("step         {:e}", step),
        Mode::Auto { step, accuracy } => {
            println!("step         {:e}", step);
            println!("accuracy     {:e}", accuracy);
        }
        Mode::Extrapolated { error, evaluations } => {
            println!("error        {:e}", error);
            println!("evaluations  {}", evaluations);
        }
    }
    if let Some(exact) = report.exact {
        println!("exact        {:.17e}", exact);
        println!("abs. error   {:e}", (report.estimate - exact).abs());
    }
    Ok(())
}
