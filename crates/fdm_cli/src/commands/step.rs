//! Step command implementation
//!
//! Reports the step size chosen for a function, point and method.

use fdm_core::StepEstimate;
use tracing::info;

use super::MethodArgs;
use crate::config::CliConfig;
use crate::Result;

/// Estimate the optimal step.
pub fn compute(args: &MethodArgs, config: &CliConfig) -> Result<StepEstimate<f64>> {
    let method = args.build_method(config)?;
    let function = args.function;
    Ok(method.estimate_step(&|x: f64| function.eval(x), args.x, &config.step_config()))
}

/// Run the step command
pub fn run(args: &MethodArgs, config: &CliConfig) -> Result<()> {
    info!(
        function = %args.function,
        x = args.x,
        direction = %args.direction,
        p = args.p,
        q = args.q,
        "Estimating step size"
    );
    let estimate = compute(args, config)?;
    println!("step      {:e}", estimate.step);
    println!("accuracy  {:e}", estimate.accuracy);
    Ok(())
}
