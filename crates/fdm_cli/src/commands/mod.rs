//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod coefs;
pub mod derive;
pub mod step;

use clap::Args;
use fdm_core::{named_fdm, Direction, FiniteDifferenceMethod};

use crate::config::CliConfig;
use crate::functions::Function;
use crate::Result;

/// Arguments selecting a function, a point and a named method.
#[derive(Args, Debug, Clone)]
pub struct MethodArgs {
    /// Function to differentiate (sin, cos, exp, ln, sqrt, tanh, atan)
    #[arg(short, long)]
    pub function: Function,

    /// Evaluation point
    #[arg(short, long, allow_negative_numbers = true)]
    pub x: f64,

    /// Grid family (forward, central, backward)
    #[arg(short, long, default_value = "central")]
    pub direction: Direction,

    /// Order of the method (number of grid points)
    #[arg(short, long, default_value = "5")]
    pub p: usize,

    /// Order of the derivative
    #[arg(short, long, default_value = "1")]
    pub q: usize,
}

impl MethodArgs {
    /// Build the method described by these arguments.
    pub fn build_method(&self, config: &CliConfig) -> Result<FiniteDifferenceMethod> {
        self.function.check_domain(self.x)?;
        Ok(named_fdm(
            self.direction,
            self.p,
            self.q,
            &config.named_config(),
        )?)
    }
}
