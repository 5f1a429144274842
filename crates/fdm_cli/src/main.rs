//! fdm - Finite-Difference Derivatives from the Command Line
//!
//! Operational front end for the `fdm_core` library.
//!
//! # Commands
//!
//! - `fdm coefs --grid <list> --order <q>` - Print exact weights for a grid
//! - `fdm derive --function <name> --x <x>` - Estimate a derivative
//! - `fdm step --function <name> --x <x>` - Report the optimal step size
//!
//! # Configuration
//!
//! Settings are merged with priority CLI > environment (`FDM_*`) > TOML
//! file > defaults.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod functions;

use commands::MethodArgs;
use config::{build_config, CliArgs, LogLevel};
pub use error::{CliError, Result};

/// Finite-difference derivative estimation
#[derive(Parser)]
#[command(name = "fdm")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE", env = "FDM_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Condition number of the default bound estimator
    #[arg(long, global = true)]
    condition: Option<f64>,

    /// Levels of adaptive bound estimation
    #[arg(long, global = true)]
    adapt: Option<usize>,

    /// Round-off multiplier for step selection
    #[arg(long, global = true)]
    factor: Option<f64>,

    /// Use geometrically spaced grids
    #[arg(long, global = true, overrides_with = "no_geom")]
    geom: bool,

    /// Use uniformly spaced grids, even if the configuration enables `geom`
    #[arg(long, global = true, overrides_with = "geom")]
    no_geom: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the weights of a derivative on a grid
    Coefs {
        /// Comma-separated grid offsets, e.g. -2,-1,0,1,2
        #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        grid: Vec<f64>,

        /// Order of the derivative
        #[arg(short, long)]
        order: usize,
    },

    /// Estimate a derivative of a built-in function
    Derive {
        #[command(flatten)]
        method: MethodArgs,

        /// Use this step instead of the optimal one
        #[arg(short, long)]
        step: Option<f64>,

        /// Refine the estimate by Richardson extrapolation
        #[arg(short, long)]
        extrapolate: bool,
    },

    /// Report the optimal step size and its error bound
    Step {
        #[command(flatten)]
        method: MethodArgs,
    },
}

impl From<&Cli> for CliArgs {
    fn from(cli: &Cli) -> Self {
        CliArgs {
            config_file: cli.config.clone(),
            log_level: cli.log_level.clone(),
            condition: cli.condition,
            adapt: cli.adapt,
            factor: cli.factor,
            geom: match (cli.geom, cli.no_geom) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            },
        }
    }
}

/// `RUST_LOG` directives refine the configured level.
fn init_tracing(log_level: LogLevel) {
    let filter = EnvFilter::builder()
        .with_default_directive(log_level.filter().into())
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = build_config(&CliArgs::from(&cli))?;

    init_tracing(config.log_level);
    tracing::debug!(
        condition = config.condition,
        adapt = config.adapt,
        factor = config.factor,
        geom = config.geom,
        "Configuration loaded"
    );

    match &cli.command {
        Commands::Coefs { grid, order } => commands::coefs::run(grid, *order)?,
        Commands::Derive {
            method,
            step,
            extrapolate,
        } => commands::derive::run(method, *step, *extrapolate, &config)?,
        Commands::Step { method } => commands::step::run(method, &config)?,
    }
    Ok(())
}
