//! CLI error types.

use fdm_core::FdmError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by `fdm` commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Method construction or numeric configuration failed.
    #[error("finite-difference error: {0}")]
    Fdm(#[from] FdmError),

    /// A command-line argument is out of range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;
