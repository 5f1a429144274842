//! CLI configuration management
//!
//! Handles loading configuration from environment variables, TOML files, and
//! command-line arguments.
//!
//! # Example file
//!
//! ```toml
//! log_level = "debug"
//! condition = 50.0
//! adapt = 2
//! factor = 1.0
//! geom = false
//!
//! [extrapolation]
//! contract = 0.125
//! breaktol = 2.0
//! max_evaluations = 20
//! ```

use std::path::PathBuf;
use std::str::FromStr;

use fdm_core::{ExtrapolationConfig, NamedConfig, StepConfig};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown log level '{0}', expected one of {names}", names = LogLevel::NAMES.join(", "))]
    UnknownLogLevel(String),

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Verbosity of the diagnostics written to stderr, quietest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    const ALL: [LogLevel; 6] = [
        LogLevel::Off,
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
    ];

    /// Accepted names, indexed by variant
    pub const NAMES: [&'static str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

    /// Name used in config files and `FDM_LOG_LEVEL`
    pub fn name(self) -> &'static str {
        Self::NAMES[self as usize]
    }

    /// Default directive for the tracing subscriber
    pub fn filter(self) -> LevelFilter {
        match self {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| ConfigError::UnknownLogLevel(s.to_string()))
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Settings shared by every command
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Condition number of the default bound estimator
    pub condition: f64,
    /// Levels of adaptive bound estimation for named methods
    pub adapt: usize,
    /// Round-off multiplier for step selection
    pub factor: f64,
    /// Use geometrically spaced grids
    pub geom: bool,
    /// Richardson extrapolation settings
    pub extrapolation: ExtrapolationConfig,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for CliConfig {
    fn default() -> Self {
        let named = NamedConfig::default();
        Self {
            log_level: LogLevel::default(),
            condition: named.condition,
            adapt: named.adapt,
            factor: 1.0,
            geom: named.geom,
            extrapolation: ExtrapolationConfig::default(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: CliConfig = toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Override fields for which `lookup` yields an `FDM_*` value
    fn apply_env<L>(&mut self, lookup: &L) -> Result<(), ConfigError>
    where
        L: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("FDM_LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&level)?;
        }
        if let Some(value) = lookup("FDM_CONDITION") {
            self.condition = parse_env("FDM_CONDITION", &value)?;
        }
        if let Some(value) = lookup("FDM_ADAPT") {
            self.adapt = parse_env("FDM_ADAPT", &value)?;
        }
        if let Some(value) = lookup("FDM_FACTOR") {
            self.factor = parse_env("FDM_FACTOR", &value)?;
        }
        if let Some(value) = lookup("FDM_GEOM") {
            self.geom = value.to_lowercase() == "true";
        }
        if let Some(value) = lookup("FDM_BREAKTOL") {
            self.extrapolation.breaktol = parse_env("FDM_BREAKTOL", &value)?;
        }
        if let Some(value) = lookup("FDM_MAX_EVALUATIONS") {
            self.extrapolation.max_evaluations = parse_env("FDM_MAX_EVALUATIONS", &value)?;
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.named_config()
            .validate()
            .map_err(|e| invalid("condition", e))?;
        self.step_config()
            .validate()
            .map_err(|e| invalid("factor", e))?;
        self.extrapolation
            .validate()
            .map_err(|e| invalid("extrapolation", e))?;
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(log_level) = &cli.log_level {
            self.log_level = LogLevel::from_str(log_level)?;
        }
        if let Some(condition) = cli.condition {
            self.condition = condition;
        }
        if let Some(adapt) = cli.adapt {
            self.adapt = adapt;
        }
        if let Some(factor) = cli.factor {
            self.factor = factor;
        }
        if let Some(geom) = cli.geom {
            self.geom = geom;
        }
        Ok(())
    }

    /// Options for named method construction
    pub fn named_config(&self) -> NamedConfig {
        NamedConfig::default()
            .with_adapt(self.adapt)
            .with_condition(self.condition)
            .with_geom(self.geom)
    }

    /// Options for step selection
    pub fn step_config(&self) -> StepConfig<f64> {
        StepConfig::default().with_factor(self.factor)
    }
}

fn parse_env<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::EnvError(format!("{}={} is not a valid value", key, value)))
}

fn invalid(key: &'static str, err: fdm_core::FdmError) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        message: err.to_string(),
    }
}

/// CLI arguments relevant to configuration
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<String>,
    /// Condition number override
    pub condition: Option<f64>,
    /// Adaptation depth override
    pub adapt: Option<usize>,
    /// Round-off factor override
    pub factor: Option<f64>,
    /// Grid spacing override, `Some(false)` forces uniform grids
    pub geom: Option<bool>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<CliConfig, ConfigError> {
    build_config_with(cli, |key| std::env::var(key).ok())
}

/// [`build_config`] with an explicit environment lookup
pub fn build_config_with<L>(cli: &CliArgs, lookup: L) -> Result<CliConfig, ConfigError>
where
    L: Fn(&str) -> Option<String>,
{
    // Start with defaults or file config
    let mut config = if let Some(config_path) = &cli.config_file {
        CliConfig::from_file(config_path)?
    } else {
        CliConfig::default()
    };

    // Override with environment variables
    config.apply_env(&lookup)?;

    // Override with CLI arguments
    config.merge_with_cli(cli)?;

    // Final validation
    config.validate()?;

    Ok(config)
}
