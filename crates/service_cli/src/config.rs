//! Pricer configuration management
//!
//! Handles loading configuration from environment variables, TOML files, and CLI arguments.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use pricer_core::types::{Market, PricingError};
use pricer_pricing::mc::{PartitionAxis, SimulationConfig};
use serde::Deserialize;
use thiserror::Error;

/// Rate override.
pub const ENV_RATE: &str = "BSM_RATE";
/// Path count override.
pub const ENV_N_PATHS: &str = "BSM_N_PATHS";
/// Worker count override.
pub const ENV_N_WORKERS: &str = "BSM_N_WORKERS";
/// Seed override.
pub const ENV_SEED: &str = "BSM_SEED";
/// Partition axis override.
pub const ENV_PARTITION: &str = "BSM_PARTITION";
/// Log level override.
pub const ENV_LOG_LEVEL: &str = "BSM_LOG_LEVEL";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Unknown log level name.
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// A setting that failed to parse or violates its range.
    #[error("Invalid value for {name}: {value}")]
    InvalidValue {
        /// Setting name.
        name: &'static str,
        /// Offending value with an explanation.
        value: String,
    },

    /// Unreadable or malformed TOML file.
    #[error("Configuration file error: {0}")]
    FileError(String),
}

/// Log levels accepted by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Everything, including per-chunk events.
    Trace,
    /// Seeds, chunk plans and timings.
    Debug,
    /// Command progress.
    #[default]
    Info,
    /// Worker failures.
    Warn,
    /// Errors only.
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Pricing configuration shared by every subcommand
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PricerConfig {
    /// Continuously compounded risk-free rate
    pub rate: f64,
    /// Monte Carlo paths per instrument
    pub n_paths: usize,
    /// Parallel worker count (logical CPUs when unset)
    pub n_workers: Option<usize>,
    /// Run seed (fresh per run when unset)
    pub seed: Option<u64>,
    /// Parallel partition axis
    #[serde(deserialize_with = "deserialize_partition")]
    pub partition: PartitionAxis,
    /// Log level
    pub log_level: LogLevel,
}

fn deserialize_partition<'de, D>(deserializer: D) -> Result<PartitionAxis, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    PartitionAxis::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for PricerConfig {
    fn default() -> Self {
        Self {
            rate: 0.01,
            n_paths: 100_000,
            n_workers: None,
            seed: None,
            partition: PartitionAxis::Paths,
            log_level: LogLevel::Info,
        }
    }
}

fn parse_env<T: FromStr>(name: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name,
        value: format!("'{}' from environment", raw),
    })
}

impl PricerConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: PricerConfig = toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `BSM_*` overrides read through `lookup`.
    ///
    /// `lookup` is `std::env::var` in production; tests pass a map.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_RATE) {
            self.rate = parse_env("rate", &raw)?;
        }
        if let Some(raw) = lookup(ENV_N_PATHS) {
            self.n_paths = parse_env("n_paths", &raw)?;
        }
        if let Some(raw) = lookup(ENV_N_WORKERS) {
            self.n_workers = Some(parse_env("n_workers", &raw)?);
        }
        if let Some(raw) = lookup(ENV_SEED) {
            self.seed = Some(parse_env("seed", &raw)?);
        }
        if let Some(raw) = lookup(ENV_PARTITION) {
            self.partition = PartitionAxis::from_str(&raw).map_err(|e| ConfigError::InvalidValue {
                name: "partition",
                value: e.to_string(),
            })?;
        }
        if let Some(raw) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&raw)?;
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) {
        if let Some(rate) = cli.rate {
            self.rate = rate;
        }
        if let Some(n_paths) = cli.n_paths {
            self.n_paths = n_paths;
        }
        if let Some(n_workers) = cli.n_workers {
            self.n_workers = Some(n_workers);
        }
        if let Some(seed) = cli.seed {
            self.seed = Some(seed);
        }
        if let Some(partition) = cli.partition {
            self.partition = partition;
        }
        if let Some(log_level) = cli.log_level {
            self.log_level = log_level;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.rate.is_finite() {
            return Err(ConfigError::InvalidValue {
                name: "rate",
                value: format!("{} is not finite", self.rate),
            });
        }
        if self.n_paths == 0 {
            return Err(ConfigError::InvalidValue {
                name: "n_paths",
                value: "must be at least 1".to_string(),
            });
        }
        if self.n_workers == Some(0) {
            return Err(ConfigError::InvalidValue {
                name: "n_workers",
                value: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Market implied by the configured rate
    pub fn market(&self) -> Market {
        Market::new(self.rate)
    }

    /// Simulation settings for the Monte Carlo pricers
    pub fn simulation_config(&self) -> Result<SimulationConfig, PricingError> {
        let mut builder = SimulationConfig::builder()
            .n_paths(self.n_paths)
            .maybe_seed(self.seed)
            .partition(self.partition);
        if let Some(n_workers) = self.n_workers {
            builder = builder.n_workers(n_workers);
        }
        builder.build()
    }
}

/// CLI overrides for [`PricerConfig`]
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Rate override
    pub rate: Option<f64>,
    /// Path count override
    pub n_paths: Option<usize>,
    /// Worker count override
    pub n_workers: Option<usize>,
    /// Seed override
    pub seed: Option<u64>,
    /// Partition override
    pub partition: Option<PartitionAxis>,
    /// Log level override
    pub log_level: Option<LogLevel>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<PricerConfig, ConfigError> {
    let mut config = match &cli.config_file {
        Some(path) => PricerConfig::from_file(path)?,
        None => PricerConfig::default(),
    };

    config.apply_env(|name| std::env::var(name).ok())?;
    config.merge_with_cli(cli);

    // Final validation
    config.validate()?;

    Ok(config)
}
