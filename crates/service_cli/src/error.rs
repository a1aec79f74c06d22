//! CLI error types.

use adapter_loader::LoaderError;
use pricer_core::types::PricingError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by `bsm` subcommands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be assembled.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input or output CSV failure.
    #[error("{0}")]
    Loader(#[from] LoaderError),

    /// Pricing failed.
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// Writing to stdout failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid command line argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
