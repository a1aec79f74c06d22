//! Monte Carlo simulation configuration.
//!
//! This module provides configuration types and builders shared by the
//! sequential and parallel pricers.

use std::fmt;
use std::str::FromStr;

use pricer_core::types::PricingError;

use super::cancel::CancellationToken;

/// Axis along which the parallel pricer splits its work.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PartitionAxis {
    /// Every worker simulates a contiguous slice of paths for all instruments.
    ///
    /// Keeps all workers busy even for a single instrument.
    #[default]
    Paths,

    /// Every worker simulates all paths for a contiguous slice of instruments.
    Instruments,
}

impl fmt::Display for PartitionAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Paths => write!(f, "paths"),
            Self::Instruments => write!(f, "instruments"),
        }
    }
}

impl FromStr for PartitionAxis {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "paths" => Ok(Self::Paths),
            "instruments" => Ok(Self::Instruments),
            other => Err(PricingError::InvalidInput(format!(
                "unknown partition axis '{}', expected 'paths' or 'instruments'",
                other
            ))),
        }
    }
}

/// Monte Carlo simulation configuration.
///
/// Immutable configuration specifying simulation parameters.
/// Use [`SimulationConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{PartitionAxis, SimulationConfig};
///
/// let config = SimulationConfig::builder()
///     .n_paths(10_000)
///     .seed(42)
///     .n_workers(4)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_paths(), 10_000);
/// assert_eq!(config.seed(), Some(42));
/// assert_eq!(config.n_workers(), 4);
/// assert_eq!(config.partition(), PartitionAxis::Paths);
/// ```
#[derive(Clone, Debug)]
pub struct SimulationConfig {
    /// Number of simulated paths per instrument.
    n_paths: usize,
    /// Optional seed for reproducibility.
    seed: Option<u64>,
    /// Number of parallel workers (ignored by the sequential pricer).
    n_workers: usize,
    /// Work partitioning for the parallel pricer.
    partition: PartitionAxis,
    /// Optional cooperative cancellation.
    cancellation: Option<CancellationToken>,
}

impl SimulationConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Returns the number of simulated paths per instrument.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Returns the optional seed for reproducibility.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the number of parallel workers.
    #[inline]
    pub fn n_workers(&self) -> usize {
        self.n_workers
    }

    /// Returns the partition axis.
    #[inline]
    pub fn partition(&self) -> PartitionAxis {
        self.partition
    }

    /// Returns the cancellation token, if any.
    #[inline]
    pub fn cancellation(&self) -> Option<&CancellationToken> {
        self.cancellation.as_ref()
    }

    /// Returns `true` if a cancellation token is attached and has fired.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidInput` if `n_paths` or `n_workers` is 0.
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.n_paths == 0 {
            return Err(PricingError::InvalidInput(
                "n_paths must be positive, got 0".to_string(),
            ));
        }
        if self.n_workers == 0 {
            return Err(PricingError::InvalidInput(
                "n_workers must be positive, got 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for [`SimulationConfig`].
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{CancellationToken, PartitionAxis, SimulationConfig};
///
/// let token = CancellationToken::new();
/// let config = SimulationConfig::builder()
///     .n_paths(50_000)
///     .partition(PartitionAxis::Instruments)
///     .cancellation(token.clone())
///     .build()
///     .expect("valid config");
///
/// assert!(!config.is_cancelled());
/// token.cancel();
/// assert!(config.is_cancelled());
/// ```
#[derive(Clone, Debug, Default)]
pub struct SimulationConfigBuilder {
    n_paths: Option<usize>,
    seed: Option<u64>,
    n_workers: Option<usize>,
    partition: PartitionAxis,
    cancellation: Option<CancellationToken>,
}

impl SimulationConfigBuilder {
    /// Sets the number of simulated paths per instrument.
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = Some(n_paths);
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets or clears the seed.
    #[inline]
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the number of parallel workers.
    ///
    /// Defaults to the number of logical CPUs.
    #[inline]
    pub fn n_workers(mut self, n_workers: usize) -> Self {
        self.n_workers = Some(n_workers);
        self
    }

    /// Sets the partition axis.
    #[inline]
    pub fn partition(mut self, partition: PartitionAxis) -> Self {
        self.partition = partition;
        self
    }

    /// Attaches a cancellation token.
    #[inline]
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidInput` if `n_paths` is not set or if
    /// `n_paths` or `n_workers` is 0.
    pub fn build(self) -> Result<SimulationConfig, PricingError> {
        let n_paths = self
            .n_paths
            .ok_or_else(|| PricingError::InvalidInput("n_paths must be specified".to_string()))?;

        let config = SimulationConfig {
            n_paths,
            seed: self.seed,
            n_workers: self.n_workers.unwrap_or_else(num_cpus::get),
            partition: self.partition,
            cancellation: self.cancellation,
        };

        config.validate()?;
        Ok(config)
    }
}
