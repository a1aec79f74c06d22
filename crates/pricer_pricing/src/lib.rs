//! # Pricer Pricing (Layer 3: Monte Carlo Engine)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing simulates terminal asset prices under risk-neutral GBM and
//! averages discounted call payoffs:
//! - [`rng`]: seeded normal generators and per-block stream factories
//! - [`mc`]: sequential and parallel (rayon) Monte Carlo pricers
//!
//! The closed-form reference price from Layer 2 is re-exported as
//! [`analytic_price`] so callers can compare all three methods from one crate.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::types::{Instrument, InstrumentTable};
//! use pricer_pricing::{analytic_price, monte_carlo_price, parallel_monte_carlo_price};
//!
//! let table = InstrumentTable::from_instruments([Instrument::new(100.0, 102.0, 0.2, 0.5)]);
//!
//! let exact = analytic_price(&table, 0.02).unwrap();
//! let seq = monte_carlo_price(&table, 0.02, 100_000, Some(42)).unwrap();
//! let par = parallel_monte_carlo_price(&table, 0.02, 100_000, 4, Some(42)).unwrap();
//!
//! assert!((exact.option_prices[0] - seq.option_prices[0]).abs() < 0.15);
//! assert!((seq.option_prices[0] - par.option_prices[0]).abs() < 1e-9);
//! ```
//!
//! ## Reproducibility
//!
//! Given a seed, results are reproducible on the same build. Draws come from
//! `rand`'s `StdRng`, so bit-reproducibility across `rand` versions is not
//! promised.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod mc;
pub mod rng;

use pricer_core::types::{InstrumentTable, Market, PricingError, PricingResult};

pub use mc::{
    CancellationToken, ParallelMonteCarloPricer, PartitionAxis, SequentialMonteCarloPricer,
    SimulationConfig,
};
pub use pricer_models::analytic_price;
pub use rng::{NormalSource, PricerRng, SeededStreams, StreamFactory};

/// Prices every instrument with the single-threaded Monte Carlo pricer.
///
/// # Arguments
///
/// * `instruments` - Contracts to price
/// * `rate` - Continuously compounded risk-free rate
/// * `n_paths` - Simulated paths per instrument
/// * `seed` - Run seed; `None` draws a fresh one
///
/// # Errors
///
/// - `PricingError::InvalidInput` if `n_paths` is 0 or an instrument is malformed
/// - `PricingError::NumericOverflow` for non-finite payoffs
pub fn monte_carlo_price(
    instruments: &InstrumentTable,
    rate: f64,
    n_paths: usize,
    seed: Option<u64>,
) -> Result<PricingResult, PricingError> {
    let config = SimulationConfig::builder()
        .n_paths(n_paths)
        .maybe_seed(seed)
        .n_workers(1)
        .build()?;
    SequentialMonteCarloPricer::new(config).price(instruments, &Market::new(rate))
}

/// Prices every instrument with the parallel Monte Carlo pricer.
///
/// Paths are split across `n_workers` chunks. With the same seed the result
/// matches [`monte_carlo_price`] up to summation order.
///
/// # Errors
///
/// - `PricingError::InvalidInput` if `n_paths` or `n_workers` is 0, or an
///   instrument is malformed
/// - `PricingError::NumericOverflow` for non-finite payoffs
/// - `PricingError::WorkerFailure` if any worker failed
pub fn parallel_monte_carlo_price(
    instruments: &InstrumentTable,
    rate: f64,
    n_paths: usize,
    n_workers: usize,
    seed: Option<u64>,
) -> Result<PricingResult, PricingError> {
    let config = SimulationConfig::builder()
        .n_paths(n_paths)
        .n_workers(n_workers)
        .maybe_seed(seed)
        .build()?;
    ParallelMonteCarloPricer::new(config).price(instruments, &Market::new(rate))
}
