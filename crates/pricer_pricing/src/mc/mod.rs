//! # Monte Carlo Pricing
//!
//! Terminal-value Monte Carlo for European calls under risk-neutral GBM.
//!
//! ## Module Structure
//!
//! - [`config`]: [`SimulationConfig`] and its builder
//! - [`cancel`]: [`CancellationToken`] for cooperative cancellation
//! - [`partition`]: contiguous work splitting
//! - [`kernel`]: per-block path simulation and partial sums
//! - [`sequential`]: single-threaded pricer
//! - [`parallel`]: rayon fork-join pricer
//!
//! ## Reproducibility
//!
//! Random draws are tied to `(instrument, block)` rather than to workers,
//! so a seeded run gives the same estimate (up to summation order) for any
//! worker count or partition axis.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::types::{Instrument, InstrumentTable, Market};
//! use pricer_pricing::mc::{
//!     ParallelMonteCarloPricer, SequentialMonteCarloPricer, SimulationConfig,
//! };
//!
//! let table = InstrumentTable::from_instruments([Instrument::new(100.0, 102.0, 0.2, 0.5)]);
//! let market = Market::new(0.02);
//! let config = SimulationConfig::builder()
//!     .n_paths(50_000)
//!     .n_workers(4)
//!     .seed(7)
//!     .build()
//!     .unwrap();
//!
//! let seq = SequentialMonteCarloPricer::new(config.clone()).price(&table, &market).unwrap();
//! let par = ParallelMonteCarloPricer::new(config).price(&table, &market).unwrap();
//!
//! let rel = (seq.option_prices[0] - par.option_prices[0]).abs() / seq.option_prices[0];
//! assert!(rel < 1e-3);
//! ```

pub mod cancel;
pub mod config;
pub mod kernel;
pub mod parallel;
pub mod partition;
pub mod sequential;

pub use cancel::CancellationToken;
pub use config::{PartitionAxis, SimulationConfig, SimulationConfigBuilder};
pub use kernel::{PartialSum, BLOCK_SIZE};
pub use parallel::ParallelMonteCarloPricer;
pub use partition::chunk_ranges;
pub use sequential::SequentialMonteCarloPricer;
