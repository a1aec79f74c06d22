//! Single-threaded Monte Carlo pricer.

use pricer_core::types::{InstrumentTable, Market, PricingError, PricingResult};
use tracing::debug;

use super::config::SimulationConfig;
use super::kernel::{simulate_paths, PartialSum, TerminalKernel, BLOCK_SIZE};
use crate::rng::{resolve_seed, SeededStreams, StreamFactory};

/// Prices European calls by simulating terminal values on one thread.
///
/// Each instrument is simulated over `n_paths` paths, one block of
/// [`BLOCK_SIZE`] paths at a time. The parallel pricer consumes the same
/// streams, so both agree for a given seed.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::{Instrument, InstrumentTable, Market};
/// use pricer_pricing::mc::{SequentialMonteCarloPricer, SimulationConfig};
///
/// let config = SimulationConfig::builder().n_paths(20_000).seed(42).build().unwrap();
/// let pricer = SequentialMonteCarloPricer::new(config);
///
/// let table = InstrumentTable::from_instruments([Instrument::new(100.0, 102.0, 0.2, 0.5)]);
/// let result = pricer.price(&table, &Market::new(0.02)).unwrap();
///
/// assert!((result.option_prices[0] - 7.288151).abs() < 0.5);
/// ```
#[derive(Clone, Debug)]
pub struct SequentialMonteCarloPricer {
    config: SimulationConfig,
}

impl SequentialMonteCarloPricer {
    /// Creates a pricer with the given configuration.
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Prices every instrument using seeded streams.
    ///
    /// Without a configured seed a fresh one is drawn for this call.
    ///
    /// # Errors
    ///
    /// - `PricingError::InvalidInput` for a malformed instrument or rate
    /// - `PricingError::NumericOverflow` for non-finite payoffs
    /// - `PricingError::Cancelled` if the configured token fires
    pub fn price(
        &self,
        instruments: &InstrumentTable,
        market: &Market,
    ) -> Result<PricingResult, PricingError> {
        let streams = SeededStreams::new(resolve_seed(self.config.seed()));
        debug!(seed = streams.seed(), "starting sequential Monte Carlo run");
        self.price_with_streams(instruments, market, &streams)
    }

    /// Prices every instrument using the supplied stream factory.
    ///
    /// # Errors
    ///
    /// Same as [`price`](Self::price).
    pub fn price_with_streams<F: StreamFactory>(
        &self,
        instruments: &InstrumentTable,
        market: &Market,
        streams: &F,
    ) -> Result<PricingResult, PricingError> {
        self.config.validate()?;
        market.validate()?;
        instruments.validate()?;

        if self.config.is_cancelled() {
            return Err(PricingError::Cancelled);
        }

        let n_paths = self.config.n_paths();
        let mut buffer = vec![0.0; BLOCK_SIZE.min(n_paths)];
        let mut prices = Vec::with_capacity(instruments.len());
        let mut std_errors = Vec::with_capacity(instruments.len());

        for (index, instrument) in instruments.iter().enumerate() {
            let kernel = TerminalKernel::new(&instrument, market);
            let partial = if kernel.is_deterministic() {
                PartialSum::default()
            } else {
                simulate_paths(
                    streams,
                    index,
                    &kernel,
                    0..n_paths,
                    &mut buffer,
                    self.config.cancellation(),
                )?
            };

            let (price, std_error) = kernel.estimate(&partial, n_paths, index)?;
            prices.push(price);
            std_errors.push(std_error);
        }

        debug!(
            n_instruments = instruments.len(),
            n_paths,
            "sequential Monte Carlo pricing complete"
        );

        Ok(PricingResult::with_std_errors(prices, std_errors))
    }
}
