//! Fork-join parallel Monte Carlo pricer.
//!
//! Work is split into `n_workers` contiguous chunks, either of paths or of
//! instruments ([`PartitionAxis`]). Each chunk runs as one rayon task that
//! owns its random streams, path buffer and partial sums; nothing mutable
//! is shared. After all chunks finish, partial sums are combined in chunk
//! order and divided by `n_paths`.
//!
//! A chunk that panics or cannot allocate is reported, together with every
//! other failed chunk, as `PricingError::WorkerFailure`. No partial result
//! is ever returned.

use std::collections::TryReserveError;
use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};

use pricer_core::types::{InstrumentTable, Market, PricingError, PricingResult};
use rayon::prelude::*;
use tracing::{debug, warn};

use super::config::{PartitionAxis, SimulationConfig};
use super::kernel::{simulate_paths, PartialSum, TerminalKernel, BLOCK_SIZE};
use super::partition::chunk_ranges;
use crate::rng::{resolve_seed, SeededStreams, StreamFactory};

/// Partial sums produced by one chunk, keyed by instrument row.
type ChunkOutput = Vec<(usize, PartialSum)>;

/// Why a chunk did not complete.
#[derive(Debug)]
enum ChunkFailure {
    /// A domain error raised by the kernel (overflow, cancellation).
    Pricing(PricingError),
    /// The chunk panicked or could not allocate.
    Worker(String),
}

impl From<PricingError> for ChunkFailure {
    fn from(err: PricingError) -> Self {
        Self::Pricing(err)
    }
}

impl From<TryReserveError> for ChunkFailure {
    fn from(err: TryReserveError) -> Self {
        Self::Worker(format!("allocation failed: {}", err))
    }
}

/// Prices European calls by distributing simulation over rayon workers.
///
/// For a given seed the result matches [`SequentialMonteCarloPricer`]
/// up to floating-point summation order, whatever the worker count or
/// partition axis.
///
/// [`SequentialMonteCarloPricer`]: super::SequentialMonteCarloPricer
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::{Instrument, InstrumentTable, Market};
/// use pricer_pricing::mc::{ParallelMonteCarloPricer, SimulationConfig};
///
/// let config = SimulationConfig::builder()
///     .n_paths(20_000)
///     .n_workers(4)
///     .seed(42)
///     .build()
///     .unwrap();
///
/// let table = InstrumentTable::from_instruments([Instrument::new(100.0, 102.0, 0.2, 0.5)]);
/// let result = ParallelMonteCarloPricer::new(config)
///     .price(&table, &Market::new(0.02))
///     .unwrap();
///
/// assert_eq!(result.len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct ParallelMonteCarloPricer {
    config: SimulationConfig,
}

impl ParallelMonteCarloPricer {
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
    /// - `PricingError::WorkerFailure` if any chunk panicked or could not
    ///   allocate
    /// - `PricingError::Cancelled` if the configured token fires
    pub fn price(
        &self,
        instruments: &InstrumentTable,
        market: &Market,
    ) -> Result<PricingResult, PricingError> {
        let streams = SeededStreams::new(resolve_seed(self.config.seed()));
        debug!(seed = streams.seed(), "starting parallel Monte Carlo run");
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
        let n_workers = self.config.n_workers();
        let kernels: Vec<TerminalKernel> = instruments
            .iter()
            .map(|instrument| TerminalKernel::new(&instrument, market))
            .collect();

        let chunks = match self.config.partition() {
            PartitionAxis::Paths => chunk_ranges(n_paths, n_workers),
            PartitionAxis::Instruments => chunk_ranges(kernels.len(), n_workers),
        };

        debug!(
            n_instruments = kernels.len(),
            n_paths,
            n_workers,
            partition = %self.config.partition(),
            "dispatching Monte Carlo chunks"
        );

        let outcomes: Vec<Result<ChunkOutput, ChunkFailure>> = chunks
            .into_par_iter()
            .map(|range| self.run_chunk(&kernels, streams, range))
            .collect();

        let totals = combine(outcomes, kernels.len())?;

        let mut prices = Vec::with_capacity(kernels.len());
        let mut std_errors = Vec::with_capacity(kernels.len());
        for (index, (kernel, partial)) in kernels.iter().zip(&totals).enumerate() {
            let (price, std_error) = kernel.estimate(partial, n_paths, index)?;
            prices.push(price);
            std_errors.push(std_error);
        }

        debug!(
            n_instruments = kernels.len(),
            "parallel Monte Carlo pricing complete"
        );

        Ok(PricingResult::with_std_errors(prices, std_errors))
    }

    /// Runs one chunk, converting panics into a worker failure.
    fn run_chunk<F: StreamFactory>(
        &self,
        kernels: &[TerminalKernel],
        streams: &F,
        range: Range<usize>,
    ) -> Result<ChunkOutput, ChunkFailure> {
        panic::catch_unwind(AssertUnwindSafe(|| match self.config.partition() {
            PartitionAxis::Paths => self.simulate_path_chunk(kernels, streams, range),
            PartitionAxis::Instruments => self.simulate_instrument_chunk(kernels, streams, range),
        }))
        .unwrap_or_else(|payload| Err(ChunkFailure::Worker(panic_message(payload.as_ref()))))
    }

    /// All instruments over a slice of paths.
    fn simulate_path_chunk<F: StreamFactory>(
        &self,
        kernels: &[TerminalKernel],
        streams: &F,
        paths: Range<usize>,
    ) -> Result<ChunkOutput, ChunkFailure> {
        let mut buffer = allocate_buffer(BLOCK_SIZE.min(paths.len()))?;
        let mut output = ChunkOutput::new();
        output.try_reserve_exact(kernels.len())?;

        for (index, kernel) in kernels.iter().enumerate() {
            if kernel.is_deterministic() {
                continue;
            }
            let partial = simulate_paths(
                streams,
                index,
                kernel,
                paths.clone(),
                &mut buffer,
                self.config.cancellation(),
            )?;
            output.push((index, partial));
        }

        Ok(output)
    }

    /// All paths for a slice of instruments.
    fn simulate_instrument_chunk<F: StreamFactory>(
        &self,
        kernels: &[TerminalKernel],
        streams: &F,
        rows: Range<usize>,
    ) -> Result<ChunkOutput, ChunkFailure> {
        let n_paths = self.config.n_paths();
        let mut buffer = allocate_buffer(if rows.is_empty() {
            0
        } else {
            BLOCK_SIZE.min(n_paths)
        })?;
        let mut output = ChunkOutput::new();
        output.try_reserve_exact(rows.len())?;

        for index in rows {
            let kernel = &kernels[index];
            if kernel.is_deterministic() {
                continue;
            }
            let partial = simulate_paths(
                streams,
                index,
                kernel,
                0..n_paths,
                &mut buffer,
                self.config.cancellation(),
            )?;
            output.push((index, partial));
        }

        Ok(output)
    }
}

fn allocate_buffer(len: usize) -> Result<Vec<f64>, TryReserveError> {
    let mut buffer = Vec::new();
    buffer.try_reserve_exact(len)?;
    buffer.resize(len, 0.0);
    Ok(buffer)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("panicked: {}", message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("panicked: {}", message)
    } else {
        "panicked with a non-string payload".to_string()
    }
}

/// Merges chunk outputs into per-instrument totals.
///
/// Worker failures take precedence over domain errors, which take
/// precedence over cancellation.
fn combine(
    outcomes: Vec<Result<ChunkOutput, ChunkFailure>>,
    n_instruments: usize,
) -> Result<Vec<PartialSum>, PricingError> {
    let mut totals = vec![PartialSum::default(); n_instruments];
    let mut failed_chunks = Vec::new();
    let mut messages = Vec::new();
    let mut pricing_errors = Vec::new();

    for (chunk, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            Ok(output) => {
                for (index, partial) in output {
                    totals[index].merge(&partial);
                }
            }
            Err(ChunkFailure::Worker(message)) => {
                warn!(chunk, %message, "Monte Carlo worker failed");
                failed_chunks.push(chunk);
                messages.push(format!("chunk {}: {}", chunk, message));
            }
            Err(ChunkFailure::Pricing(err)) => pricing_errors.push(err),
        }
    }

    if !failed_chunks.is_empty() {
        return Err(PricingError::WorkerFailure {
            chunks: failed_chunks,
            message: messages.join("; "),
        });
    }

    if let Some(err) = pricing_errors
        .iter()
        .find(|err| **err != PricingError::Cancelled)
        .or(pricing_errors.first())
    {
        return Err(err.clone());
    }

    Ok(totals)
}
