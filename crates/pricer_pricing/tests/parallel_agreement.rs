//! Parallel vs sequential agreement and failure handling.
//!
//! # Test Categories
//!
//! 1. **Agreement**: parallel prices match sequential for any worker count
//!    and partition axis
//! 2. **Injected streams**: deterministic sources give exact estimates
//! 3. **Failures**: panicking workers, cancellation, numeric overflow

use std::sync::atomic::{AtomicUsize, Ordering};

use approx::assert_relative_eq;
use pricer_core::types::{Instrument, InstrumentTable, Market, PricingError};
use pricer_pricing::mc::{
    CancellationToken, ParallelMonteCarloPricer, PartitionAxis, SequentialMonteCarloPricer,
    SimulationConfig, BLOCK_SIZE,
};
use pricer_pricing::rng::{NormalSource, PricerRng, SeededStreams, StreamFactory};

const N_PATHS: usize = 100_000;
const SEED: u64 = 20240601;

fn portfolio() -> InstrumentTable {
    InstrumentTable::from_instruments([
        Instrument::new(100.0, 102.0, 0.2, 0.5),
        Instrument::new(100.0, 100.0, 0.2, 1.0),
        Instrument::new(80.0, 100.0, 0.3, 2.0),
        Instrument::new(130.0, 100.0, 0.45, 0.25),
        Instrument::new(100.0, 105.0, 0.0, 1.0),
    ])
}

fn config(n_workers: usize, partition: PartitionAxis) -> SimulationConfig {
    SimulationConfig::builder()
        .n_paths(N_PATHS)
        .n_workers(n_workers)
        .partition(partition)
        .seed(SEED)
        .build()
        .unwrap()
}

/// Source that always draws zero.
struct ZeroSource;

impl NormalSource for ZeroSource {
    fn fill_standard_normal(&mut self, buffer: &mut [f64]) {
        buffer.fill(0.0);
    }
}

struct ZeroStreams;

impl StreamFactory for ZeroStreams {
    type Source = ZeroSource;

    fn stream(&self, _instrument: usize, _block: usize) -> ZeroSource {
        ZeroSource
    }
}

/// Seeded streams that panic when asked for one particular block.
struct PanickingStreams {
    inner: SeededStreams,
    poisoned_block: usize,
}

impl StreamFactory for PanickingStreams {
    type Source = PricerRng;

    fn stream(&self, instrument: usize, block: usize) -> PricerRng {
        if block == self.poisoned_block {
            panic!("stream for block {} unavailable", block);
        }
        self.inner.stream(instrument, block)
    }
}

/// Seeded streams that count how many streams were requested.
struct CountingStreams {
    inner: SeededStreams,
    created: AtomicUsize,
}

impl StreamFactory for CountingStreams {
    type Source = PricerRng;

    fn stream(&self, instrument: usize, block: usize) -> PricerRng {
        self.created.fetch_add(1, Ordering::Relaxed);
        self.inner.stream(instrument, block)
    }
}

/// Seeded streams that fire a cancellation token once block 0 is handed out.
struct CancellingStreams {
    inner: SeededStreams,
    token: CancellationToken,
}

impl StreamFactory for CancellingStreams {
    type Source = PricerRng;

    fn stream(&self, instrument: usize, block: usize) -> PricerRng {
        if block == 0 {
            self.token.cancel();
        }
        self.inner.stream(instrument, block)
    }
}

// ============================================================================
// Agreement
// ============================================================================

#[test]
fn test_parallel_matches_sequential_all_worker_counts() {
    let market = Market::new(0.02);
    let sequential = SequentialMonteCarloPricer::new(config(1, PartitionAxis::Paths))
        .price(&portfolio(), &market)
        .unwrap();

    for partition in [PartitionAxis::Paths, PartitionAxis::Instruments] {
        for n_workers in [1, 2, 4, 8] {
            let parallel = ParallelMonteCarloPricer::new(config(n_workers, partition))
                .price(&portfolio(), &market)
                .unwrap();

            assert_eq!(parallel.len(), sequential.len());
            for (i, (p, s)) in parallel
                .option_prices
                .iter()
                .zip(&sequential.option_prices)
                .enumerate()
            {
                let rel = (p - s).abs() / s.abs().max(1e-12);
                assert!(
                    rel < 1e-3,
                    "{} workers on {}: instrument {} parallel {} vs sequential {}",
                    n_workers,
                    partition,
                    i,
                    p,
                    s
                );
            }
        }
    }
}

#[test]
fn test_more_workers_than_paths() {
    let config = SimulationConfig::builder()
        .n_paths(5)
        .n_workers(8)
        .seed(SEED)
        .build()
        .unwrap();
    let market = Market::new(0.02);

    let parallel = ParallelMonteCarloPricer::new(config.clone())
        .price(&portfolio(), &market)
        .unwrap();
    let sequential = SequentialMonteCarloPricer::new(config)
        .price(&portfolio(), &market)
        .unwrap();

    for (p, s) in parallel.option_prices.iter().zip(&sequential.option_prices) {
        assert_relative_eq!(*p, *s, max_relative = 1e-12);
    }
}

#[test]
fn test_chunks_starting_mid_block_reuse_streams() {
    // 3 workers over 2.5 blocks: every chunk boundary falls inside a block
    let n_paths = 2 * BLOCK_SIZE + BLOCK_SIZE / 2;
    let table = InstrumentTable::from_instruments([Instrument::new(100.0, 102.0, 0.2, 0.5)]);
    let streams = CountingStreams {
        inner: SeededStreams::new(SEED),
        created: AtomicUsize::new(0),
    };
    let config = SimulationConfig::builder()
        .n_paths(n_paths)
        .n_workers(3)
        .build()
        .unwrap();

    let parallel = ParallelMonteCarloPricer::new(config.clone())
        .price_with_streams(&table, &Market::new(0.02), &streams)
        .unwrap();
    // 3 blocks, two of them split across a chunk boundary
    assert_eq!(streams.created.load(Ordering::Relaxed), 5);

    let sequential = SequentialMonteCarloPricer::new(config)
        .price_with_streams(&table, &Market::new(0.02), &SeededStreams::new(SEED))
        .unwrap();
    assert_relative_eq!(
        parallel.option_prices[0],
        sequential.option_prices[0],
        max_relative = 1e-12
    );
}

// ============================================================================
// Injected Streams
// ============================================================================

#[test]
fn test_zero_source_gives_median_path_payoff() {
    let table = InstrumentTable::from_instruments([
        Instrument::new(100.0, 102.0, 0.2, 0.5),
        Instrument::new(100.0, 90.0, 0.3, 1.0),
    ]);
    let rate = 0.02;
    let market = Market::new(rate);

    let expected: Vec<f64> = table
        .iter()
        .map(|inst| {
            let drift = (rate - 0.5 * inst.sigma * inst.sigma) * inst.maturity;
            let terminal = inst.asset_price * drift.exp();
            (-rate * inst.maturity).exp() * (terminal - inst.strike).max(0.0)
        })
        .collect();

    let sequential = SequentialMonteCarloPricer::new(config(1, PartitionAxis::Paths))
        .price_with_streams(&table, &market, &ZeroStreams)
        .unwrap();
    let parallel = ParallelMonteCarloPricer::new(config(4, PartitionAxis::Paths))
        .price_with_streams(&table, &market, &ZeroStreams)
        .unwrap();

    for result in [sequential, parallel] {
        for (i, expected) in expected.iter().enumerate() {
            assert_relative_eq!(result.option_prices[i], *expected, max_relative = 1e-9);
            assert!(result.std_error(i).unwrap() < 1e-6);
        }
    }
    assert_eq!(expected[1], 0.0);
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_panicking_worker_reported() {
    let n_paths = 4 * BLOCK_SIZE;
    let streams = PanickingStreams {
        inner: SeededStreams::new(SEED),
        poisoned_block: 2,
    };
    let config = SimulationConfig::builder()
        .n_paths(n_paths)
        .n_workers(4)
        .build()
        .unwrap();

    let err = ParallelMonteCarloPricer::new(config)
        .price_with_streams(&portfolio(), &Market::new(0.02), &streams)
        .unwrap_err();

    match err {
        PricingError::WorkerFailure { chunks, message } => {
            // One block per chunk: only chunk 2 touches block 2
            assert_eq!(chunks, vec![2]);
            assert!(message.contains("unavailable"));
        }
        other => panic!("Expected WorkerFailure, got {:?}", other),
    }
}

#[test]
fn test_pre_cancelled_parallel() {
    let token = CancellationToken::new();
    token.cancel();
    let config = SimulationConfig::builder()
        .n_paths(N_PATHS)
        .n_workers(4)
        .cancellation(token)
        .build()
        .unwrap();

    let err = ParallelMonteCarloPricer::new(config)
        .price(&portfolio(), &Market::new(0.02))
        .unwrap_err();
    assert_eq!(err, PricingError::Cancelled);
}

fn cancelling_run(n_workers: usize) -> (CancellingStreams, SimulationConfig) {
    let token = CancellationToken::new();
    let streams = CancellingStreams {
        inner: SeededStreams::new(SEED),
        token: token.clone(),
    };
    let config = SimulationConfig::builder()
        .n_paths(4 * BLOCK_SIZE)
        .n_workers(n_workers)
        .cancellation(token)
        .build()
        .unwrap();
    (streams, config)
}

#[test]
fn test_cancelled_while_running() {
    let market = Market::new(0.02);

    let (streams, config) = cancelling_run(1);
    let err = SequentialMonteCarloPricer::new(config)
        .price_with_streams(&portfolio(), &market, &streams)
        .unwrap_err();
    assert_eq!(err, PricingError::Cancelled);

    for n_workers in [1, 2, 4] {
        let (streams, config) = cancelling_run(n_workers);
        let err = ParallelMonteCarloPricer::new(config)
            .price_with_streams(&portfolio(), &market, &streams)
            .unwrap_err();
        assert_eq!(err, PricingError::Cancelled);
    }
}

#[test]
fn test_overflow_reported_by_both_pricers() {
    // exp((r - σ²/2)·T) overflows for r = 100, T = 10
    let table = InstrumentTable::from_instruments([
        Instrument::new(100.0, 102.0, 0.2, 0.5),
        Instrument::new(100.0, 102.0, 0.2, 10.0),
    ]);
    let market = Market::new(100.0);

    let err = SequentialMonteCarloPricer::new(config(1, PartitionAxis::Paths))
        .price(&table, &market)
        .unwrap_err();
    assert!(matches!(err, PricingError::NumericOverflow { index: 1, .. }));

    for partition in [PartitionAxis::Paths, PartitionAxis::Instruments] {
        let err = ParallelMonteCarloPricer::new(config(4, partition))
            .price(&table, &market)
            .unwrap_err();
        assert!(matches!(err, PricingError::NumericOverflow { index: 1, .. }));
    }
}
