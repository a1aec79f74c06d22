//! Unit tests for the RNG module.

use super::*;

// ============================================================================
// PricerRng
// ============================================================================

/// Test that the same seed produces identical sequences.
#[test]
fn test_seed_reproducibility() {
    let mut rng1 = PricerRng::from_seed(12345);
    let mut rng2 = PricerRng::from_seed(12345);

    for _ in 0..100 {
        assert_eq!(rng1.gen_normal(), rng2.gen_normal());
    }
}

/// Test that different seeds produce different sequences.
#[test]
fn test_different_seeds_differ() {
    let a = PricerRng::from_seed(1).draw_standard_normal(16);
    let b = PricerRng::from_seed(2).draw_standard_normal(16);
    assert_ne!(a, b);
}

/// Test that single draws and batch fills consume the same sequence.
#[test]
fn test_single_and_batch_agree() {
    let mut single = PricerRng::from_seed(7);
    let mut batch = PricerRng::from_seed(7);

    let expected: Vec<f64> = (0..32).map(|_| single.gen_normal()).collect();
    assert_eq!(batch.draw_standard_normal(32), expected);
}

/// Test that an empty buffer is a no-op.
#[test]
fn test_empty_buffer() {
    let mut rng = PricerRng::from_seed(42);
    let mut buffer: Vec<f64> = vec![];
    rng.fill_standard_normal(&mut buffer);
    assert!(buffer.is_empty());
    assert!(rng.draw_standard_normal(0).is_empty());
}

/// Test the sample moments of a large batch.
#[test]
fn test_normal_moments() {
    let n = 200_000;
    let draws = PricerRng::from_seed(2024).draw_standard_normal(n);

    let mean = draws.iter().sum::<f64>() / n as f64;
    let variance = draws.iter().map(|z| (z - mean).powi(2)).sum::<f64>() / (n - 1) as f64;

    assert!(mean.abs() < 0.01, "mean {} too far from 0", mean);
    assert!((variance - 1.0).abs() < 0.02, "variance {} too far from 1", variance);
    assert!(draws.iter().all(|z| z.is_finite()));
}

/// Test that skip(n) lands where n discarded draws would.
#[test]
fn test_skip_matches_discarded_draws() {
    let mut reference = PricerRng::from_seed(11);
    let all = reference.draw_standard_normal(1000);

    for offset in [0, 1, 255, 256, 257, 700] {
        let mut rng = PricerRng::from_seed(11);
        rng.skip(offset);
        assert_eq!(rng.draw_standard_normal(10), all[offset..offset + 10]);
    }
}

// ============================================================================
// Streams
// ============================================================================

/// Test that streams are reproducible per (instrument, block).
#[test]
fn test_stream_reproducibility() {
    let streams = SeededStreams::new(42);
    let a = streams.stream(3, 17).draw_standard_normal(64);
    let b = streams.stream(3, 17).draw_standard_normal(64);
    assert_eq!(a, b);
}

/// Test that neighbouring streams are distinct.
#[test]
fn test_streams_are_distinct() {
    let streams = SeededStreams::new(42);
    let base = streams.stream(0, 0).draw_standard_normal(8);

    assert_ne!(base, streams.stream(0, 1).draw_standard_normal(8));
    assert_ne!(base, streams.stream(1, 0).draw_standard_normal(8));
    assert_ne!(base, SeededStreams::new(43).stream(0, 0).draw_standard_normal(8));
}

/// Test that swapping instrument and block yields different seeds.
#[test]
fn test_stream_seed_not_symmetric() {
    for (i, b) in [(0, 1), (2, 5), (7, 3)] {
        assert_ne!(stream_seed(99, i, b), stream_seed(99, b, i));
    }
}

/// Test that an explicit seed is returned unchanged.
#[test]
fn test_resolve_explicit_seed() {
    assert_eq!(resolve_seed(Some(5)), 5);
}

/// Test that the factory exposes its run seed.
#[test]
fn test_seeded_streams_seed() {
    assert_eq!(SeededStreams::new(123).seed(), 123);
}
