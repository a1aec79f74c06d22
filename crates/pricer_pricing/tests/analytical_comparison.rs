//! Analytical comparison tests for Monte Carlo pricing.
//!
//! These tests verify that Monte Carlo prices converge to the Black-Scholes
//! closed form and share its behaviour on degenerate and invalid inputs.
//!
//! # Test Categories
//!
//! 1. **Convergence**: MC vs closed form, error shrinking with path count
//! 2. **Determinism**: seeded runs are bit-identical
//! 3. **Degenerate inputs**: zero maturity prices to intrinsic value
//! 4. **Validation**: malformed inputs rejected by every pricer

use approx::assert_relative_eq;
use pricer_core::types::{Instrument, InstrumentTable, PricingError};
use pricer_pricing::{analytic_price, monte_carlo_price, parallel_monte_carlo_price};

const RATE: f64 = 0.02;

/// strike=100, asset_price=102, sigma=0.2, maturity=0.5
fn reference_table() -> InstrumentTable {
    InstrumentTable::from_instruments([Instrument::new(100.0, 102.0, 0.2, 0.5)])
}

// ============================================================================
// Convergence Tests
// ============================================================================

#[test]
fn test_reference_analytic_value() {
    let result = analytic_price(&reference_table(), RATE).unwrap();
    assert_relative_eq!(result.option_prices[0], 7.288151, epsilon = 1e-6);
}

#[test]
fn test_mc_converges_to_analytic() {
    let analytic = analytic_price(&reference_table(), RATE).unwrap().option_prices[0];
    let mc = monte_carlo_price(&reference_table(), RATE, 1_000_000, Some(42)).unwrap();

    let error = (mc.option_prices[0] - analytic).abs();
    assert!(
        error < 0.05,
        "MC price {} too far from analytic {}",
        mc.option_prices[0],
        analytic
    );
}

#[test]
fn test_error_shrinks_with_paths() {
    let analytic = analytic_price(&reference_table(), RATE).unwrap().option_prices[0];

    let coarse = monte_carlo_price(&reference_table(), RATE, 10_000, Some(7)).unwrap();
    let fine = monte_carlo_price(&reference_table(), RATE, 1_000_000, Some(7)).unwrap();

    let coarse_se = coarse.std_error(0).unwrap();
    let fine_se = fine.std_error(0).unwrap();

    // O(1/sqrt(n)): 100x the paths, about a tenth of the standard error
    assert!(fine_se < coarse_se / 8.0);
    assert!(fine_se > coarse_se / 12.0);

    // Both estimates sit within four standard errors of the closed form
    assert!((coarse.option_prices[0] - analytic).abs() < 4.0 * coarse_se);
    assert!((fine.option_prices[0] - analytic).abs() < 4.0 * fine_se);
}

#[test]
fn test_parallel_converges_to_analytic() {
    let table = InstrumentTable::from_instruments([
        Instrument::new(100.0, 102.0, 0.2, 0.5),
        Instrument::new(100.0, 100.0, 0.2, 1.0),
        Instrument::new(120.0, 100.0, 0.35, 2.0),
    ]);
    let analytic = analytic_price(&table, 0.05).unwrap();
    let mc = parallel_monte_carlo_price(&table, 0.05, 400_000, 4, Some(2024)).unwrap();

    for i in 0..table.len() {
        let se = mc.std_error(i).unwrap();
        assert!(
            (mc.option_prices[i] - analytic.option_prices[i]).abs() < 5.0 * se,
            "instrument {}: MC {} vs analytic {}",
            i,
            mc.option_prices[i],
            analytic.option_prices[i]
        );
    }
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_seeded_runs_bit_identical() {
    let a = monte_carlo_price(&reference_table(), RATE, 50_000, Some(99)).unwrap();
    let b = monte_carlo_price(&reference_table(), RATE, 50_000, Some(99)).unwrap();
    assert_eq!(a.option_prices, b.option_prices);

    let c = parallel_monte_carlo_price(&reference_table(), RATE, 50_000, 4, Some(99)).unwrap();
    let d = parallel_monte_carlo_price(&reference_table(), RATE, 50_000, 4, Some(99)).unwrap();
    assert_eq!(c.option_prices, d.option_prices);
}

#[test]
fn test_unseeded_runs_succeed() {
    let result = monte_carlo_price(&reference_table(), RATE, 20_000, None).unwrap();
    assert!((result.option_prices[0] - 7.288151).abs() < 0.5);
}

// ============================================================================
// Degenerate Inputs
// ============================================================================

#[test]
fn test_zero_maturity_all_pricers() {
    let table = InstrumentTable::from_instruments([
        Instrument::new(100.0, 102.0, 0.2, 0.0),
        Instrument::new(100.0, 90.0, 0.4, 0.0),
    ]);
    let expected = [2.0, 0.0];

    let analytic = analytic_price(&table, RATE).unwrap();
    let mc = monte_carlo_price(&table, RATE, 1000, Some(1)).unwrap();
    let par = parallel_monte_carlo_price(&table, RATE, 1000, 3, Some(1)).unwrap();

    for result in [analytic, mc, par] {
        assert_eq!(result.option_prices, expected);
    }
}

// ============================================================================
// Positional Alignment
// ============================================================================

#[test]
fn test_prices_align_with_rows() {
    // Deep OTM, reference, deep ITM: prices must come back in row order
    let table = InstrumentTable::from_instruments([
        Instrument::new(300.0, 100.0, 0.2, 0.5),
        Instrument::new(100.0, 102.0, 0.2, 0.5),
        Instrument::new(20.0, 100.0, 0.2, 0.5),
    ]);

    for result in [
        analytic_price(&table, RATE).unwrap(),
        monte_carlo_price(&table, RATE, 20_000, Some(5)).unwrap(),
        parallel_monte_carlo_price(&table, RATE, 20_000, 4, Some(5)).unwrap(),
    ] {
        assert_eq!(result.len(), table.len());
        assert!(result.option_prices[0] < 1e-3);
        assert!((result.option_prices[1] - 7.288151).abs() < 0.5);
        assert!((result.option_prices[2] - 80.2).abs() < 0.5);
    }
}

#[test]
fn test_huge_magnitude_prices_like_analytic() {
    // payoff² exceeds f64::MAX while the price stays finite
    let table = InstrumentTable::from_instruments([Instrument::new(1e155, 1e155, 0.2, 0.5)]);
    let analytic = analytic_price(&table, RATE).unwrap().option_prices[0];

    for result in [
        monte_carlo_price(&table, RATE, 200_000, Some(42)).unwrap(),
        parallel_monte_carlo_price(&table, RATE, 200_000, 4, Some(42)).unwrap(),
    ] {
        let price = result.option_prices[0];
        let se = result.std_error(0).unwrap();

        assert!(se.is_finite() && se > 0.0);
        assert!(
            (price - analytic).abs() < 5.0 * se,
            "MC {} vs analytic {} (se {})",
            price,
            analytic,
            se
        );
    }
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_invalid_instruments_rejected_everywhere() {
    for bad in [
        Instrument::new(0.0, 102.0, 0.2, 0.5),
        Instrument::new(100.0, -5.0, 0.2, 0.5),
    ] {
        let table = InstrumentTable::from_instruments([bad]);

        assert!(analytic_price(&table, RATE).unwrap_err().is_invalid_input());
        assert!(monte_carlo_price(&table, RATE, 100, Some(1))
            .unwrap_err()
            .is_invalid_input());
        assert!(parallel_monte_carlo_price(&table, RATE, 100, 2, Some(1))
            .unwrap_err()
            .is_invalid_input());
    }
}

#[test]
fn test_zero_paths_rejected() {
    let err = monte_carlo_price(&reference_table(), RATE, 0, Some(1)).unwrap_err();
    assert!(matches!(err, PricingError::InvalidInput(_)));

    let err = parallel_monte_carlo_price(&reference_table(), RATE, 0, 2, Some(1)).unwrap_err();
    assert!(matches!(err, PricingError::InvalidInput(_)));
}

#[test]
fn test_zero_workers_rejected() {
    let err = parallel_monte_carlo_price(&reference_table(), RATE, 100, 0, Some(1)).unwrap_err();
    assert!(matches!(err, PricingError::InvalidInput(_)));
}

#[test]
fn test_empty_table() {
    let empty = InstrumentTable::default();
    assert!(analytic_price(&empty, RATE).unwrap().is_empty());
    assert!(monte_carlo_price(&empty, RATE, 100, Some(1)).unwrap().is_empty());
    assert!(parallel_monte_carlo_price(&empty, RATE, 100, 2, Some(1))
        .unwrap()
        .is_empty());
}
