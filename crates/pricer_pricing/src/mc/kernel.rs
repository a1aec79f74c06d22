//! Terminal-value simulation kernel shared by the pricers.
//!
//! Under risk-neutral GBM the terminal price of one path is
//!
//! S_T = S · exp((r - σ²/2)·T + σ√T·z),  z ~ N(0, 1)
//!
//! and its contribution to the estimator is e^(-rT)·max(S_T - K, 0).
//! Paths are grouped in blocks of [`BLOCK_SIZE`]; block `b` of instrument
//! `i` always draws from `streams.stream(i, b)`, and path `p` uses draw
//! `p % BLOCK_SIZE` of block `p / BLOCK_SIZE`.
//!
//! Second moments are accumulated on payoffs divided by the asset price, so
//! the standard error stays finite for any instrument whose price is finite.

use std::ops::Range;

use pricer_core::types::{Instrument, Market, PricingError};

use super::cancel::CancellationToken;
use crate::rng::{NormalSource, StreamFactory};

/// Number of paths sharing one random stream.
pub const BLOCK_SIZE: usize = 4096;

/// Per-instrument constants of the terminal-value formula.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct TerminalKernel {
    asset_price: f64,
    strike: f64,
    /// (r - σ²/2)·T
    drift: f64,
    /// σ√T
    vol: f64,
    /// e^(-rT)
    discount: f64,
}

impl TerminalKernel {
    pub(crate) fn new(instrument: &Instrument, market: &Market) -> Self {
        let sigma = instrument.sigma;
        let maturity = instrument.maturity;
        Self {
            asset_price: instrument.asset_price,
            strike: instrument.strike,
            drift: (market.rate - 0.5 * sigma * sigma) * maturity,
            vol: instrument.var_factor(),
            discount: market.discount_factor(maturity),
        }
    }

    /// `true` when every path has the same terminal price.
    #[inline]
    pub(crate) fn is_deterministic(&self) -> bool {
        self.vol == 0.0
    }

    #[inline]
    pub(crate) fn discounted_payoff(&self, z: f64) -> f64 {
        let terminal = self.asset_price * (self.drift + self.vol * z).exp();
        self.discount * (terminal - self.strike).max(0.0)
    }

    /// Turns accumulated sums into a price and its standard error.
    ///
    /// Deterministic instruments ignore `partial` and return the single
    /// payoff exactly.
    pub(crate) fn estimate(
        &self,
        partial: &PartialSum,
        n_paths: usize,
        index: usize,
    ) -> Result<(f64, f64), PricingError> {
        if self.is_deterministic() {
            let payoff = self.discounted_payoff(0.0);
            if !payoff.is_finite() {
                return Err(overflow(index, payoff));
            }
            return Ok((payoff, 0.0));
        }

        debug_assert_eq!(partial.count, n_paths);
        let n = n_paths as f64;
        let mean = partial.sum / n;
        if !mean.is_finite() {
            return Err(overflow(index, mean));
        }

        // Variance of payoff / asset_price; an overflowing second moment
        // gives an infinite error, not a failed price.
        let std_error = if n_paths == 1 {
            0.0
        } else if !partial.sum_sq.is_finite() {
            f64::INFINITY
        } else {
            let scaled_sum = partial.sum / self.asset_price;
            let scaled_mean = scaled_sum / n;
            let variance = ((partial.sum_sq - scaled_sum * scaled_mean) / (n - 1.0)).max(0.0);
            self.asset_price * (variance / n).sqrt()
        };

        Ok((mean, std_error))
    }
}

fn overflow(index: usize, value: f64) -> PricingError {
    PricingError::NumericOverflow {
        index,
        message: format!("discounted payoff is {}", value),
    }
}

/// Running sums of discounted payoffs for one instrument.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PartialSum {
    /// Σ payoff
    pub sum: f64,
    /// Σ (payoff / asset_price)²
    pub sum_sq: f64,
    /// Number of paths accumulated.
    pub count: usize,
}

impl PartialSum {
    /// Adds another partial sum into this one.
    #[inline]
    pub fn merge(&mut self, other: &PartialSum) {
        self.sum += other.sum;
        self.sum_sq += other.sum_sq;
        self.count += other.count;
    }
}

/// Simulates `paths` of one instrument and returns their partial sums.
///
/// `buffer` must hold at least `min(BLOCK_SIZE, paths.len())` elements. A
/// range starting mid-block recreates that block's stream and skips the
/// draws belonging to earlier paths.
///
/// # Errors
///
/// - `PricingError::Cancelled` if the token fires between blocks
/// - `PricingError::NumericOverflow` if a payoff or the payoff sum is not
///   finite
pub(crate) fn simulate_paths<F: StreamFactory>(
    streams: &F,
    index: usize,
    kernel: &TerminalKernel,
    paths: Range<usize>,
    buffer: &mut [f64],
    cancellation: Option<&CancellationToken>,
) -> Result<PartialSum, PricingError> {
    let mut acc = PartialSum::default();
    let mut path = paths.start;

    while path < paths.end {
        if cancellation.is_some_and(CancellationToken::is_cancelled) {
            return Err(PricingError::Cancelled);
        }

        let block = path / BLOCK_SIZE;
        let offset = path % BLOCK_SIZE;
        let block_end = ((block + 1) * BLOCK_SIZE).min(paths.end);
        let len = block_end - path;

        let mut source = streams.stream(index, block);
        if offset > 0 {
            source.skip(offset);
        }

        let draws = &mut buffer[..len];
        source.fill_standard_normal(draws);

        let scale = kernel.asset_price.recip();
        let mut block_sum = 0.0;
        let mut block_sum_sq = 0.0;
        for &z in draws.iter() {
            let payoff = kernel.discounted_payoff(z);
            let scaled = payoff * scale;
            block_sum += payoff;
            block_sum_sq += scaled * scaled;
        }

        // A non-finite payoff propagates into the sum
        if !block_sum.is_finite() {
            return Err(PricingError::NumericOverflow {
                index,
                message: format!(
                    "payoff sum over paths {}..{} is not finite",
                    path, block_end
                ),
            });
        }

        acc.sum += block_sum;
        acc.sum_sq += block_sum_sq;
        acc.count += len;
        path = block_end;
    }

    Ok(acc)
}
