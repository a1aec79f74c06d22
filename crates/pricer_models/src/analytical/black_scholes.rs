//! Black-Scholes pricing model for European call options.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//!
//! Where:
//! - d₁ = (T·(r + σ²/2) + ln(S/K)) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! When σ√T = 0 the division is undefined and the price is the discounted
//! intrinsic value e^(-rT)·max(S - K, 0).

use pricer_core::types::{Instrument, InstrumentTable, Market, PricingError, PricingResult};
use tracing::debug;

use super::distributions::norm_cdf;

/// Computes d₁ and d₂, or `None` when σ√T is zero.
#[inline]
pub fn d1_d2(instrument: &Instrument, rate: f64) -> Option<(f64, f64)> {
    let var_factor = instrument.var_factor();
    if var_factor == 0.0 {
        return None;
    }

    let half_var = 0.5 * instrument.sigma * instrument.sigma;
    let log_moneyness = (instrument.asset_price / instrument.strike).ln();
    let d1 = (instrument.maturity * (rate + half_var) + log_moneyness) / var_factor;

    Some((d1, d1 - var_factor))
}

/// Closed-form call price for one instrument, without validation.
///
/// # Examples
/// ```
/// use pricer_core::types::Instrument;
/// use pricer_models::analytical::call_price;
///
/// let price = call_price(&Instrument::new(100.0, 102.0, 0.2, 0.5), 0.02);
/// assert!((price - 7.288151).abs() < 1e-6);
/// ```
#[inline]
pub fn call_price(instrument: &Instrument, rate: f64) -> f64 {
    let discount = (-rate * instrument.maturity).exp();

    match d1_d2(instrument, rate) {
        Some((d1, d2)) => {
            norm_cdf(d1) * instrument.asset_price - norm_cdf(d2) * instrument.strike * discount
        }
        None => discount * (instrument.asset_price - instrument.strike).max(0.0),
    }
}

/// Black-Scholes pricer over an instrument table.
///
/// # Examples
/// ```
/// use pricer_core::types::{Instrument, InstrumentTable, Market};
/// use pricer_models::analytical::BlackScholes;
///
/// let table = InstrumentTable::from_instruments([Instrument::new(100.0, 102.0, 0.2, 0.5)]);
/// let result = BlackScholes::new(Market::new(0.02)).price(&table).unwrap();
///
/// assert!((result.option_prices[0] - 7.288151).abs() < 1e-6);
/// assert!(result.std_errors.is_none());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BlackScholes {
    market: Market,
}

impl BlackScholes {
    /// Creates a pricer for the given market.
    #[inline]
    pub fn new(market: Market) -> Self {
        Self { market }
    }

    /// Returns the market.
    #[inline]
    pub fn market(&self) -> Market {
        self.market
    }

    /// Prices a single instrument after validating it.
    ///
    /// # Arguments
    /// * `instrument` - Contract to price
    /// * `index` - Row index used in error reports
    ///
    /// # Errors
    /// - `PricingError::InvalidInput` for malformed instruments
    /// - `PricingError::NumericOverflow` if the price is not finite
    pub fn price_instrument(
        &self,
        instrument: &Instrument,
        index: usize,
    ) -> Result<f64, PricingError> {
        instrument.validate(index)?;

        let price = call_price(instrument, self.market.rate);
        if !price.is_finite() {
            return Err(PricingError::NumericOverflow {
                index,
                message: format!("analytic price is {}", price),
            });
        }

        Ok(price)
    }

    /// Prices every instrument of the table, in row order.
    ///
    /// # Errors
    /// The first error encountered; no partial result is returned.
    pub fn price(&self, instruments: &InstrumentTable) -> Result<PricingResult, PricingError> {
        self.market.validate()?;

        let prices = instruments
            .iter()
            .enumerate()
            .map(|(index, instrument)| self.price_instrument(&instrument, index))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            n_instruments = instruments.len(),
            rate = self.market.rate,
            "analytic pricing complete"
        );

        Ok(PricingResult::new(prices))
    }
}

/// Prices every instrument with the closed-form formula.
///
/// # Errors
/// `PricingError::InvalidInput` if any instrument has a non-positive strike
/// or asset price (or other malformed field).
pub fn analytic_price(
    instruments: &InstrumentTable,
    rate: f64,
) -> Result<PricingResult, PricingError> {
    BlackScholes::new(Market::new(rate)).price(instruments)
}
