//! Market state shared by all instruments in a pricing call.

use super::error::PricingError;

/// Flat market: a single annualised, continuously compounded risk-free rate.
///
/// The rate may take any finite sign.
///
/// # Examples
/// ```
/// use pricer_core::types::Market;
///
/// let market = Market::new(0.02);
/// assert!((market.discount_factor(0.5) - (-0.01_f64).exp()).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Market {
    /// Risk-free rate (r).
    pub rate: f64,
}

impl Market {
    /// Creates a market with the given rate.
    #[inline]
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }

    /// Discount factor `exp(-r·T)` for a maturity in years.
    #[inline]
    pub fn discount_factor(&self, maturity: f64) -> f64 {
        (-self.rate * maturity).exp()
    }

    /// Checks the rate is finite.
    ///
    /// # Errors
    /// `PricingError::InvalidInput` for NaN or infinite rates.
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.rate.is_finite() {
            Ok(())
        } else {
            Err(PricingError::InvalidInput(format!(
                "rate must be finite, got {}",
                self.rate
            )))
        }
    }
}
