//! Pricing output aligned with the instrument table.

/// Option prices, one per instrument, in table row order.
///
/// Monte Carlo pricers also report the standard error of each estimate;
/// the analytic pricer leaves `std_errors` empty.
///
/// # Examples
/// ```
/// use pricer_core::types::PricingResult;
///
/// let result = PricingResult::with_std_errors(vec![7.29, 1.05], vec![0.01, 0.004]);
/// assert_eq!(result.len(), 2);
/// assert!((result.confidence_95(0).unwrap() - 0.0196).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingResult {
    /// Present value of each option.
    pub option_prices: Vec<f64>,
    /// Standard error of each estimate (Monte Carlo only).
    pub std_errors: Option<Vec<f64>>,
}

impl PricingResult {
    /// Creates a result without error estimates.
    #[inline]
    pub fn new(option_prices: Vec<f64>) -> Self {
        Self {
            option_prices,
            std_errors: None,
        }
    }

    /// Creates a result with per-instrument standard errors.
    #[inline]
    pub fn with_std_errors(option_prices: Vec<f64>, std_errors: Vec<f64>) -> Self {
        debug_assert_eq!(option_prices.len(), std_errors.len());
        Self {
            option_prices,
            std_errors: Some(std_errors),
        }
    }

    /// Number of priced instruments.
    #[inline]
    pub fn len(&self) -> usize {
        self.option_prices.len()
    }

    /// Returns `true` if no instrument was priced.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.option_prices.is_empty()
    }

    /// Standard error of instrument `index`, if available.
    #[inline]
    pub fn std_error(&self, index: usize) -> Option<f64> {
        self.std_errors.as_ref().and_then(|e| e.get(index).copied())
    }

    /// Returns the 95% confidence interval half-width for instrument `index`.
    #[inline]
    pub fn confidence_95(&self, index: usize) -> Option<f64> {
        self.std_error(index).map(|se| 1.96 * se)
    }
}
