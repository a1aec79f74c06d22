//! European call contracts and the columnar instrument table.
//!
//! An [`InstrumentTable`] stores its contracts column-wise (one `Vec<f64>`
//! per field), matching the tabular source it is usually loaded from.
//! Pricers borrow the table read-only and return prices aligned with its
//! row order.

use super::error::PricingError;

/// A single European call option contract.
///
/// # Invariants
/// - `strike > 0` and `asset_price > 0`
/// - `sigma >= 0` and `maturity >= 0`; zero is degenerate but valid
///   (the payoff becomes deterministic)
/// - all fields finite
///
/// Construction does not check these; [`Instrument::validate`] does, and
/// every pricer calls it before simulating.
///
/// # Examples
/// ```
/// use pricer_core::types::Instrument;
///
/// let option = Instrument::new(100.0, 102.0, 0.2, 0.5);
/// assert!(option.validate(0).is_ok());
///
/// let bad = Instrument::new(0.0, 102.0, 0.2, 0.5);
/// assert!(bad.validate(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instrument {
    /// Strike price (K).
    pub strike: f64,
    /// Current price of the underlying (S).
    pub asset_price: f64,
    /// Annualised volatility (σ).
    pub sigma: f64,
    /// Time to maturity in years (T).
    pub maturity: f64,
}

impl Instrument {
    /// Creates a new instrument.
    #[inline]
    pub fn new(strike: f64, asset_price: f64, sigma: f64, maturity: f64) -> Self {
        Self {
            strike,
            asset_price,
            sigma,
            maturity,
        }
    }

    /// Returns `σ√T`, the standard deviation of the log terminal price.
    #[inline]
    pub fn var_factor(&self) -> f64 {
        self.sigma * self.maturity.sqrt()
    }

    /// Checks the instrument invariants.
    ///
    /// # Arguments
    /// * `index` - Row index reported in the error message
    ///
    /// # Errors
    /// `PricingError::InvalidInput` naming the first violated field.
    pub fn validate(&self, index: usize) -> Result<(), PricingError> {
        let fields = [
            ("strike", self.strike),
            ("asset_price", self.asset_price),
            ("sigma", self.sigma),
            ("maturity", self.maturity),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(PricingError::InvalidInput(format!(
                    "instrument {}: {} must be finite, got {}",
                    index, name, value
                )));
            }
        }

        if self.strike <= 0.0 {
            return Err(PricingError::InvalidInput(format!(
                "instrument {}: strike must be positive, got {}",
                index, self.strike
            )));
        }
        if self.asset_price <= 0.0 {
            return Err(PricingError::InvalidInput(format!(
                "instrument {}: asset_price must be positive, got {}",
                index, self.asset_price
            )));
        }
        if self.sigma < 0.0 {
            return Err(PricingError::InvalidInput(format!(
                "instrument {}: sigma must be non-negative, got {}",
                index, self.sigma
            )));
        }
        if self.maturity < 0.0 {
            return Err(PricingError::InvalidInput(format!(
                "instrument {}: maturity must be non-negative, got {}",
                index, self.maturity
            )));
        }

        Ok(())
    }
}

/// Immutable, ordered, column-oriented collection of instruments.
///
/// Columns always have equal length. The table performs no field
/// validation on construction; see [`InstrumentTable::validate`].
///
/// # Examples
/// ```
/// use pricer_core::types::InstrumentTable;
///
/// let table = InstrumentTable::from_columns(
///     vec![100.0, 110.0],
///     vec![102.0, 100.0],
///     vec![0.2, 0.25],
///     vec![0.5, 1.0],
/// )
/// .unwrap();
///
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.strikes(), &[100.0, 110.0]);
///
/// // Column lengths must agree
/// assert!(InstrumentTable::from_columns(vec![1.0], vec![], vec![], vec![]).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstrumentTable {
    strike: Vec<f64>,
    asset_price: Vec<f64>,
    sigma: Vec<f64>,
    maturity: Vec<f64>,
}

impl InstrumentTable {
    /// Builds a table from its four columns.
    ///
    /// # Errors
    /// `PricingError::InvalidInput` if the columns differ in length.
    pub fn from_columns(
        strike: Vec<f64>,
        asset_price: Vec<f64>,
        sigma: Vec<f64>,
        maturity: Vec<f64>,
    ) -> Result<Self, PricingError> {
        let n = strike.len();
        if asset_price.len() != n || sigma.len() != n || maturity.len() != n {
            return Err(PricingError::InvalidInput(format!(
                "column lengths differ: strike={}, asset_price={}, sigma={}, maturity={}",
                n,
                asset_price.len(),
                sigma.len(),
                maturity.len()
            )));
        }

        Ok(Self {
            strike,
            asset_price,
            sigma,
            maturity,
        })
    }

    /// Builds a table from instruments in iteration order.
    pub fn from_instruments<I>(instruments: I) -> Self
    where
        I: IntoIterator<Item = Instrument>,
    {
        instruments.into_iter().collect()
    }

    /// Returns the number of instruments.
    #[inline]
    pub fn len(&self) -> usize {
        self.strike.len()
    }

    /// Returns `true` if the table holds no instruments.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strike.is_empty()
    }

    /// Returns the instrument at `index`, if any.
    #[inline]
    pub fn get(&self, index: usize) -> Option<Instrument> {
        if index >= self.len() {
            return None;
        }
        Some(Instrument {
            strike: self.strike[index],
            asset_price: self.asset_price[index],
            sigma: self.sigma[index],
            maturity: self.maturity[index],
        })
    }

    /// Iterates over the instruments in row order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Instrument> + '_ {
        (0..self.len()).map(move |i| Instrument {
            strike: self.strike[i],
            asset_price: self.asset_price[i],
            sigma: self.sigma[i],
            maturity: self.maturity[i],
        })
    }

    /// Strike column.
    #[inline]
    pub fn strikes(&self) -> &[f64] {
        &self.strike
    }

    /// Asset price column.
    #[inline]
    pub fn asset_prices(&self) -> &[f64] {
        &self.asset_price
    }

    /// Volatility column.
    #[inline]
    pub fn sigmas(&self) -> &[f64] {
        &self.sigma
    }

    /// Maturity column.
    #[inline]
    pub fn maturities(&self) -> &[f64] {
        &self.maturity
    }

    /// Validates every row, reporting the first invalid one.
    ///
    /// # Errors
    /// `PricingError::InvalidInput` from [`Instrument::validate`].
    pub fn validate(&self) -> Result<(), PricingError> {
        self.iter()
            .enumerate()
            .try_for_each(|(index, instrument)| instrument.validate(index))
    }
}

impl FromIterator<Instrument> for InstrumentTable {
    fn from_iter<I: IntoIterator<Item = Instrument>>(iter: I) -> Self {
        let mut table = InstrumentTable::default();
        for instrument in iter {
            table.strike.push(instrument.strike);
            table.asset_price.push(instrument.asset_price);
            table.sigma.push(instrument.sigma);
            table.maturity.push(instrument.maturity);
        }
        table
    }
}
