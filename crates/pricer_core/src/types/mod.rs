//! Core pricing data types.
//!
//! This module provides:
//! - `instrument`: Option contract record and the columnar instrument table
//! - `market`: Market state (risk-free rate)
//! - `result`: Per-instrument pricing output
//! - `error`: Structured error type for every pricing operation
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`Instrument`], [`InstrumentTable`] from `instrument`
//! - [`Market`] from `market`
//! - [`PricingResult`] from `result`
//! - [`PricingError`] from `error`

pub mod error;
pub mod instrument;
pub mod market;
pub mod result;

// Re-export commonly used types at module level
pub use error::PricingError;
pub use instrument::{Instrument, InstrumentTable};
pub use market::Market;
pub use result::PricingResult;
