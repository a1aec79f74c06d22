//! # pricer_core: Shared Types for Black-Scholes-Merton Pricing
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace. It owns the data that
//! every pricer borrows and the errors every pricer returns:
//! - Option contracts: [`Instrument`](types::Instrument) and the columnar
//!   [`InstrumentTable`](types::InstrumentTable)
//! - Market state: [`Market`](types::Market) (risk-free rate)
//! - Output: [`PricingResult`](types::PricingResult)
//! - Errors: [`PricingError`](types::PricingError)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::types::{Instrument, InstrumentTable, Market};
//!
//! let table = InstrumentTable::from_instruments([
//!     Instrument::new(100.0, 102.0, 0.2, 0.5),
//!     Instrument::new(90.0, 95.0, 0.3, 1.0),
//! ]);
//! let market = Market::new(0.02);
//!
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.get(1).unwrap().strike, 90.0);
//! assert_eq!(market.rate, 0.02);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for `Instrument`, `Market` and `PricingResult`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod types;
