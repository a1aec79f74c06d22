//! # adapter_loader: CSV Instrument Input and Price Output
//!
//! ## Adapter Role
//!
//! adapter_loader sits outside the pricing layers and converts between CSV
//! files and the columnar [`InstrumentTable`](pricer_core::types::InstrumentTable):
//! - [`load_instruments`] / [`read_instruments`]: parse and validate rows
//! - [`write_prices`]: write the table back with an `option_price` column
//!
//! ## Input Format
//!
//! A header row naming at least `strike`, `asset_price`, `sigma` and
//! `maturity`, in any order. Other columns are ignored.
//!
//! ```text
//! strike,asset_price,sigma,maturity
//! 100,102,0.2,0.5
//! 90,95,0.3,1.0
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use adapter_loader::{read_instruments, write_prices};
//! use pricer_core::types::PricingResult;
//!
//! let input = "strike,asset_price,sigma,maturity\n100,102,0.2,0.5\n";
//! let table = read_instruments(input.as_bytes()).unwrap();
//! assert_eq!(table.len(), 1);
//!
//! let mut output = Vec::new();
//! write_prices(&mut output, &table, &PricingResult::new(vec![7.288151])).unwrap();
//! assert!(String::from_utf8(output).unwrap().contains("option_price"));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod error;
mod reader;
mod writer;

pub use error::LoaderError;
pub use reader::{load_instruments, read_instruments};
pub use writer::{save_prices, write_prices};
