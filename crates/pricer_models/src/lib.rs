//! # Pricer Models (L2: Reference Formulas)
//!
//! Closed-form Black-Scholes-Merton pricing for European calls.
//!
//! This crate provides:
//! - The standard normal CDF on top of the `statrs` error function
//! - The analytic pricer that serves as ground truth for the Monte Carlo
//!   engine in `pricer_pricing`
//!
//! ## Design Principles
//!
//! - **One formula**: a single closed-form implementation for every caller
//! - **Pure functions**: no state survives a pricing call
//! - **Validated inputs**: malformed instruments are rejected, never corrected

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;

pub use analytical::{analytic_price, BlackScholes};
