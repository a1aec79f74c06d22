//! Analytical pricing formulas for European options.
//!
//! This module provides closed-form solutions for option pricing:
//! - Black-Scholes model for lognormal dynamics
//! - The standard normal CDF
//!
//! ## Design Principles
//!
//! - **CDF via erf**: `N(x) = 0.5·(1 + erf(x/√2))`
//! - **Defined limits**: zero `σ√T` falls back to the discounted intrinsic value

pub mod black_scholes;
pub mod distributions;

// Re-export main types at module level
pub use black_scholes::{analytic_price, call_price, BlackScholes};
pub use distributions::norm_cdf;
