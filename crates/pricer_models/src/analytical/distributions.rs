//! Standard normal distribution functions.
//!
//! `norm_cdf` evaluates the error function identity
//! `Φ(x) = 0.5·(1 + erf(x/√2))` with the `erf` from `statrs`, which is
//! accurate to roughly 1e-11 absolute.

use statrs::function::erf::erf;

/// Standard normal cumulative distribution function.
///
/// Computes P(X <= x) where X ~ N(0, 1).
///
/// # Mathematical Definition
/// Φ(x) = (1/2) · (1 + erf(x / √2))
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0) - 0.5).abs() < 1e-15);
/// assert!(norm_cdf(-3.0) < 0.01);
/// assert!(norm_cdf(3.0) > 0.99);
/// ```
#[inline]
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x / std::f64::consts::SQRT_2))
}
