//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors from analytic and Monte Carlo pricing operations

use thiserror::Error;

/// Categorised pricing errors.
///
/// Every pricer call either returns a complete result or exactly one of
/// these errors; there are no partial results.
///
/// # Variants
/// - `InvalidInput`: Malformed instrument fields or non-positive path/worker counts
/// - `WorkerFailure`: One or more parallel work chunks terminated abnormally
/// - `NumericOverflow`: A simulated or analytic value left the finite range
/// - `Cancelled`: Cooperative cancellation was requested
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidInput("n_paths must be positive".to_string());
/// assert_eq!(format!("{}", err), "Invalid input: n_paths must be positive");
///
/// let err = PricingError::WorkerFailure {
///     chunks: vec![1, 3],
///     message: "allocation failed".to_string(),
/// };
/// assert!(format!("{}", err).contains("[1, 3]"));
/// ```
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PricingError {
    /// Invalid input data or parameters.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Parallel worker failure, aggregated over every failed chunk.
    #[error("Worker failure in chunk(s) {chunks:?}: {message}")]
    WorkerFailure {
        /// Indices of the chunks that failed, ascending.
        chunks: Vec<usize>,
        /// Failure descriptions joined in chunk order.
        message: String,
    },

    /// Non-finite value produced for an instrument.
    #[error("Numeric overflow for instrument {index}: {message}")]
    NumericOverflow {
        /// Row index of the offending instrument.
        index: usize,
        /// Description of the overflowing quantity.
        message: String,
    },

    /// Pricing was cancelled before completion.
    #[error("Pricing cancelled")]
    Cancelled,
}

impl PricingError {
    /// Returns `true` for [`PricingError::InvalidInput`].
    #[inline]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, PricingError::InvalidInput(_))
    }
}
