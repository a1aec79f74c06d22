//! Loader error types.

use std::path::PathBuf;

use pricer_core::types::PricingError;
use thiserror::Error;

/// Errors raised while reading instruments or writing prices.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// The file could not be opened or created.
    #[error("Cannot access {path}: {source}")]
    Io {
        /// Offending path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV or a row that does not deserialise.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A row parsed but violates the instrument invariants.
    #[error("Invalid row at line {line}: {source}")]
    InvalidRow {
        /// 1-based line number in the input, header included.
        line: u64,
        /// The violated invariant.
        #[source]
        source: PricingError,
    },

    /// Prices and instruments have different lengths.
    #[error("Length mismatch: {instruments} instruments but {prices} prices")]
    LengthMismatch {
        /// Number of instruments.
        instruments: usize,
        /// Number of prices.
        prices: usize,
    },
}
