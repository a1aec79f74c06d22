//! Price command implementation
//!
//! Prices an instrument CSV and writes it back with an `option_price` column.

use std::path::Path;
use std::time::Instant;

use adapter_loader::{load_instruments, save_prices, write_prices};
use tracing::info;

use super::{price_with, Method};
use crate::config::PricerConfig;
use crate::Result;

/// Run the price command
pub fn run(
    input: &Path,
    method: Method,
    output: Option<&Path>,
    config: &PricerConfig,
) -> Result<()> {
    let instruments = load_instruments(input)?;
    info!(
        input = %input.display(),
        n_instruments = instruments.len(),
        %method,
        "Starting pricing"
    );

    let start = Instant::now();
    let result = price_with(method, &instruments, config)?;
    info!(elapsed_ms = start.elapsed().as_millis() as u64, "Pricing complete");

    match output {
        Some(path) => {
            save_prices(path, &instruments, &result)?;
            info!(output = %path.display(), "Prices written");
        }
        None => write_prices(std::io::stdout().lock(), &instruments, &result)?,
    }

    Ok(())
}
