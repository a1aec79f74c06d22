//! CSV price writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use pricer_core::types::{InstrumentTable, PricingResult};
use serde::Serialize;

use crate::error::LoaderError;

const HEADER: [&str; 5] = ["strike", "asset_price", "sigma", "maturity", "option_price"];

#[derive(Serialize)]
struct PricedRow {
    strike: f64,
    asset_price: f64,
    sigma: f64,
    maturity: f64,
    option_price: f64,
}

/// Writes the instruments with an appended `option_price` column.
///
/// A header row is always written, even for an empty table.
///
/// # Errors
///
/// - `LoaderError::LengthMismatch` if `result` does not have one price per
///   instrument
/// - `LoaderError::Csv` if writing fails
pub fn write_prices<W: Write>(
    writer: W,
    instruments: &InstrumentTable,
    result: &PricingResult,
) -> Result<(), LoaderError> {
    if instruments.len() != result.len() {
        return Err(LoaderError::LengthMismatch {
            instruments: instruments.len(),
            prices: result.len(),
        });
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    writer.write_record(HEADER)?;

    for (instrument, &option_price) in instruments.iter().zip(&result.option_prices) {
        writer.serialize(PricedRow {
            strike: instrument.strike,
            asset_price: instrument.asset_price,
            sigma: instrument.sigma,
            maturity: instrument.maturity,
            option_price,
        })?;
    }

    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Writes priced instruments to a CSV file, replacing it if present.
///
/// # Errors
///
/// `LoaderError::Io` if the file cannot be created, otherwise as
/// [`write_prices`].
pub fn save_prices<P: AsRef<Path>>(
    path: P,
    instruments: &InstrumentTable,
    result: &PricingResult,
) -> Result<(), LoaderError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| LoaderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_prices(file, instruments, result)
}
