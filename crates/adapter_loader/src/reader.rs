//! CSV instrument reader.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use pricer_core::types::{Instrument, InstrumentTable};
use tracing::debug;

use crate::error::LoaderError;

/// Loads and validates instruments from a CSV file.
///
/// # Errors
///
/// - `LoaderError::Io` if the file cannot be opened
/// - `LoaderError::Csv` for malformed CSV or missing columns
/// - `LoaderError::InvalidRow` for rows violating the instrument invariants
pub fn load_instruments<P: AsRef<Path>>(path: P) -> Result<InstrumentTable, LoaderError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoaderError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let table = read_instruments(file)?;
    debug!(path = %path.display(), n_instruments = table.len(), "loaded instruments");
    Ok(table)
}

/// Reads and validates instruments from any CSV source.
///
/// # Errors
///
/// Same as [`load_instruments`], minus the I/O variant.
pub fn read_instruments<R: Read>(reader: R) -> Result<InstrumentTable, LoaderError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let mut record = csv::StringRecord::new();
    let mut instruments = Vec::new();

    while reader.read_record(&mut record)? {
        let index = instruments.len();
        let instrument: Instrument = record.deserialize(Some(&headers))?;
        instrument.validate(index).map_err(|source| LoaderError::InvalidRow {
            // Quoted fields may span lines, so take the reader's position
            line: record.position().map_or(index as u64 + 2, csv::Position::line),
            source,
        })?;
        instruments.push(instrument);
    }

    Ok(InstrumentTable::from_instruments(instruments))
}
