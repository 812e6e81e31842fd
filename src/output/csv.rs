//! Delimited-text serialization.

use crate::error::{ProcessingError, ProcessingResult};
use crate::types::Table;

/// Serialize a [`Table`] back to delimited-text bytes: header line first,
/// rows in order, empty cells as empty fields.
pub fn write_csv(table: &Table) -> ProcessingResult<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());

    wtr.write_record(&table.columns)?;
    for row in &table.rows {
        wtr.write_record(row.iter().map(|cell| cell.to_text()))?;
    }

    wtr.flush()?;
    wtr.into_inner()
        .map_err(|e| ProcessingError::Io(e.into_error()))
}
