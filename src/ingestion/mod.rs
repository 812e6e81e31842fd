//! Ingestion entrypoints.
//!
//! Uploaded files arrive as raw byte buffers with a caller-declared
//! [`SourceFormat`]; [`read_table`] turns them into an in-memory
//! [`crate::types::Table`].
//!
//! Format-specific functions are also available under:
//! - [`csv`]
//! - [`excel`]

pub mod csv;
pub mod excel;

use crate::error::ProcessingResult;
use crate::types::Table;

pub use csv::read_csv_table;
pub use excel::read_excel_table;

/// Declared format of an uploaded byte buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Comma-separated values.
    Csv,
    /// Spreadsheet/workbook formats.
    Excel,
}

/// Parse the declared format into a [`Table`].
pub fn read_table(bytes: &[u8], format: SourceFormat) -> ProcessingResult<Table> {
    match format {
        SourceFormat::Csv => read_csv_table(bytes),
        SourceFormat::Excel => read_excel_table(bytes),
    }
}
