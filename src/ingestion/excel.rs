//! Spreadsheet ingestion.

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};

use crate::error::{ProcessingError, ProcessingResult};
use crate::types::{Cell, Table};

/// Read a spreadsheet byte buffer (`.xlsx`, `.xls`, `.ods`, ...) into an
/// in-memory [`Table`].
///
/// Behavior:
/// - Uses the first sheet in the workbook.
/// - The first row of the used range is the header row.
/// - Numeric and date cells ingest as [`Cell::Number`]; everything else keeps
///   its textual form.
pub fn read_excel_table(bytes: &[u8]) -> ProcessingResult<Table> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ProcessingError::Parse {
            message: "workbook has no sheets".to_string(),
        })?;
    let range = workbook.worksheet_range(&sheet)?;

    let mut rows_iter = range.rows();
    let header = rows_iter.next().ok_or_else(|| ProcessingError::Parse {
        message: format!("sheet '{sheet}' has no header row"),
    })?;

    let columns: Vec<String> = header.iter().map(data_text).collect();
    if columns.is_empty() {
        return Err(ProcessingError::Parse {
            message: format!("sheet '{sheet}' has no header row"),
        });
    }
    let width = columns.len();

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    for row in rows_iter {
        let mut out_row: Vec<Cell> = Vec::with_capacity(width);
        for idx in 0..width {
            out_row.push(convert_cell(row.get(idx).unwrap_or(&Data::Empty)));
        }
        rows.push(out_row);
    }

    Ok(Table::new(columns, rows))
}

/// Textual form of a raw sheet cell, however it was typed.
pub(crate) fn data_text(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => crate::types::number_text(*f),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{e:?}"),
        Data::Empty => String::new(),
    }
}

pub(crate) fn convert_cell(c: &Data) -> Cell {
    match c {
        Data::Empty => Cell::Empty,
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::String(s) if s.trim().is_empty() => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTimeIso(s) => Cell::Text(s.clone()),
        Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Text(format!("{e:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::{convert_cell, data_text};
    use crate::types::Cell;
    use calamine::Data;

    #[test]
    fn numeric_cells_keep_their_value() {
        assert_eq!(convert_cell(&Data::Int(42)), Cell::Number(42.0));
        assert_eq!(convert_cell(&Data::Float(1.5)), Cell::Number(1.5));
    }

    #[test]
    fn blank_strings_ingest_as_empty() {
        assert_eq!(convert_cell(&Data::String("  ".to_string())), Cell::Empty);
        assert_eq!(convert_cell(&Data::Empty), Cell::Empty);
    }

    #[test]
    fn numeric_headers_render_without_fraction() {
        assert_eq!(data_text(&Data::Float(7.0)), "7");
        assert_eq!(data_text(&Data::String("Division".to_string())), "Division");
    }
}
