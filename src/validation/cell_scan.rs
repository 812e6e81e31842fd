//! Positional cell-by-cell workbook pass.
//!
//! Unlike the table path, this pass never builds a [`crate::types::Table`]:
//! it walks the first sheet's cells directly, applies the letter rule to the
//! first 19 columns of each data row, and writes the summary into fixed
//! column 20 (whose header cell is rewritten to `ValidationErrors`). The
//! original cell values are copied through untouched.
//!
//! Processing is capped: data rows past the cap are copied to the output but
//! left unannotated. This is a documented limitation, not a failure.

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::error::{ProcessingError, ProcessingResult};
use crate::ingestion::excel::data_text;

use super::rules::{DEFAULT_SCAN_WIDTH, ERRORS_COLUMN, MESSAGE_SEPARATOR};

/// 0-based index of the fixed summary column (column 20, "T").
pub const SUMMARY_COLUMN: u16 = 19;

/// Maximum number of data rows the pass annotates.
pub const DEFAULT_ROW_CAP: usize = 100_000;

/// Result of a positional pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellScanOutcome {
    /// The rewritten workbook.
    pub bytes: Vec<u8>,
    /// Number of data rows that were scanned and annotated.
    pub annotated_rows: usize,
    /// Whether the row cap cut annotation short.
    pub capped: bool,
}

/// Scan the first sheet of a workbook cell by cell, annotating at most
/// `row_cap` data rows.
pub fn scan_worksheet_cells(bytes: &[u8], row_cap: usize) -> ProcessingResult<CellScanOutcome> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ProcessingError::Parse {
            message: "workbook has no sheets".to_string(),
        })?;
    let range = workbook.worksheet_range(&sheet)?;
    if range.is_empty() {
        return Err(ProcessingError::Parse {
            message: format!("sheet '{sheet}' has no header row"),
        });
    }
    let (row_offset, col_offset) = range.start().unwrap_or((0, 0));

    let mut out = Workbook::new();
    let ws = out.add_worksheet();
    ws.set_name(&sheet)?;

    let mut header_names: Vec<String> = Vec::new();
    let mut annotated_rows = 0usize;
    let mut capped = false;

    for (idx, row) in range.rows().enumerate() {
        let out_row = row_offset + idx as u32;

        for (j, cell) in row.iter().enumerate() {
            let out_col = column_number(col_offset as usize + j)?;
            copy_cell(ws, out_row, out_col, cell)?;
        }

        if idx == 0 {
            header_names = row
                .iter()
                .take(DEFAULT_SCAN_WIDTH)
                .map(data_text)
                .collect();
            ws.write_string(out_row, SUMMARY_COLUMN, ERRORS_COLUMN)?;
            continue;
        }

        if annotated_rows >= row_cap {
            capped = true;
            continue;
        }
        annotated_rows += 1;

        let mut messages: Vec<String> = Vec::new();
        for (j, cell) in row.iter().take(DEFAULT_SCAN_WIDTH).enumerate() {
            if matches!(cell, Data::Empty) {
                continue;
            }
            if data_text(cell).chars().any(|c| c.is_ascii_alphabetic()) {
                let name = header_names.get(j).cloned().unwrap_or_default();
                messages.push(format!("{name}: contains alphabets"));
            }
        }
        ws.write_string(out_row, SUMMARY_COLUMN, messages.join(MESSAGE_SEPARATOR))?;
    }

    Ok(CellScanOutcome {
        bytes: out.save_to_buffer()?,
        annotated_rows,
        capped,
    })
}

fn column_number(index: usize) -> ProcessingResult<u16> {
    u16::try_from(index).map_err(|_| ProcessingError::Parse {
        message: format!("column index {index} exceeds the spreadsheet column limit"),
    })
}

fn copy_cell(
    ws: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Data,
) -> ProcessingResult<()> {
    match cell {
        Data::Empty => {}
        Data::String(s) => {
            ws.write_string(row, col, s)?;
        }
        Data::Int(i) => {
            ws.write_number(row, col, *i as f64)?;
        }
        Data::Float(f) => {
            ws.write_number(row, col, *f)?;
        }
        Data::Bool(b) => {
            ws.write_boolean(row, col, *b)?;
        }
        Data::DateTime(dt) => {
            ws.write_number(row, col, dt.as_f64())?;
        }
        Data::DateTimeIso(s) | Data::DurationIso(s) => {
            ws.write_string(row, col, s)?;
        }
        Data::Error(e) => {
            ws.write_string(row, col, format!("{e:?}"))?;
        }
    }
    Ok(())
}
