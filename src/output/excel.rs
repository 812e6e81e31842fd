//! Spreadsheet serialization.

use rust_xlsxwriter::Workbook;

use crate::error::{ProcessingError, ProcessingResult};
use crate::types::{Cell, Table};

/// Serialize a [`Table`] to workbook bytes: one sheet, header row first,
/// numeric cells written as numbers, empty cells left blank.
pub fn write_excel(table: &Table) -> ProcessingResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let ws = workbook.add_worksheet();

    for (col, name) in table.columns.iter().enumerate() {
        ws.write_string(0, column_number(col)?, name)?;
    }

    for (r, row) in table.rows.iter().enumerate() {
        let out_row = (r + 1) as u32;
        for (c, cell) in row.iter().enumerate() {
            let out_col = column_number(c)?;
            match cell {
                Cell::Empty => {}
                Cell::Number(n) => {
                    ws.write_number(out_row, out_col, *n)?;
                }
                Cell::Text(s) => {
                    ws.write_string(out_row, out_col, s)?;
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn column_number(index: usize) -> ProcessingResult<u16> {
    u16::try_from(index).map_err(|_| ProcessingError::Parse {
        message: format!("column index {index} exceeds the spreadsheet column limit"),
    })
}

#[cfg(test)]
mod tests {
    use super::write_excel;
    use crate::ingestion::read_excel_table;
    use crate::types::{Cell, Table};

    #[test]
    fn output_reads_back_as_the_same_table() {
        let table = Table::new(
            vec!["UPCCASE".to_string(), "Cost".to_string()],
            vec![
                vec![Cell::Text("12345678901".to_string()), Cell::Number(4.5)],
                vec![Cell::Empty, Cell::Number(2.0)],
            ],
        );

        let bytes = write_excel(&table).unwrap();
        let read_back = read_excel_table(&bytes).unwrap();

        assert_eq!(read_back.columns, table.columns);
        assert_eq!(read_back.rows, table.rows);
    }
}
