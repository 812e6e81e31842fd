//! Delimited-text ingestion.

use crate::error::{ProcessingError, ProcessingResult};
use crate::types::{Cell, Table};

/// Read a delimited-text byte buffer into an in-memory [`Table`].
///
/// Rules:
///
/// - The first line is the header; column order is the order encountered.
/// - Every cell ingests as [`Cell::Text`], or [`Cell::Empty`] when blank.
/// - Ragged records are tolerated: short rows pad with empty cells, long
///   rows drop fields beyond the header width.
pub fn read_csv_table(bytes: &[u8]) -> ProcessingResult<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);
    read_csv_table_from_reader(&mut rdr)
}

/// Read delimited text from an existing CSV reader.
pub fn read_csv_table_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
) -> ProcessingResult<Table> {
    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(ProcessingError::Parse {
            message: "file has no header row".to_string(),
        });
    }

    let columns: Vec<String> = headers.iter().map(str::to_string).collect();
    let width = columns.len();

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let mut row: Vec<Cell> = Vec::with_capacity(width);
        for idx in 0..width {
            row.push(field_to_cell(record.get(idx)));
        }
        rows.push(row);
    }

    Ok(Table::new(columns, rows))
}

fn field_to_cell(raw: Option<&str>) -> Cell {
    match raw {
        None => Cell::Empty,
        Some(s) if s.trim().is_empty() => Cell::Empty,
        Some(s) => Cell::Text(s.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::read_csv_table;
    use crate::types::Cell;

    #[test]
    fn reads_header_and_rows_in_order() {
        let input = b"UPCCASE,Division\n12345678901,Grocery\n,Frozen\n";
        let table = read_csv_table(input).unwrap();

        assert_eq!(table.columns, vec!["UPCCASE", "Division"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(
            table.rows[0],
            vec![
                Cell::Text("12345678901".to_string()),
                Cell::Text("Grocery".to_string()),
            ]
        );
        assert_eq!(table.rows[1][0], Cell::Empty);
    }

    #[test]
    fn pads_short_rows_and_truncates_long_rows() {
        let input = b"a,b,c\n1\n1,2,3,4\n";
        let table = read_csv_table(input).unwrap();

        assert_eq!(table.rows[0].len(), 3);
        assert_eq!(table.rows[0][1], Cell::Empty);
        assert_eq!(table.rows[1].len(), 3);
        assert_eq!(table.rows[1][2], Cell::Text("3".to_string()));
    }

    #[test]
    fn whitespace_only_fields_ingest_as_empty() {
        let table = read_csv_table(b"a,b\n  ,x\n").unwrap();
        assert_eq!(table.rows[0][0], Cell::Empty);
        assert_eq!(table.rows[0][1], Cell::Text("x".to_string()));
    }

    #[test]
    fn empty_input_is_a_parse_error() {
        let err = read_csv_table(b"").unwrap_err();
        assert!(err.to_string().contains("no header row"));
    }
}
