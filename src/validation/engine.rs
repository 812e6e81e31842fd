//! The row validation and statistics engine.
//!
//! [`Validator::annotate`] is a single pass over the table: every rule in the
//! [`RuleSet`] is evaluated for every row, the triggered messages are joined
//! into a `ValidationErrors` summary appended as the final column, and
//! [`FileStatistics`] accumulate in the same pass. Rules never mutate source
//! cells and row order is preserved.

use std::collections::BTreeMap;
use std::time::Instant;

use crate::error::{ProcessingError, ProcessingResult};
use crate::types::{Cell, Table};

use super::rules::{
    ColumnRule, ERRORS_COLUMN, MESSAGE_SEPARATOR, RuleSet, check_digit_code, check_letters,
    check_numeric, check_required,
};
use super::stats::{FileStatistics, ValidationSummary, category_of, round_seconds};

/// Executes a [`RuleSet`] against tables.
#[derive(Debug, Clone)]
pub struct Validator {
    rules: RuleSet,
}

/// A rule resolved against a concrete table. Rules whose column is absent
/// produce no binding and are skipped for the whole run.
#[derive(Debug)]
enum BoundRule {
    Digit {
        index: usize,
        column: String,
        digits: usize,
    },
    Numeric {
        index: usize,
        label: String,
    },
    Required {
        index: usize,
        column: String,
    },
}

impl BoundRule {
    fn index(&self) -> usize {
        match self {
            BoundRule::Digit { index, .. }
            | BoundRule::Numeric { index, .. }
            | BoundRule::Required { index, .. } => *index,
        }
    }

    fn check(&self, cell: &Cell) -> Option<String> {
        match self {
            BoundRule::Digit { column, digits, .. } => check_digit_code(cell, column, *digits),
            BoundRule::Numeric { label, .. } => check_numeric(cell, label),
            BoundRule::Required { column, .. } => check_required(cell, column),
        }
    }
}

impl Validator {
    /// Create a validator for the given rule set.
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// Validate every row of `table`, append the `ValidationErrors` column,
    /// and return the file statistics.
    ///
    /// The only failure mode is a table with no columns; malformed cell
    /// content is reported as violations, never as an error.
    pub fn annotate(&self, table: &mut Table) -> ProcessingResult<FileStatistics> {
        let started = Instant::now();

        if table.columns.is_empty() {
            return Err(ProcessingError::Parse {
                message: "table has no header columns".to_string(),
            });
        }

        let column_names = table.columns.clone();
        let width = column_names.len();
        let bound = self.bind(table);
        let covered: Vec<usize> = bound.iter().map(BoundRule::index).collect();

        let mut empty_counts = vec![0usize; width];
        let mut summaries: Vec<Cell> = Vec::with_capacity(table.row_count());
        let mut rows_with_errors = 0usize;
        let mut total_errors = 0usize;
        let mut error_categories: BTreeMap<String, usize> = BTreeMap::new();

        for row in &table.rows {
            let mut messages: Vec<String> = Vec::new();

            for rule in &bound {
                let cell = row.get(rule.index()).unwrap_or(&Cell::Empty);
                if let Some(message) = rule.check(cell) {
                    messages.push(message);
                }
            }

            for (idx, name) in column_names.iter().enumerate() {
                let cell = row.get(idx).unwrap_or(&Cell::Empty);
                if cell.is_empty() {
                    empty_counts[idx] += 1;
                }
                if self.rules.letter_scan.contains(idx) && !covered.contains(&idx) {
                    if let Some(message) = check_letters(cell, name) {
                        messages.push(message);
                    }
                }
            }

            if messages.is_empty() {
                summaries.push(Cell::Empty);
            } else {
                rows_with_errors += 1;
                total_errors += messages.len();
                for message in &messages {
                    *error_categories
                        .entry(category_of(message).to_string())
                        .or_insert(0) += 1;
                }
                summaries.push(Cell::Text(messages.join(MESSAGE_SEPARATOR)));
            }
        }

        let total_rows = table.row_count();
        table.push_column(ERRORS_COLUMN, summaries);

        let mut empty_cells_by_column: BTreeMap<String, usize> = BTreeMap::new();
        for (name, count) in column_names.iter().zip(&empty_counts) {
            *empty_cells_by_column.entry(name.clone()).or_insert(0) += count;
        }
        let total_empty_cells = empty_counts.iter().sum();

        Ok(FileStatistics {
            total_rows,
            total_columns: width,
            column_names,
            empty_cells_by_column,
            total_empty_cells,
            rows_with_errors,
            validation_summary: ValidationSummary {
                total_errors,
                error_categories,
            },
            processing_time_seconds: round_seconds(started.elapsed().as_secs_f64()),
        })
    }

    /// Resolve the rule table against a concrete table, in rule order.
    fn bind(&self, table: &Table) -> Vec<BoundRule> {
        let mut bound = Vec::with_capacity(self.rules.column_rules.len());
        for rule in &self.rules.column_rules {
            match rule {
                ColumnRule::DigitCode { column, digits } => {
                    if let Some(index) = table.column_index(column) {
                        bound.push(BoundRule::Digit {
                            index,
                            column: column.clone(),
                            digits: *digits,
                        });
                    }
                }
                ColumnRule::NumericByPosition { index, label } => {
                    if *index < table.column_count() {
                        bound.push(BoundRule::Numeric {
                            index: *index,
                            label: label.clone(),
                        });
                    }
                }
                ColumnRule::RequiredText { column } => {
                    if let Some(index) = table.column_index(column) {
                        bound.push(BoundRule::Required {
                            index,
                            column: column.clone(),
                        });
                    }
                }
            }
        }
        bound
    }
}

#[cfg(test)]
mod tests {
    use super::Validator;
    use crate::types::{Cell, Table};
    use crate::validation::rules::{ColumnScope, ERRORS_COLUMN, RuleSet};

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn summary(table: &Table, row: usize) -> String {
        table.cell(row, table.column_count() - 1).to_text()
    }

    #[test]
    fn appends_errors_column_and_counts_rows() {
        let mut table = Table::new(
            vec!["UPCCASE".to_string(), "CICID".to_string()],
            vec![
                vec![text("123"), text("45678")],
                vec![text("12345678901"), text("12345678")],
            ],
        );

        let stats = Validator::new(RuleSet::full()).annotate(&mut table).unwrap();

        assert_eq!(table.columns.last().map(String::as_str), Some(ERRORS_COLUMN));
        assert_eq!(
            summary(&table, 0),
            "UPCCASE: must be exactly 11 digits; CICID: must be exactly 8 digits"
        );
        assert_eq!(summary(&table, 1), "");
        assert_eq!(stats.total_rows, 2);
        assert_eq!(stats.rows_with_errors, 1);
        assert_eq!(stats.validation_summary.total_errors, 2);
        // Pre-annotation shape.
        assert_eq!(stats.total_columns, 2);
        assert_eq!(stats.column_names, vec!["UPCCASE", "CICID"]);
    }

    #[test]
    fn letter_scan_skips_columns_covered_by_named_rules() {
        let mut table = Table::new(
            vec!["UPCCASE".to_string(), "Division".to_string(), "Vendor".to_string()],
            vec![vec![text("abc"), text("Grocery"), text("abc")]],
        );

        Validator::new(RuleSet::full()).annotate(&mut table).unwrap();

        // UPCCASE gets the digit message, Division passes the required check,
        // and only Vendor is letter-scanned.
        assert_eq!(
            summary(&table, 0),
            "UPCCASE: must contain only numbers; Vendor: contains alphabets"
        );
    }

    #[test]
    fn positional_rules_skip_narrow_tables() {
        let mut table = Table::new(
            vec!["a".to_string(), "b".to_string()],
            vec![vec![text("1"), text("2")]],
        );

        let stats = Validator::new(RuleSet::full()).annotate(&mut table).unwrap();
        assert_eq!(stats.rows_with_errors, 0);
    }

    #[test]
    fn letters_only_mode_scans_every_selected_column() {
        let mut table = Table::new(
            vec!["UPCCASE".to_string(), "b".to_string()],
            vec![vec![text("abc"), Cell::Empty]],
        );

        let stats = Validator::new(RuleSet::letters_only(ColumnScope::All))
            .annotate(&mut table)
            .unwrap();

        // Without named rules, UPCCASE is just another scanned column and
        // empty cells never flag.
        assert_eq!(summary(&table, 0), "UPCCASE: contains alphabets");
        assert_eq!(stats.rows_with_errors, 1);
    }

    #[test]
    fn empty_cell_totals_are_consistent() {
        let mut table = Table::new(
            vec!["a".to_string(), "b".to_string()],
            vec![
                vec![Cell::Empty, text("x")],
                vec![Cell::Empty, Cell::Empty],
            ],
        );

        let stats = Validator::new(RuleSet::letters_only(ColumnScope::All))
            .annotate(&mut table)
            .unwrap();

        assert_eq!(stats.empty_cells_by_column.get("a"), Some(&2));
        assert_eq!(stats.empty_cells_by_column.get("b"), Some(&1));
        assert_eq!(
            stats.total_empty_cells,
            stats.empty_cells_by_column.values().sum::<usize>()
        );
    }

    #[test]
    fn zero_column_table_is_rejected() {
        let mut table = Table::new(vec![], vec![]);
        let err = Validator::new(RuleSet::full()).annotate(&mut table).unwrap_err();
        assert!(err.to_string().contains("no header columns"));
    }

    #[test]
    fn header_only_table_yields_zeroed_statistics() {
        let mut table = Table::new(vec!["UPCCASE".to_string()], vec![]);
        let stats = Validator::new(RuleSet::full()).annotate(&mut table).unwrap();

        assert_eq!(stats.total_rows, 0);
        assert_eq!(stats.rows_with_errors, 0);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn duplicate_column_names_accumulate_empty_counts() {
        let mut table = Table::new(
            vec!["a".to_string(), "a".to_string()],
            vec![vec![Cell::Empty, Cell::Empty]],
        );

        let stats = Validator::new(RuleSet::letters_only(ColumnScope::All))
            .annotate(&mut table)
            .unwrap();

        assert_eq!(stats.empty_cells_by_column.get("a"), Some(&2));
        assert_eq!(stats.total_empty_cells, 2);
    }
}
