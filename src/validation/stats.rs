//! Aggregate statistics for one validated file.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::ProcessingResult;

/// Violation totals across all rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationSummary {
    /// Total number of violation messages emitted.
    pub total_errors: usize,
    /// Occurrence count per message category (the text after the column or
    /// label prefix), case-sensitive. Messages from different columns with
    /// identical category text merge into one entry.
    pub error_categories: BTreeMap<String, usize>,
}

/// Per-file statistics computed alongside row annotation.
///
/// Field names match the JSON shape the statistics side channel carries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileStatistics {
    /// Number of data rows (header excluded).
    pub total_rows: usize,
    /// Number of columns before the error column is appended.
    pub total_columns: usize,
    /// Column names in input order, pre-annotation.
    pub column_names: Vec<String>,
    /// Empty-cell count per column. Every column is present, zero counts
    /// included; duplicate column names accumulate under the shared key.
    pub empty_cells_by_column: BTreeMap<String, usize>,
    /// Sum of `empty_cells_by_column` values.
    pub total_empty_cells: usize,
    /// Number of rows whose error summary is non-empty.
    pub rows_with_errors: usize,
    /// Violation totals and per-category counts.
    pub validation_summary: ValidationSummary,
    /// Wall-clock processing duration in seconds, rounded to 2 decimals.
    pub processing_time_seconds: f64,
}

impl FileStatistics {
    /// Serialize to the JSON string carried on the statistics side channel.
    pub fn to_json(&self) -> ProcessingResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Category of a violation message: the substring after the first `": "`.
/// Messages without a prefix are their own category.
pub fn category_of(message: &str) -> &str {
    match message.split_once(": ") {
        Some((_, category)) => category,
        None => message,
    }
}

/// Round a duration in seconds to 2 decimal places for reporting.
pub(crate) fn round_seconds(seconds: f64) -> f64 {
    (seconds * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::{category_of, round_seconds};

    #[test]
    fn category_is_the_message_suffix() {
        assert_eq!(category_of("UPCCASE: must be exactly 11 digits"), "must be exactly 11 digits");
        assert_eq!(category_of("Vendor Item: contains alphabets"), "contains alphabets");
        assert_eq!(category_of("no prefix here"), "no prefix here");
    }

    #[test]
    fn category_splits_on_the_first_separator_only() {
        assert_eq!(category_of("a: b: c"), "b: c");
    }

    #[test]
    fn seconds_round_to_two_decimals() {
        assert_eq!(round_seconds(0.123), 0.12);
        assert_eq!(round_seconds(0.128), 0.13);
        assert_eq!(round_seconds(2.0), 2.0);
    }
}
