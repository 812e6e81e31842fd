//! The per-column rule table.
//!
//! Rules are data, not code: a [`RuleSet`] is a list of [`ColumnRule`]
//! entries plus the [`ColumnScope`] of the letter scan. The engine in
//! [`crate::validation::engine`] binds a rule set to a concrete table and
//! evaluates it row by row.

use crate::types::Cell;

/// Name of the appended error-summary column.
pub const ERRORS_COLUMN: &str = "ValidationErrors";

/// Separator between messages in a row's error summary.
pub const MESSAGE_SEPARATOR: &str = "; ";

/// How many leading columns the letter scan covers by default.
pub const DEFAULT_SCAN_WIDTH: usize = 19;

/// A single per-column validation rule.
///
/// Named rules bind by header name and silently skip when the column is
/// absent; positional rules bind by 0-based column index and skip when the
/// table is narrower.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnRule {
    /// The column must hold an all-digit code of exactly `digits` digits.
    /// Emits at most one message per row: emptiness, then digit content,
    /// then length, first failure wins.
    DigitCode {
        /// Header name the rule binds to.
        column: String,
        /// Required digit count.
        digits: usize,
    },
    /// The column at a fixed position must hold a number. Messages carry
    /// `label` instead of the column's actual header name.
    NumericByPosition {
        /// 0-based column index.
        index: usize,
        /// Fixed label used in messages.
        label: String,
    },
    /// The column must be non-empty.
    RequiredText {
        /// Header name the rule binds to.
        column: String,
    },
}

/// Which columns the letter scan covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnScope {
    /// The first `n` columns by position.
    FirstN(usize),
    /// Every column.
    All,
}

impl ColumnScope {
    /// Whether a 0-based column index falls inside the scope.
    pub fn contains(&self, index: usize) -> bool {
        match self {
            ColumnScope::FirstN(n) => index < *n,
            ColumnScope::All => true,
        }
    }
}

/// The rule configuration for one validation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    /// Named/positional rules, evaluated in order before the letter scan.
    pub column_rules: Vec<ColumnRule>,
    /// Scope of the letter scan over columns not covered by `column_rules`.
    pub letter_scan: ColumnScope,
}

impl RuleSet {
    /// The full rule table: identifier codes, fixed-position case costs,
    /// required text columns, and the letter scan over the first 19 columns.
    pub fn full() -> Self {
        Self {
            column_rules: vec![
                ColumnRule::DigitCode {
                    column: "UPCCASE".to_string(),
                    digits: 11,
                },
                ColumnRule::DigitCode {
                    column: "CICID".to_string(),
                    digits: 8,
                },
                ColumnRule::NumericByPosition {
                    index: 11,
                    label: "Current Case Cost".to_string(),
                },
                ColumnRule::NumericByPosition {
                    index: 12,
                    label: "New Case Cost".to_string(),
                },
                ColumnRule::RequiredText {
                    column: "Warehouse Name".to_string(),
                },
                ColumnRule::RequiredText {
                    column: "Division".to_string(),
                },
            ],
            letter_scan: ColumnScope::FirstN(DEFAULT_SCAN_WIDTH),
        }
    }

    /// Letter scan only, no named or positional rules. The historical entry
    /// points use `FirstN(19)` for delimited text and `All` for workbooks.
    pub fn letters_only(scope: ColumnScope) -> Self {
        Self {
            column_rules: Vec::new(),
            letter_scan: scope,
        }
    }
}

/// Evaluate a digit-code rule against one cell. At most one message.
pub(crate) fn check_digit_code(cell: &Cell, column: &str, digits: usize) -> Option<String> {
    if cell.is_empty() {
        return Some(format!("{column}: cannot be empty"));
    }
    let text = cell.to_text();
    let code = text.trim();
    if !code.chars().all(|c| c.is_ascii_digit()) {
        return Some(format!("{column}: must contain only numbers"));
    }
    if code.len() != digits {
        return Some(format!("{column}: must be exactly {digits} digits"));
    }
    None
}

/// Evaluate a fixed-position numeric rule against one cell.
pub(crate) fn check_numeric(cell: &Cell, label: &str) -> Option<String> {
    if cell.is_empty() {
        return Some(format!("{label}: cannot be empty"));
    }
    match cell {
        Cell::Number(_) => None,
        _ => {
            let text = cell.to_text();
            if text.trim().parse::<f64>().is_ok() {
                None
            } else {
                Some(format!("{label}: must be a number"))
            }
        }
    }
}

/// Evaluate a required-text rule against one cell.
pub(crate) fn check_required(cell: &Cell, column: &str) -> Option<String> {
    if cell.is_empty() {
        Some(format!("{column}: cannot be empty"))
    } else {
        None
    }
}

/// Evaluate the letter scan against one cell. Empty cells never flag.
pub(crate) fn check_letters(cell: &Cell, column: &str) -> Option<String> {
    if cell.is_empty() {
        return None;
    }
    if cell.to_text().chars().any(|c| c.is_ascii_alphabetic()) {
        Some(format!("{column}: contains alphabets"))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ColumnScope, check_digit_code, check_letters, check_numeric, check_required,
    };
    use crate::types::Cell;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    #[test]
    fn digit_code_first_failure_wins() {
        assert_eq!(
            check_digit_code(&Cell::Empty, "UPCCASE", 11),
            Some("UPCCASE: cannot be empty".to_string())
        );
        assert_eq!(
            check_digit_code(&text("12a45"), "UPCCASE", 11),
            Some("UPCCASE: must contain only numbers".to_string())
        );
        assert_eq!(
            check_digit_code(&text("123"), "UPCCASE", 11),
            Some("UPCCASE: must be exactly 11 digits".to_string())
        );
        assert_eq!(check_digit_code(&text("12345678901"), "UPCCASE", 11), None);
    }

    #[test]
    fn digit_code_accepts_integral_numeric_cells() {
        assert_eq!(
            check_digit_code(&Cell::Number(12345678901.0), "UPCCASE", 11),
            None
        );
        assert_eq!(
            check_digit_code(&Cell::Number(123.0), "CICID", 8),
            Some("CICID: must be exactly 8 digits".to_string())
        );
    }

    #[test]
    fn numeric_check_uses_the_fixed_label() {
        assert_eq!(
            check_numeric(&Cell::Empty, "Current Case Cost"),
            Some("Current Case Cost: cannot be empty".to_string())
        );
        assert_eq!(
            check_numeric(&text("12.5x"), "Current Case Cost"),
            Some("Current Case Cost: must be a number".to_string())
        );
        assert_eq!(check_numeric(&text("12.5"), "Current Case Cost"), None);
        assert_eq!(check_numeric(&Cell::Number(3.0), "New Case Cost"), None);
    }

    #[test]
    fn required_check_flags_only_emptiness() {
        assert_eq!(
            check_required(&text("  "), "Division"),
            Some("Division: cannot be empty".to_string())
        );
        assert_eq!(check_required(&text("abc123"), "Division"), None);
    }

    #[test]
    fn letter_scan_ignores_empty_and_pure_numbers() {
        assert_eq!(
            check_letters(&text("abc123"), "Vendor"),
            Some("Vendor: contains alphabets".to_string())
        );
        assert_eq!(check_letters(&text("123"), "Vendor"), None);
        assert_eq!(check_letters(&Cell::Empty, "Vendor"), None);
        assert_eq!(check_letters(&Cell::Number(1.5), "Vendor"), None);
    }

    #[test]
    fn scope_bounds_are_exclusive() {
        let scope = ColumnScope::FirstN(19);
        assert!(scope.contains(0));
        assert!(scope.contains(18));
        assert!(!scope.contains(19));
        assert!(ColumnScope::All.contains(10_000));
    }
}
