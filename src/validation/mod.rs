//! The row validation and statistics engine.
//!
//! This is the core of the crate: every other module either feeds it a
//! [`crate::types::Table`] or serializes what it produces.
//!
//! - [`rules`]: the rule table as data ([`RuleSet`], [`ColumnRule`],
//!   [`ColumnScope`])
//! - [`engine`]: [`Validator`] — one pass per table, appending the
//!   `ValidationErrors` summary column and accumulating [`FileStatistics`]
//! - [`stats`]: the statistics record and category extraction
//! - [`cell_scan`]: the positional workbook pass with its row cap

pub mod cell_scan;
pub mod engine;
pub mod rules;
pub mod stats;

pub use cell_scan::{CellScanOutcome, DEFAULT_ROW_CAP, scan_worksheet_cells};
pub use engine::Validator;
pub use rules::{ColumnRule, ColumnScope, ERRORS_COLUMN, RuleSet};
pub use stats::{FileStatistics, ValidationSummary, category_of};
