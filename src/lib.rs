//! `rowcheck` validates uploaded tabular files (delimited text or
//! spreadsheets), annotates every row with a human-readable list of rule
//! violations, and computes per-file statistics.
//!
//! The pipeline per request is linear: raw bytes → [`ingestion`] →
//! [`types::Table`] → [`validation::Validator`] → annotated table +
//! [`validation::FileStatistics`] → [`output`] serialization → response.
//! Delimited-text output is additionally persisted in a keyed
//! [`output::OutputStore`] for later retrieval; spreadsheet output is
//! returned inline.
//!
//! ## What gets validated
//!
//! The rule table ([`validation::RuleSet`]) is data, not code:
//!
//! - identifier columns (`UPCCASE`, `CICID`) must hold all-digit codes of a
//!   fixed length
//! - the case-cost columns at fixed positions 12 and 13 must hold numbers
//! - `Warehouse Name` and `Division` must be non-empty
//! - every other leading column is scanned for alphabetic content
//!
//! Rules silently skip columns the file does not have, and malformed cell
//! content is reported in the appended `ValidationErrors` column — it is
//! never an error. Two rule configurations exist: [`validation::RuleSet::full`]
//! (everything above) and [`validation::RuleSet::letters_only`] (the
//! historical letter-scan-only behavior).
//!
//! ## Quick example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use rowcheck::output::MemoryStore;
//! use rowcheck::service::FileValidationService;
//!
//! # fn main() -> Result<(), rowcheck::ProcessingError> {
//! let service = FileValidationService::new(Arc::new(MemoryStore::default()));
//!
//! let stored = service.validate_csv(b"UPCCASE,Division\n12345678901,Grocery\n")?;
//! let annotated = service.fetch_output(&stored.file_id)?;
//! assert!(annotated.starts_with(b"UPCCASE,Division,ValidationErrors"));
//! # Ok(())
//! # }
//! ```
//!
//! Statistics-producing operations return a [`validation::FileStatistics`]
//! alongside the output:
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use rowcheck::output::MemoryStore;
//! use rowcheck::service::FileValidationService;
//!
//! # fn main() -> Result<(), rowcheck::ProcessingError> {
//! let service = FileValidationService::new(Arc::new(MemoryStore::default()));
//!
//! let (_, stats) = service.validate_csv_with_stats(b"UPCCASE,CICID\n123,45678\n")?;
//! assert_eq!(stats.total_rows, 1);
//! assert_eq!(stats.rows_with_errors, 1);
//! assert_eq!(stats.validation_summary.total_errors, 2);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`types`]: the untyped cell/table data model
//! - [`ingestion`]: byte buffers → [`types::Table`] (CSV via `csv`,
//!   workbooks via `calamine`)
//! - [`validation`]: the rule engine, statistics, and the positional
//!   cell-by-cell workbook pass
//! - [`output`]: table serialization (`csv`, `rust_xlsxwriter`) and the
//!   keyed output store
//! - [`service`]: one method per request operation, plus the JSON response
//!   envelopes
//! - [`observability`]: request-outcome observer hooks
//! - [`error`]: the shared error enum

pub mod error;
pub mod ingestion;
pub mod observability;
pub mod output;
pub mod service;
pub mod types;
pub mod validation;

pub use error::{ProcessingError, ProcessingResult};
