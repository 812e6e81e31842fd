use thiserror::Error;

/// Convenience result type for file-processing operations.
pub type ProcessingResult<T> = Result<T, ProcessingError>;

/// Error type returned across ingestion, validation, output, and storage.
///
/// This is a single error enum shared by every operation; the service layer
/// flattens any variant into the uniform `{"error": ...}` response body.
#[derive(Debug, Error)]
pub enum ProcessingError {
    /// Underlying I/O error (e.g. output directory unwritable).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Delimited-text read/write error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Spreadsheet read error (corrupt container, unreadable structure).
    #[error("spreadsheet error: {0}")]
    Excel(#[from] calamine::Error),

    /// Spreadsheet write error.
    #[error("spreadsheet write error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// JSON serialization error (statistics side channel, response bodies).
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The bytes could not be interpreted as a table in the declared format
    /// (no header row, no sheets, too many columns for the output format).
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Lookup of an output identifier that does not exist in the store.
    #[error("output '{id}' not found")]
    NotFound { id: String },
}
